//! Directory listing and copy helpers shared by every operation

use crate::error::{DatasetError, Result};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

/// How a file is copied into its destination directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Content, permissions and access/modification times
    PreserveMetadata,
    /// Content and permissions only
    ContentOnly,
}

/// List the regular files of a directory, sorted by name.
///
/// Subdirectories, and names that are not valid UTF-8, are skipped. A missing
/// or unreadable directory is an error.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let read_dir_error = |source| DatasetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        if !entry.file_type().map_err(read_dir_error)?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!("Skipping non UTF-8 file name {:?}", raw),
        }
    }

    names.sort();
    Ok(names)
}

/// Number of entries in a directory, files or not
pub fn count_entries(dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(dir).map_err(|source| DatasetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(entries.count())
}

/// Create a directory and its parents if they do not exist yet
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| DatasetError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Copy `name` from `src_dir` into `dest_dir`, keeping the file name.
///
/// Returns the destination path.
pub fn copy_into(src_dir: &Path, name: &str, dest_dir: &Path, mode: CopyMode) -> Result<PathBuf> {
    let from = src_dir.join(name);
    let to = dest_dir.join(name);

    let copied = match mode {
        CopyMode::PreserveMetadata => copy_with_metadata(&from, &to),
        CopyMode::ContentOnly => fs::copy(&from, &to).map(|_| ()),
    };
    copied.map_err(|source| DatasetError::Copy {
        from: from.clone(),
        to: to.clone(),
        source,
    })?;

    tracing::debug!("Copied {} -> {}", from.display(), to.display());
    Ok(to)
}

fn copy_with_metadata(from: &Path, to: &Path) -> io::Result<()> {
    let mut reader = File::open(from)?;
    let metadata = reader.metadata()?;
    let mut writer = File::create(to)?;
    io::copy(&mut reader, &mut writer)?;

    // Timestamps go first: the source permissions may make the copy read-only.
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    writer.set_times(times)?;
    drop(writer);

    fs::set_permissions(to, metadata.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_list_files_sorted_and_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.pdf"), b"b").unwrap();
        fs::write(dir.path().join("a.pdf"), b"a").unwrap();
        fs::write(dir.path().join("c.txt"), b"c").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["a.pdf", "b.pdf", "c.txt"]);
        assert_eq!(count_entries(dir.path()).unwrap(), 4);
    }

    #[test]
    fn test_list_files_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        match list_files(&missing) {
            Err(DatasetError::ReadDir { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected ReadDir error, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_dir_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_copy_into_preserves_modified_time() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source_file = src.path().join("doc.pdf");
        fs::write(&source_file, b"%PDF-1.4").unwrap();

        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&source_file)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let copied = copy_into(src.path(), "doc.pdf", dest.path(), CopyMode::PreserveMetadata)
            .unwrap();

        assert_eq!(copied, dest.path().join("doc.pdf"));
        assert_eq!(fs::read(&copied).unwrap(), b"%PDF-1.4");
        assert_eq!(fs::metadata(&copied).unwrap().modified().unwrap(), old);
        assert!(source_file.exists());
    }

    #[test]
    fn test_copy_into_content_only() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(src.path().join("a.png"), b"png").unwrap();

        let copied = copy_into(src.path(), "a.png", dest.path(), CopyMode::ContentOnly).unwrap();
        assert_eq!(fs::read(copied).unwrap(), b"png");
    }

    #[test]
    fn test_copy_into_missing_source() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        let result = copy_into(src.path(), "ghost.pdf", dest.path(), CopyMode::ContentOnly);
        assert!(matches!(result, Err(DatasetError::Copy { .. })));
    }
}
