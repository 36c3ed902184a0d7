//! File keys used to join ground-truth files to their source files
//!
//! A key is a file name without its extension. Ground-truth files may carry an
//! extra suffix (for example `A1234-2.png` for the second annotation of
//! `A1234.pdf`), which can be dropped by splitting on a delimiter and
//! discarding the last segment.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// Normalized file identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileKey(String);

impl FileKey {
    /// Key of a file name: the name with its last extension removed
    pub fn from_file_name(name: &str) -> Self {
        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name);
        FileKey(stem.to_string())
    }

    /// Key of a file name with the trailing `delimiter` segment removed.
    ///
    /// `A1234-2.png` with delimiter `-` gives `A1234`. A stem without the
    /// delimiter is kept whole, and an empty delimiter means no truncation.
    pub fn normalized(name: &str, delimiter: Option<&str>) -> Self {
        let key = Self::from_file_name(name);
        match delimiter {
            Some(delimiter) if !delimiter.is_empty() => key.without_tail(delimiter),
            _ => key,
        }
    }

    fn without_tail(self, delimiter: &str) -> Self {
        match self.0.rsplit_once(delimiter) {
            Some((head, _tail)) => FileKey(head.to_string()),
            None => self,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source directory index: key to original file name
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    files: BTreeMap<FileKey, String>,
}

impl SourceSet {
    /// Build from a directory listing. When two files share a stem, the first
    /// one listed is kept.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files = BTreeMap::new();
        for name in names {
            let name = name.into();
            files.entry(FileKey::from_file_name(&name)).or_insert(name);
        }
        Self { files }
    }

    pub fn get(&self, key: &FileKey) -> Option<&str> {
        self.files.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &FileKey) -> bool {
        self.files.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// One ground-truth file and the key it normalizes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruthEntry {
    pub key: FileKey,
    pub file_name: String,
}

/// Ground-truth directory index, in listing order, one entry per key.
///
/// Later files that normalize to an already seen key are dropped.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthSet {
    entries: Vec<GroundTruthEntry>,
}

impl GroundTruthSet {
    pub fn from_names<I, S>(names: I, delimiter: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();
        for name in names {
            let file_name = name.into();
            let key = FileKey::normalized(&file_name, delimiter);
            if !seen.insert(key.clone()) {
                tracing::debug!("Dropping duplicate ground truth {} for key {}", file_name, key);
                continue;
            }
            entries.push(GroundTruthEntry { key, file_name });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[GroundTruthEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
