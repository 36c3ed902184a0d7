//! Random sampling of a directory

use crate::error::Result;
use crate::files::{copy_into, ensure_dir, list_files, CopyMode};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

/// Copy `count` randomly chosen files from `src_dir` into `dest_dir`.
///
/// Asking for more files than the directory holds copies all of them. Copies
/// keep the source timestamps and permissions. Returns the copied file names
/// in the order they were drawn.
pub fn sample_files<R: Rng + ?Sized>(
    src_dir: &Path,
    dest_dir: &Path,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    ensure_dir(dest_dir)?;

    let mut files = list_files(src_dir)?;
    files.shuffle(rng);
    files.truncate(count);

    for file in &files {
        copy_into(src_dir, file, dest_dir, CopyMode::PreserveMetadata)?;
    }

    tracing::info!(
        "Sampled {} files from {} into {}",
        files.len(),
        src_dir.display(),
        dest_dir.display()
    );
    Ok(files)
}
