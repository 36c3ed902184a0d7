//! Ground-truth filtering
//!
//! Copies the source files that have a matching ground-truth file. Files are
//! joined on their [`FileKey`](crate::key::FileKey): the source file's stem
//! against the ground-truth file's stem, optionally with its trailing
//! delimiter segment removed.

use crate::error::Result;
use crate::files::{copy_into, ensure_dir, list_files, CopyMode};
use crate::key::{GroundTruthSet, SourceSet};
use std::path::{Path, PathBuf};

/// Options for ground-truth filtering
#[derive(Debug, Clone, Default)]
pub struct PickOptions {
    /// Where matched ground-truth files are copied, if anywhere
    pub gt_destination: Option<PathBuf>,
    /// Delimiter whose last segment is stripped from ground-truth stems
    pub remove_gt_tail: Option<String>,
}

impl PickOptions {
    /// Also copy each matched ground-truth file into `dir`
    pub fn with_gt_destination(mut self, dir: impl Into<PathBuf>) -> Self {
        self.gt_destination = Some(dir.into());
        self
    }

    /// Strip the last `delimiter`-separated segment from ground-truth stems
    pub fn with_remove_gt_tail(mut self, delimiter: impl Into<String>) -> Self {
        self.remove_gt_tail = Some(delimiter.into());
        self
    }
}

/// Files copied by [`pick_with_ground_truth`], in ground-truth listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickResult {
    pub copied_files: Vec<String>,
    pub copied_gt_files: Vec<String>,
}

/// Copy every source file that has a ground-truth counterpart.
///
/// When several ground-truth files normalize to the same key only the first
/// one is used. Any listing or copy failure aborts the run; files copied
/// before the failure stay in place.
pub fn pick_with_ground_truth(
    src_dir: &Path,
    gt_dir: &Path,
    dest_dir: &Path,
    options: &PickOptions,
) -> Result<PickResult> {
    ensure_dir(dest_dir)?;
    if let Some(gt_dest) = &options.gt_destination {
        ensure_dir(gt_dest)?;
    }

    let sources = SourceSet::from_names(list_files(src_dir)?);
    let ground_truth =
        GroundTruthSet::from_names(list_files(gt_dir)?, options.remove_gt_tail.as_deref());

    tracing::debug!(
        "Matching {} ground truth keys against {} source files",
        ground_truth.len(),
        sources.len()
    );

    let mut result = PickResult::default();
    for entry in ground_truth.entries() {
        let Some(source_name) = sources.get(&entry.key) else {
            continue;
        };

        copy_into(src_dir, source_name, dest_dir, CopyMode::PreserveMetadata)?;
        result.copied_files.push(source_name.to_string());

        if let Some(gt_dest) = &options.gt_destination {
            copy_into(gt_dir, &entry.file_name, gt_dest, CopyMode::PreserveMetadata)?;
            result.copied_gt_files.push(entry.file_name.clone());
        }
    }

    tracing::info!(
        "Picked {} files with ground truth from {}",
        result.copied_files.len(),
        src_dir.display()
    );
    Ok(result)
}
