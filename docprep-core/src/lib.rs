//! # docprep
//!
//! Building blocks for preparing a dataset of document images and their
//! ground-truth annotations.
//!
//! ## Features
//!
//! - **PDF to image**: Render the first page of every PDF in a directory to a
//!   grayscale PNG (PDFium, behind the default `pdfium` feature)
//! - **Ground-truth filtering**: Copy the source files that have a matching
//!   ground-truth file, joined on the file stem
//! - **Random sampling**: Copy N randomly drawn files
//! - **Dataset splitting**: Partition a directory into train, test and eval
//!   sets by exact counts or by ratios
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docprep::operations::{split_dataset, SplitSpec, SplitTargets};
//! use std::path::Path;
//!
//! # fn main() -> docprep::Result<()> {
//! let targets = SplitTargets::new("data/train", "data/test").with_eval_dir("data/eval");
//! let spec = SplitSpec::Ratios { test: 0.1, eval: 0.1 };
//!
//! if let Some(split) = split_dataset(Path::new("data/all"), &targets, Some(spec), &mut rand::thread_rng())? {
//!     println!("train: {}, test: {}, eval: {}", split.train.len(), split.test.len(), split.eval.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`operations`] - The four dataset operations
//! - [`key`] - File keys joining ground-truth files to source files
//! - [`files`] - Directory listing and copy helpers
//! - [`batch`] - Per-file outcomes and progress for conversions
//! - [`error`] - Error types

pub mod batch;
pub mod error;
pub mod files;
pub mod key;
pub mod operations;

pub use batch::{BatchSummary, FileOutcome, ProgressCallback, ProgressInfo};
pub use error::{DatasetError, Result};
pub use key::{FileKey, GroundTruthSet, SourceSet};
pub use operations::{
    convert_pdfs, partition_files, pick_with_ground_truth, sample_files, split_dataset,
    ConvertOptions, DatasetSplit, Partition, PickOptions, PickResult, SplitSpec, SplitTargets,
};

/// Current version of docprep
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
