//! Dataset preparation operations
//!
//! This module provides the four directory-level operations: converting PDFs
//! to images, picking files that have ground truth, random sampling, and
//! train/test/eval splitting. Each one reads a source directory, never
//! modifies it, and copies or writes its results into destination
//! directories that are created on demand.

pub mod convert;
pub mod pick;
pub mod sample;
pub mod split;

pub use convert::{convert_pdfs, is_pdf, ConvertOptions, PageRenderer, DEFAULT_DPI};
#[cfg(feature = "pdfium")]
pub use convert::{convert_pdfs_with_pdfium, save_grayscale_png, PdfiumRenderer};
pub use pick::{pick_with_ground_truth, PickOptions, PickResult};
pub use sample::sample_files;
pub use split::{
    partition_files, split_dataset, DatasetSplit, Partition, SplitSizes, SplitSpec, SplitTargets,
};



#[cfg(test)]
mod sample_tests;
