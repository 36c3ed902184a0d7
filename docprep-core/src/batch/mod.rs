//! Batch bookkeeping for file-by-file operations
//!
//! A batch walks a list of files one at a time. Failures are recorded per file
//! and never stop the batch; the caller gets a [`BatchSummary`] at the end and
//! can watch progress through a [`ProgressCallback`].

pub mod progress;
pub mod result;

pub use progress::{BatchProgress, ProgressCallback, ProgressInfo};
pub use result::{BatchSummary, FileOutcome};
