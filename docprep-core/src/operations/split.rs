//! Train/test/eval dataset splitting
//!
//! This module partitions the files of a directory into train, test and an
//! optional eval set, either by exact counts or by ratios, and copies each
//! partition into its own directory.
//!
//! The split happens in two randomized steps: the files are first divided
//! into train and a held-out group sized for test and eval together, then the
//! held-out group is divided into test and eval.

use crate::error::{DatasetError, Result};
use crate::files::{copy_into, ensure_dir, list_files, CopyMode};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};

/// A named subset of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Train,
    Test,
    Eval,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Test, Partition::Eval];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test => "test",
            Partition::Eval => "eval",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many files go to test and eval
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitSpec {
    /// Exact number of files
    Counts { test: usize, eval: usize },
    /// Fractions of the input, each in `[0, 1)`
    Ratios { test: f64, eval: f64 },
}

/// Partition sizes for a given number of files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub test: usize,
    pub eval: usize,
}

impl SplitSpec {
    /// Resolve partition sizes for `total` files.
    ///
    /// Ratio sizes are rounded up: the held-out group gets
    /// `ceil((test + eval) * total)` files and eval gets its share of that
    /// group, also rounded up. The float products are not corrected, so
    /// `0.1 + 0.2` on 10 files holds out 4.
    pub fn resolve(&self, total: usize) -> Result<SplitSizes> {
        let (held_out, eval) = match *self {
            SplitSpec::Counts { test, eval } => {
                let held_out = test.checked_add(eval).ok_or_else(|| {
                    DatasetError::InvalidSplit(format!(
                        "test size ({test}) + eval size ({eval}) overflows"
                    ))
                })?;
                if held_out == 0 {
                    return Err(DatasetError::InvalidSplit(
                        "test and eval sizes are both zero".to_string(),
                    ));
                }
                if held_out > total {
                    return Err(DatasetError::InvalidSplit(format!(
                        "test + eval size ({held_out}) exceeds the {total} available files"
                    )));
                }
                (held_out, eval)
            }
            SplitSpec::Ratios { test, eval } => {
                for (name, ratio) in [("test", test), ("eval", eval)] {
                    if !(0.0..1.0).contains(&ratio) {
                        return Err(DatasetError::InvalidSplit(format!(
                            "{name} ratio {ratio} is outside [0, 1)"
                        )));
                    }
                }
                let combined = test + eval;
                if combined <= 0.0 {
                    return Err(DatasetError::InvalidSplit(
                        "test and eval ratios are both zero".to_string(),
                    ));
                }
                if combined >= 1.0 {
                    return Err(DatasetError::InvalidSplit(format!(
                        "test + eval ratio ({combined}) must be below 1"
                    )));
                }

                let held_out = ceil_size(combined * total as f64).min(total);
                let eval = if eval > 0.0 {
                    ceil_size(eval / combined * held_out as f64).min(held_out)
                } else {
                    0
                };
                (held_out, eval)
            }
        };

        Ok(SplitSizes {
            train: total - held_out,
            test: held_out - eval,
            eval,
        })
    }
}

fn ceil_size(value: f64) -> usize {
    value.ceil().max(0.0) as usize
}

/// Files assigned to each partition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSplit {
    pub train: Vec<String>,
    pub test: Vec<String>,
    pub eval: Vec<String>,
}

impl DatasetSplit {
    pub fn files(&self, partition: Partition) -> &[String] {
        match partition {
            Partition::Train => &self.train,
            Partition::Test => &self.test,
            Partition::Eval => &self.eval,
        }
    }

    /// Total number of files over all partitions
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len() + self.eval.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Destination directories of a split
#[derive(Debug, Clone)]
pub struct SplitTargets {
    pub train_dir: PathBuf,
    pub test_dir: PathBuf,
    pub eval_dir: Option<PathBuf>,
}

impl SplitTargets {
    pub fn new(train_dir: impl Into<PathBuf>, test_dir: impl Into<PathBuf>) -> Self {
        Self {
            train_dir: train_dir.into(),
            test_dir: test_dir.into(),
            eval_dir: None,
        }
    }

    pub fn with_eval_dir(mut self, eval_dir: impl Into<PathBuf>) -> Self {
        self.eval_dir = Some(eval_dir.into());
        self
    }

    /// Directory receiving `partition`, if one was given
    pub fn dir(&self, partition: Partition) -> Option<&Path> {
        match partition {
            Partition::Train => Some(&self.train_dir),
            Partition::Test => Some(&self.test_dir),
            Partition::Eval => self.eval_dir.as_deref(),
        }
    }
}

/// Randomly partition `files` according to `spec`.
///
/// Every input file ends up in exactly one partition.
pub fn partition_files<R: Rng + ?Sized>(
    mut files: Vec<String>,
    spec: &SplitSpec,
    rng: &mut R,
) -> Result<DatasetSplit> {
    let sizes = spec.resolve(files.len())?;

    files.shuffle(rng);
    let train = files.split_off(sizes.test + sizes.eval);
    let mut held_out = files;

    if sizes.eval == 0 {
        return Ok(DatasetSplit {
            train,
            test: held_out,
            eval: Vec::new(),
        });
    }

    held_out.shuffle(rng);
    let test = held_out.split_off(sizes.eval);
    Ok(DatasetSplit {
        train,
        test,
        eval: held_out,
    })
}

/// Split the files of `src_dir` and copy each partition into its directory.
///
/// Returns `Ok(None)` without touching the filesystem when no split
/// specification is given. Copies carry content and permissions but not
/// timestamps. Eval files are only copied when an eval directory is set.
pub fn split_dataset<R: Rng + ?Sized>(
    src_dir: &Path,
    targets: &SplitTargets,
    spec: Option<SplitSpec>,
    rng: &mut R,
) -> Result<Option<DatasetSplit>> {
    let Some(spec) = spec else {
        tracing::info!("No split specification supplied, nothing to do");
        return Ok(None);
    };

    for partition in Partition::ALL {
        if let Some(dir) = targets.dir(partition) {
            ensure_dir(dir)?;
        }
    }

    let split = partition_files(list_files(src_dir)?, &spec, rng)?;

    for partition in Partition::ALL {
        let files = split.files(partition);
        match targets.dir(partition) {
            Some(dir) => copy_partition(src_dir, files, dir)?,
            None if !files.is_empty() => {
                tracing::warn!(
                    "{} {partition} files were not copied because no {partition} directory was given",
                    files.len()
                );
            }
            None => {}
        }
    }

    tracing::info!(
        "Split {} files: {} train, {} test, {} eval",
        split.len(),
        split.train.len(),
        split.test.len(),
        split.eval.len()
    );
    Ok(Some(split))
}

fn copy_partition(src_dir: &Path, files: &[String], dest_dir: &Path) -> Result<()> {
    for file in files {
        copy_into(src_dir, file, dest_dir, CopyMode::ContentOnly)?;
    }
    Ok(())
}
