//! Per-file outcomes and summaries for batch conversions

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a single file in the batch
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// File was converted
    Converted {
        file: String,
        duration: Duration,
        output: PathBuf,
    },

    /// File failed; the batch moved on to the next one
    Failed {
        file: String,
        duration: Duration,
        error: String,
    },
}

impl FileOutcome {
    /// Check if the file was converted
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }

    /// Check if the file failed
    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Converted {
                file,
                duration,
                output,
            } => {
                write!(
                    f,
                    "✓ {} -> {} ({:.2}s)",
                    file,
                    output.display(),
                    duration.as_secs_f64()
                )
            }
            FileOutcome::Failed {
                file,
                duration,
                error,
            } => {
                write!(
                    f,
                    "✗ {file} - failed after {:.2}s: {error}",
                    duration.as_secs_f64()
                )
            }
        }
    }
}

/// Summary of a batch run
#[derive(Debug)]
pub struct BatchSummary {
    /// Number of files submitted
    pub total: usize,
    /// Number of converted files
    pub successful: usize,
    /// Number of failed files
    pub failed: usize,
    /// Total duration
    pub duration: Duration,
    /// Individual outcomes, in processing order
    pub results: Vec<FileOutcome>,
}

impl BatchSummary {
    /// Build a summary from outcomes
    pub fn from_outcomes(results: Vec<FileOutcome>, duration: Duration) -> Self {
        let successful = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            duration,
            results,
        }
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.successful as f64 / self.total as f64) * 100.0
        }
    }

    /// Format summary as a report
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "Conversion Summary\n\
             ==================\n\
             Total Files: {}\n\
             Converted: {} ({:.1}%)\n\
             Failed: {}\n\
             Duration: {:.2}s\n",
            self.total,
            self.successful,
            self.success_rate(),
            self.failed,
            self.duration.as_secs_f64()
        ));

        let failed: Vec<_> = self.results.iter().filter(|r| r.is_failed()).collect();
        if !failed.is_empty() {
            report.push_str("\nFailed Files:\n");
            for outcome in failed {
                report.push_str(&format!("  - {outcome}\n"));
            }
        }

        report
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_report())
    }
}
