//! Progress reporting for batch conversions

/// Progress information for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressInfo {
    /// 1-based position of the file being processed
    pub current: usize,
    /// Denominator shown to the user
    pub total: usize,
}

impl ProgressInfo {
    /// Format progress as a string
    pub fn format_progress(&self) -> String {
        format!("Processing {}/{} ...", self.current, self.total)
    }
}

/// Trait for progress callbacks
pub trait ProgressCallback {
    /// Called before each file is processed
    fn on_progress(&self, info: &ProgressInfo);
}

impl<F> ProgressCallback for F
where
    F: Fn(&ProgressInfo),
{
    fn on_progress(&self, info: &ProgressInfo) {
        self(info)
    }
}

/// Tracks position within a batch and feeds an optional callback
pub struct BatchProgress<'a> {
    total: usize,
    current: usize,
    callback: Option<&'a dyn ProgressCallback>,
}

impl<'a> BatchProgress<'a> {
    pub fn new(total: usize, callback: Option<&'a dyn ProgressCallback>) -> Self {
        Self {
            total,
            current: 0,
            callback,
        }
    }

    /// Mark the next file as started and notify the callback
    pub fn start_file(&mut self) {
        self.current += 1;
        if let Some(callback) = self.callback {
            callback.on_progress(&self.get_info());
        }
    }

    pub fn get_info(&self) -> ProgressInfo {
        ProgressInfo {
            current: self.current,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_progress_info_format() {
        let info = ProgressInfo {
            current: 3,
            total: 12,
        };

        assert_eq!(info.format_progress(), "Processing 3/12 ...");
    }

    #[test]
    fn test_batch_progress_notifies_callback() {
        let seen = RefCell::new(Vec::new());
        let callback = |info: &ProgressInfo| seen.borrow_mut().push(info.current);

        let mut progress = BatchProgress::new(5, Some(&callback as &dyn ProgressCallback));
        progress.start_file();
        progress.start_file();

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(progress.get_info(), ProgressInfo { current: 2, total: 5 });
    }

    #[test]
    fn test_batch_progress_without_callback() {
        let mut progress = BatchProgress::new(2, None);
        progress.start_file();
        assert_eq!(progress.get_info().current, 1);
    }
}
