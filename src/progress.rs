//! Progress bar display for batch installations

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a batch of installs
pub struct ProgressDisplay {
    pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total item count
    pub fn new(total: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        Self { pb }
    }

    /// A display that never draws
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the current step
    pub fn update(&self, step: &str, app: &str) {
        self.pb.set_message(format!("{step} {app}"));
    }

    /// Print a line above the bar
    pub fn println(&self, line: impl AsRef<str>) {
        if self.pb.is_hidden() {
            println!("{}", line.as_ref());
        } else {
            self.pb.println(line);
        }
    }

    /// Increment progress
    pub fn inc(&self) {
        self.pb.inc(1);
    }

    /// Finish progress
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
