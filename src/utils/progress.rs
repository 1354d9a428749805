//! Progress reporting for batch feature conversion

use indicatif::{ProgressBar, ProgressStyle};

/// Wrapper around a progress bar for converting many features
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a bar for a known number of features
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} features ({eta}) {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.set_message(description.to_string());

        ProgressTracker { bar }
    }

    /// Advance the bar by one feature
    pub fn increment(&self) {
        self.bar.inc(1);
    }

    /// Finish, replacing the message
    pub fn finish(&self, msg: &str) {
        self.bar.finish_with_message(msg.to_string());
    }
}
