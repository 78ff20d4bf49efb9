//! Terminal progress bar for one-time model provisioning.

use std::sync::{Arc, Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};
use petassist_core::ProgressSink;

/// Progress sink drawing an indicatif bar, created on the first event so
/// cache hits and ready models print nothing.
pub struct ProvisioningProgress {
    label: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProvisioningProgress {
    pub fn new(label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            bar: Mutex::new(None),
        })
    }

    /// As a sink for facade calls.
    pub fn sink(self: &Arc<Self>) -> Arc<dyn ProgressSink> {
        Arc::clone(self) as Arc<dyn ProgressSink>
    }

    fn create_bar(label: &str) -> ProgressBar {
        let pb = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos:>3}%")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb.set_message(label.to_string());
        pb
    }

    /// Clear the bar if the call ended before provisioning completed.
    pub fn abandon(&self) {
        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.take() {
            pb.abandon();
        }
    }
}

impl ProgressSink for ProvisioningProgress {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn on_progress(&self, percent: f64) {
        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        let pb = guard.get_or_insert_with(|| Self::create_bar(&self.label));
        pb.set_position(percent.round() as u64);
        if percent >= 100.0 {
            pb.finish_with_message(format!("{} ready", self.label));
            guard.take();
        }
    }
}
