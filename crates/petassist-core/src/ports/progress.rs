//! Progress sink port.
//!
//! Receives provisioning progress as a percentage in `0.0..=100.0`. UI
//! adapters update a progress bar; tests record the values.

/// Receiver of provisioning progress.
///
/// Closures `Fn(f64) + Send + Sync` implement this trait directly.
pub trait ProgressSink: Send + Sync {
    /// Called with the current percentage.
    fn on_progress(&self, percent: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Send + Sync,
{
    fn on_progress(&self, percent: f64) {
        self(percent);
    }
}

/// A sink that discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&self, _percent: f64) {}
}
