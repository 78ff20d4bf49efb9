//! Download progress relay.
//!
//! Converts the runtime's loaded fraction into the percentage stream UI
//! sinks expect: values in `0..=100`, never decreasing, with `100` emitted
//! exactly once when provisioning completes.

use std::sync::{Arc, Mutex, PoisonError};

use petassist_core::{DownloadMonitor, ProgressSink};
use tracing::trace;

#[derive(Debug, Default)]
struct RelayState {
    last: f64,
    completed: bool,
}

/// Forwards provisioning progress to one sink.
pub struct DownloadProgressRelay {
    sink: Arc<dyn ProgressSink>,
    state: Mutex<RelayState>,
}

impl DownloadProgressRelay {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Arc<Self> {
        Arc::new(Self {
            sink,
            state: Mutex::new(RelayState::default()),
        })
    }

    /// A monitor suitable for [`CapabilityProvider::create`].
    ///
    /// [`CapabilityProvider::create`]: petassist_core::CapabilityProvider::create
    pub fn monitor(self: &Arc<Self>) -> DownloadMonitor {
        let relay = Arc::clone(self);
        DownloadMonitor::new(move |loaded| relay.report_fraction(loaded))
    }

    /// Report a loaded fraction in `0.0..=1.0`. Out-of-range values are clamped.
    pub fn report_fraction(&self, loaded: f64) {
        if !loaded.is_finite() {
            return;
        }
        self.emit((loaded * 100.0).clamp(0.0, 100.0));
    }

    /// Mark provisioning complete, emitting `100` if it was not reported yet.
    pub fn finish(&self) {
        self.emit(100.0);
    }

    fn emit(&self, percent: f64) {
        // Held across the sink call so concurrent reports cannot reorder.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.completed || percent < state.last {
            trace!(percent, last = state.last, "Dropping progress event");
            return;
        }
        state.last = percent;
        if percent >= 100.0 {
            state.completed = true;
        }
        self.sink.on_progress(percent);
    }
}
