//! Capability provider port.
//!
//! A provider wraps one capability entry point of the underlying runtime.
//! Implementations live in adapters (e.g. the OpenAI-compatible adapter in
//! petassist-runtime) and are injected at the composition root, so the
//! orchestration logic never touches ambient runtime state.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::RuntimeError;
use crate::domain::{CapabilityKey, CapabilityKind};

/// Download monitor handed to [`CapabilityProvider::create`].
///
/// Providers report the loaded fraction of model assets in `0.0..=1.0`,
/// mirroring the runtime's own `downloadprogress` events. Conversion to a
/// percentage and ordering guarantees are the orchestration layer's job.
#[derive(Clone)]
pub struct DownloadMonitor {
    listener: Arc<dyn Fn(f64) + Send + Sync>,
}

impl DownloadMonitor {
    pub fn new(listener: impl Fn(f64) + Send + Sync + 'static) -> Self {
        Self {
            listener: Arc::new(listener),
        }
    }

    /// Report the fraction of assets loaded so far.
    pub fn report(&self, loaded: f64) {
        (self.listener)(loaded);
    }
}

impl fmt::Debug for DownloadMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadMonitor").finish_non_exhaustive()
    }
}

/// Port for one capability of the runtime.
///
/// # Example
///
/// ```ignore
/// let state = AvailabilityState::from_runtime_token(
///     provider.availability(&key).await.ok().as_deref(),
/// );
/// if state.is_usable() {
///     let session = provider.create(&key, None).await?;
/// }
/// ```
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Session handle returned by provisioning.
    type Session: Send + Sync + 'static;

    /// Which capability this provider serves.
    fn kind(&self) -> CapabilityKind;

    /// Whether the runtime exposes this capability's entry point at all.
    ///
    /// Must be cheap and synchronous; no I/O.
    fn is_present(&self) -> bool;

    /// Query availability for a key.
    ///
    /// Returns the runtime's raw availability token (`"available"`,
    /// `"downloadable"`, ...). Interpretation happens in the probe.
    async fn availability(&self, key: &CapabilityKey) -> Result<String, RuntimeError>;

    /// Create a session, downloading assets if needed.
    ///
    /// When `monitor` is present, download progress is reported through it.
    async fn create(
        &self,
        key: &CapabilityKey,
        monitor: Option<DownloadMonitor>,
    ) -> Result<Self::Session, RuntimeError>;
}
