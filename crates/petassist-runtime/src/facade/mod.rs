//! Orchestration facades, the only surface UI code calls.
//!
//! Every facade call follows the same path: reuse a cached session or probe
//! availability, short-circuit when unavailable, provision (relaying
//! download progress), invoke, and map errors into [`AssistFailure`]. There
//! are no automatic retries.

mod classifier;
mod proofreader;
mod translator;
mod writer;

use std::sync::Arc;

use petassist_core::{
    AssistFailure, AvailabilityState, CapabilityKey, CapabilityKind, CapabilityProvider,
    ProgressSink, PromptSession, ProofreaderSession, ProvisioningEvent, TranslatorSession,
    WriterSession,
};
use tracing::{info, warn};

use crate::availability::AvailabilityTracker;
use crate::probe::probe;
use crate::progress::DownloadProgressRelay;
use crate::session_cache::{SessionCache, SessionHandle};

pub use classifier::ImageClassifierFacade;
pub use proofreader::ProofreaderFacade;
pub use translator::TranslatorFacade;
pub use writer::WriterFacade;

/// Provider of image-capable prompt sessions.
pub type PromptProvider = dyn CapabilityProvider<Session = Box<dyn PromptSession>>;
pub type WriterProvider = dyn CapabilityProvider<Session = Box<dyn WriterSession>>;
pub type ProofreaderProvider = dyn CapabilityProvider<Session = Box<dyn ProofreaderSession>>;
pub type TranslatorProvider = dyn CapabilityProvider<Session = Box<dyn TranslatorSession>>;

/// Probe, cache and provision sessions for one provider.
pub struct CapabilityGateway<P>
where
    P: CapabilityProvider + ?Sized,
{
    provider: Arc<P>,
    cache: SessionCache<P::Session>,
    tracker: Arc<AvailabilityTracker>,
}

impl<P> CapabilityGateway<P>
where
    P: CapabilityProvider + ?Sized,
{
    pub fn new(provider: Arc<P>, tracker: Arc<AvailabilityTracker>) -> Self {
        Self {
            provider,
            cache: SessionCache::new(),
            tracker,
        }
    }

    pub fn kind(&self) -> CapabilityKind {
        self.provider.kind()
    }

    /// Synchronous "worth offering" check.
    ///
    /// A cached session is always offered. Otherwise uses the latest known
    /// state; before the first probe, falls back to whether the entry point
    /// exists at all.
    pub fn is_offered(&self, key: &CapabilityKey) -> bool {
        if self.cache.get(key).is_some() {
            return true;
        }
        self.tracker
            .latest(key)
            .map_or_else(|| self.provider.is_present(), AvailabilityState::is_usable)
    }

    /// Current availability, probing unless a session is already cached.
    pub async fn availability(&self, key: &CapabilityKey) -> AvailabilityState {
        if self.cache.get(key).is_some() {
            return AvailabilityState::Available;
        }
        let state = probe(&*self.provider, key).await;
        // Another caller may have finished provisioning while this probe ran.
        if self.cache.get(key).is_some() {
            return AvailabilityState::Available;
        }
        self.tracker.record(key, state);
        state
    }

    /// Return the session for `key`, provisioning it on first use.
    ///
    /// `progress` receives download progress only when the probe reported a
    /// pending download and this call ends up running the provisioning.
    pub async fn acquire(
        &self,
        key: &CapabilityKey,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<SessionHandle<P::Session>, AssistFailure> {
        if let Some(handle) = self.cache.get(key) {
            return Ok(handle);
        }

        // Probed even while another caller is provisioning this key: if that
        // run fails, this caller provisions next and needs its own state.
        let kind = self.kind();
        let state = self.availability(key).await;
        if !state.is_usable() {
            info!(%key, "Capability unavailable, skipping provisioning");
            return Err(AssistFailure::unavailable(
                kind,
                format!("runtime reports {key} as {state}"),
            ));
        }

        let relay = progress
            .filter(|_| state.needs_download())
            .map(DownloadProgressRelay::new);
        let provider = Arc::clone(&self.provider);
        let tracker = Arc::clone(&self.tracker);

        let handle = self
            .cache
            .get_or_create(key, || async move {
                tracker.apply(key, ProvisioningEvent::Started);
                info!(%key, %state, "Provisioning capability session");

                let monitor = relay.as_ref().map(DownloadProgressRelay::monitor);
                match provider.create(key, monitor).await {
                    Ok(session) => {
                        if let Some(relay) = &relay {
                            relay.finish();
                        }
                        Ok(session)
                    }
                    Err(e) => {
                        tracker.apply(key, ProvisioningEvent::Failed);
                        Err(e)
                    }
                }
            })
            .await
            .map_err(|e| {
                warn!(%key, error = %e, "Provisioning failed");
                AssistFailure::from_provisioning(kind, &e)
            })?;

        // Recorded outright: an earlier failed run may have left the key
        // Unavailable, which provisioning events cannot leave.
        self.tracker.record(key, AvailabilityState::Available);
        Ok(handle)
    }
}
