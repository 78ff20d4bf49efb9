//! Capability availability probing.
//!
//! A probe is a pure read: it never provisions and never fails. Anything
//! that goes wrong while asking the runtime is reported as `Unavailable`.

use petassist_core::{AvailabilityState, CapabilityKey, CapabilityProvider};
use tracing::{debug, warn};

/// Ask a provider whether `key` can be used right now.
///
/// Returns `Unavailable` without any async call when the provider's entry
/// point is absent.
pub async fn probe<P>(provider: &P, key: &CapabilityKey) -> AvailabilityState
where
    P: CapabilityProvider + ?Sized,
{
    if !provider.is_present() {
        debug!(%key, "Capability entry point absent");
        return AvailabilityState::Unavailable;
    }

    match provider.availability(key).await {
        Ok(token) => {
            let state = AvailabilityState::from_runtime_token(Some(&token));
            debug!(%key, %token, %state, "Probed capability availability");
            state
        }
        Err(e) => {
            warn!(%key, error = %e, "Availability query failed, treating as unavailable");
            AvailabilityState::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use petassist_core::{CapabilityKind, DownloadMonitor, RuntimeError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        present: bool,
        answer: Result<String, RuntimeError>,
        queries: AtomicUsize,
    }

    impl StubProvider {
        fn new(present: bool, answer: Result<&str, RuntimeError>) -> Self {
            Self {
                present,
                answer: answer.map(str::to_string),
                queries: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CapabilityProvider for StubProvider {
        type Session = ();

        fn kind(&self) -> CapabilityKind {
            CapabilityKind::Proofreader
        }

        fn is_present(&self) -> bool {
            self.present
        }

        async fn availability(&self, _key: &CapabilityKey) -> Result<String, RuntimeError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }

        async fn create(
            &self,
            _key: &CapabilityKey,
            _monitor: Option<DownloadMonitor>,
        ) -> Result<(), RuntimeError> {
            unreachable!("probe never provisions")
        }
    }

    #[tokio::test]
    async fn test_absent_entry_point_skips_query() {
        let provider = StubProvider::new(false, Ok("available"));
        let state = probe(&provider, &CapabilityKey::Proofreader).await;

        assert_eq!(state, AvailabilityState::Unavailable);
        assert_eq!(provider.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_maps_runtime_token() {
        let provider = StubProvider::new(true, Ok("downloadable"));
        assert_eq!(
            probe(&provider, &CapabilityKey::Proofreader).await,
            AvailabilityState::Downloadable
        );
    }

    #[tokio::test]
    async fn test_query_error_is_unavailable() {
        let provider = StubProvider::new(true, Err(RuntimeError::Transport("refused".into())));
        assert_eq!(
            probe(&provider, &CapabilityKey::Proofreader).await,
            AvailabilityState::Unavailable
        );
        assert_eq!(provider.queries.load(Ordering::SeqCst), 1);
    }
}
