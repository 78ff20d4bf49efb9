use std::sync::Arc;

use petassist_core::{AssistFailure, CapabilityKey, CapabilityKind, ProgressSink};
use tracing::warn;

use super::{CapabilityGateway, ProofreaderProvider};
use crate::availability::AvailabilityTracker;
use crate::invoke;

/// Spelling and grammar correction.
pub struct ProofreaderFacade {
    gateway: CapabilityGateway<ProofreaderProvider>,
}

impl ProofreaderFacade {
    pub fn new(provider: Arc<ProofreaderProvider>, tracker: Arc<AvailabilityTracker>) -> Self {
        Self {
            gateway: CapabilityGateway::new(provider, tracker),
        }
    }

    pub fn is_offered(&self) -> bool {
        self.gateway.is_offered(&CapabilityKey::Proofreader)
    }

    pub fn gateway(&self) -> &CapabilityGateway<ProofreaderProvider> {
        &self.gateway
    }

    pub async fn correct(
        &self,
        text: &str,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<String, AssistFailure> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let session = self
            .gateway
            .acquire(&CapabilityKey::Proofreader, progress)
            .await?;
        invoke::correct(&session, text).await.map_err(|e| {
            warn!(error = %e, "Proofreading failed");
            AssistFailure::from_invocation(CapabilityKind::Proofreader, &e)
        })
    }
}
