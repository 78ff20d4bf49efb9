use std::sync::Arc;

use petassist_core::{AssistFailure, CapabilityKey, CapabilityKind, ProgressSink};
use tracing::{debug, warn};

use super::{CapabilityGateway, WriterProvider};
use crate::availability::AvailabilityTracker;
use crate::invoke::{self, ImproveRequest};

/// Listing description improvement.
pub struct WriterFacade {
    gateway: CapabilityGateway<WriterProvider>,
}

impl WriterFacade {
    pub fn new(provider: Arc<WriterProvider>, tracker: Arc<AvailabilityTracker>) -> Self {
        Self {
            gateway: CapabilityGateway::new(provider, tracker),
        }
    }

    pub fn is_offered(&self) -> bool {
        self.gateway.is_offered(&CapabilityKey::Writer)
    }

    pub fn gateway(&self) -> &CapabilityGateway<WriterProvider> {
        &self.gateway
    }

    /// Rewrite a description. Blank input comes back unchanged with no
    /// capability calls at all.
    pub async fn improve(
        &self,
        request: ImproveRequest,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<String, AssistFailure> {
        if request.is_blank() {
            debug!("Blank description, nothing to improve");
            return Ok(request.current);
        }

        let session = self.gateway.acquire(&CapabilityKey::Writer, progress).await?;
        invoke::improve(&session, &request).await.map_err(|e| {
            warn!(error = %e, "Description rewrite failed");
            AssistFailure::from_invocation(CapabilityKind::Writer, &e)
        })
    }
}
