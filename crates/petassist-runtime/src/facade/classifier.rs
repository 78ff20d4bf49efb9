use std::sync::Arc;

use petassist_core::{
    AssistFailure, CapabilityKey, CapabilityKind, ImageInput, PetImageAnalysis, ProgressSink,
};
use tracing::{info, warn};

use super::{CapabilityGateway, PromptProvider};
use crate::availability::AvailabilityTracker;
use crate::invoke;

/// Pet photo autofill.
pub struct ImageClassifierFacade {
    gateway: CapabilityGateway<PromptProvider>,
}

impl ImageClassifierFacade {
    pub fn new(provider: Arc<PromptProvider>, tracker: Arc<AvailabilityTracker>) -> Self {
        Self {
            gateway: CapabilityGateway::new(provider, tracker),
        }
    }

    pub fn is_offered(&self) -> bool {
        self.gateway.is_offered(&CapabilityKey::ImageClassifier)
    }

    pub fn gateway(&self) -> &CapabilityGateway<PromptProvider> {
        &self.gateway
    }

    /// Classify a pet photo.
    ///
    /// Unusable model output yields an `unknown` analysis, never a failure.
    pub async fn analyze(
        &self,
        image: ImageInput,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<PetImageAnalysis, AssistFailure> {
        let session = self
            .gateway
            .acquire(&CapabilityKey::ImageClassifier, progress)
            .await?;

        let analysis = invoke::classify(&session, image).await.map_err(|e| {
            warn!(error = %e, "Pet photo classification failed");
            AssistFailure::from_invocation(CapabilityKind::ImageClassifier, &e)
        })?;
        info!(animal = analysis.animal.as_str(), breed = %analysis.breed, "Pet photo classified");
        Ok(analysis)
    }
}
