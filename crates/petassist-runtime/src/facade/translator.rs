use std::sync::Arc;

use petassist_core::{
    AssistFailure, CapabilityKey, CapabilityKind, LanguageTag, ProgressSink,
};
use tracing::{debug, warn};

use super::{CapabilityGateway, TranslatorProvider};
use crate::availability::AvailabilityTracker;
use crate::invoke;

/// Translation of listing text, one session per language pair.
pub struct TranslatorFacade {
    gateway: CapabilityGateway<TranslatorProvider>,
}

impl TranslatorFacade {
    pub fn new(provider: Arc<TranslatorProvider>, tracker: Arc<AvailabilityTracker>) -> Self {
        Self {
            gateway: CapabilityGateway::new(provider, tracker),
        }
    }

    pub fn is_offered(&self, source: &LanguageTag, target: &LanguageTag) -> bool {
        source == target
            || self
                .gateway
                .is_offered(&CapabilityKey::translator(source.clone(), target.clone()))
    }

    pub fn gateway(&self) -> &CapabilityGateway<TranslatorProvider> {
        &self.gateway
    }

    /// Translate `text` from `source` to `target`.
    ///
    /// Identical languages and blank text are returned as-is without
    /// provisioning anything.
    pub async fn translate(
        &self,
        text: &str,
        source: &LanguageTag,
        target: &LanguageTag,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Result<String, AssistFailure> {
        if source == target {
            debug!(language = %source, "Source equals target, skipping translation");
            return Ok(text.to_string());
        }
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let key = CapabilityKey::translator(source.clone(), target.clone());
        let session = self.gateway.acquire(&key, progress).await?;
        invoke::translate(&session, text).await.map_err(|e| {
            warn!(%key, error = %e, "Translation failed");
            AssistFailure::from_invocation(CapabilityKind::Translator, &e)
        })
    }
}
