//! `AssistCore` - the assistant facade container.
//!
//! Adapters (CLI, UI bindings) receive an `AssistCore` built at their
//! composition root and reach all four capabilities through it.

use std::sync::Arc;

use petassist_core::{AvailabilityState, CapabilityKey, CapabilityKind};

use crate::availability::AvailabilityTracker;
use crate::facade::{
    ImageClassifierFacade, ProofreaderFacade, PromptProvider, ProofreaderProvider,
    TranslatorFacade, TranslatorProvider, WriterFacade, WriterProvider,
};

/// Concrete providers for each capability.
#[derive(Clone)]
pub struct Providers {
    pub classifier: Arc<PromptProvider>,
    pub writer: Arc<WriterProvider>,
    pub proofreader: Arc<ProofreaderProvider>,
    pub translator: Arc<TranslatorProvider>,
}

/// The assistant facade container.
///
/// # Example
///
/// ```ignore
/// let core = AssistCore::new(providers);
/// if core.is_offered(&CapabilityKey::Writer) {
///     let text = core.writer().improve(ImproveRequest::new(draft), None).await?;
/// }
/// ```
pub struct AssistCore {
    classifier: ImageClassifierFacade,
    writer: WriterFacade,
    proofreader: ProofreaderFacade,
    translator: TranslatorFacade,
    tracker: Arc<AvailabilityTracker>,
}

impl AssistCore {
    pub fn new(providers: Providers) -> Self {
        let tracker = Arc::new(AvailabilityTracker::new());
        Self {
            classifier: ImageClassifierFacade::new(providers.classifier, Arc::clone(&tracker)),
            writer: WriterFacade::new(providers.writer, Arc::clone(&tracker)),
            proofreader: ProofreaderFacade::new(providers.proofreader, Arc::clone(&tracker)),
            translator: TranslatorFacade::new(providers.translator, Arc::clone(&tracker)),
            tracker,
        }
    }

    pub const fn classifier(&self) -> &ImageClassifierFacade {
        &self.classifier
    }

    pub const fn writer(&self) -> &WriterFacade {
        &self.writer
    }

    pub const fn proofreader(&self) -> &ProofreaderFacade {
        &self.proofreader
    }

    pub const fn translator(&self) -> &TranslatorFacade {
        &self.translator
    }

    /// Latest known availability for every probed capability instance.
    pub fn snapshot(&self) -> Vec<(CapabilityKey, AvailabilityState)> {
        self.tracker.snapshot()
    }

    /// Whether the UI should offer the capability behind `key`.
    pub fn is_offered(&self, key: &CapabilityKey) -> bool {
        match key.kind() {
            CapabilityKind::ImageClassifier => self.classifier.gateway().is_offered(key),
            CapabilityKind::Writer => self.writer.gateway().is_offered(key),
            CapabilityKind::Proofreader => self.proofreader.gateway().is_offered(key),
            CapabilityKind::Translator => self.translator.gateway().is_offered(key),
        }
    }

    /// Probe `key` without provisioning and record the result.
    pub async fn refresh(&self, key: &CapabilityKey) -> AvailabilityState {
        match key.kind() {
            CapabilityKind::ImageClassifier => self.classifier.gateway().availability(key).await,
            CapabilityKind::Writer => self.writer.gateway().availability(key).await,
            CapabilityKind::Proofreader => self.proofreader.gateway().availability(key).await,
            CapabilityKind::Translator => self.translator.gateway().availability(key).await,
        }
    }
}
