//! Shared fakes for runtime integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{StreamExt, stream};
use petassist_core::{
    CapabilityKey, CapabilityKind, CapabilityProvider, ChunkMode, DownloadMonitor, ProgressSink,
    PromptMessage, PromptSession, ProofreadResult, ProofreaderSession, RuntimeError, TextStream,
    TranslatorSession, WriterSession,
};
use petassist_runtime::{AssistCore, Providers};

type Factory<S> = Box<dyn Fn(&CapabilityKey) -> S + Send + Sync>;

/// Scriptable provider counting every call it receives.
pub struct FakeProvider<S> {
    kind: CapabilityKind,
    present: bool,
    token: Mutex<String>,
    download_steps: Vec<f64>,
    availability_delay: Duration,
    create_delay: Duration,
    failures_remaining: AtomicUsize,
    factory: Factory<S>,
    pub availability_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl<S> FakeProvider<S> {
    pub fn new(kind: CapabilityKind, factory: impl Fn(&CapabilityKey) -> S + Send + Sync + 'static) -> Self {
        Self {
            kind,
            present: true,
            token: Mutex::new("available".to_string()),
            download_steps: Vec::new(),
            availability_delay: Duration::ZERO,
            create_delay: Duration::ZERO,
            failures_remaining: AtomicUsize::new(0),
            factory: Box::new(factory),
            availability_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    pub fn with_token(self, token: &str) -> Self {
        *self.token.lock().unwrap() = token.to_string();
        self
    }

    /// Report availability as `downloadable` and emit these loaded fractions on create.
    pub fn with_download(mut self, steps: &[f64]) -> Self {
        *self.token.lock().unwrap() = "downloadable".to_string();
        self.download_steps = steps.to_vec();
        self
    }

    pub fn with_availability_delay(mut self, delay: Duration) -> Self {
        self.availability_delay = delay;
        self
    }

    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = delay;
        self
    }

    pub fn failing_creates(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn set_token(&self, token: &str) {
        *self.token.lock().unwrap() = token.to_string();
    }

    pub fn availability_count(&self) -> usize {
        self.availability_calls.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S> CapabilityProvider for FakeProvider<S>
where
    S: Send + Sync + 'static,
{
    type Session = S;

    fn kind(&self) -> CapabilityKind {
        self.kind
    }

    fn is_present(&self) -> bool {
        self.present
    }

    async fn availability(&self, _key: &CapabilityKey) -> Result<String, RuntimeError> {
        self.availability_calls.fetch_add(1, Ordering::SeqCst);
        if !self.availability_delay.is_zero() {
            tokio::time::sleep(self.availability_delay).await;
        }
        Ok(self.token.lock().unwrap().clone())
    }

    async fn create(
        &self,
        key: &CapabilityKey,
        monitor: Option<DownloadMonitor>,
    ) -> Result<S, RuntimeError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if !self.create_delay.is_zero() {
            tokio::time::sleep(self.create_delay).await;
        }
        if let Some(monitor) = &monitor {
            for step in &self.download_steps {
                monitor.report(*step);
            }
        }

        let failing = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(RuntimeError::Download("network dropped".into()));
        }
        Ok((self.factory)(key))
    }
}

// =============================================================================
// Sessions
// =============================================================================

/// Prompt session answering with a fixed string.
pub struct FixedPrompt(pub String);

#[async_trait]
impl PromptSession for FixedPrompt {
    async fn prompt(&self, _messages: &[PromptMessage]) -> Result<String, RuntimeError> {
        Ok(self.0.clone())
    }
}

/// Writer session replaying scripted chunks.
pub struct ScriptedWriter {
    pub mode: ChunkMode,
    pub chunks: Vec<String>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl WriterSession for ScriptedWriter {
    fn chunk_mode(&self) -> ChunkMode {
        self.mode
    }

    async fn write_streaming(&self, _prompt: &str, _context: &str) -> Result<TextStream, RuntimeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let items: Vec<Result<String, RuntimeError>> =
            self.chunks.iter().cloned().map(Ok).collect();
        Ok(stream::iter(items).boxed())
    }
}

/// Proofreader that capitalizes the first letter and adds a final period.
pub struct TidyProofreader {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProofreaderSession for TidyProofreader {
    async fn proofread(&self, text: &str) -> Result<ProofreadResult, RuntimeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut chars = text.chars();
        let mut tidy: String = chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
        if !tidy.ends_with('.') {
            tidy.push('.');
        }
        Ok(ProofreadResult {
            corrected_input: (tidy != text).then_some(tidy),
            corrections: Vec::new(),
        })
    }
}

/// Proofreader whose responses never decode.
pub struct GarbledProofreader;

#[async_trait]
impl ProofreaderSession for GarbledProofreader {
    async fn proofread(&self, _text: &str) -> Result<ProofreadResult, RuntimeError> {
        Err(RuntimeError::UnexpectedResponse("completion had no content".into()))
    }
}

/// Translator tagging text with its target language, tracking overlap.
pub struct TaggingTranslator {
    pub target: String,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    pub delay: Duration,
    pub fail: bool,
}

#[async_trait]
impl TranslatorSession for TaggingTranslator {
    async fn translate(&self, text: &str) -> Result<String, RuntimeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail {
            return Err(RuntimeError::Invocation("model crashed".into()));
        }
        Ok(format!("[{}] {text}", self.target))
    }
}

// =============================================================================
// Harness
// =============================================================================

pub type Classifier = FakeProvider<Box<dyn PromptSession>>;
pub type Writer = FakeProvider<Box<dyn WriterSession>>;
pub type Proofreader = FakeProvider<Box<dyn ProofreaderSession>>;
pub type Translator = FakeProvider<Box<dyn TranslatorSession>>;

pub fn classifier(answer: &str) -> Classifier {
    let answer = answer.to_string();
    FakeProvider::new(CapabilityKind::ImageClassifier, move |_| {
        Box::new(FixedPrompt(answer.clone())) as Box<dyn PromptSession>
    })
}

pub fn writer(mode: ChunkMode, chunks: &[&str], calls: Arc<AtomicUsize>) -> Writer {
    let chunks: Vec<String> = chunks.iter().map(|c| (*c).to_string()).collect();
    FakeProvider::new(CapabilityKind::Writer, move |_| {
        Box::new(ScriptedWriter {
            mode,
            chunks: chunks.clone(),
            calls: Arc::clone(&calls),
        }) as Box<dyn WriterSession>
    })
}

pub fn proofreader(calls: Arc<AtomicUsize>) -> Proofreader {
    FakeProvider::new(CapabilityKind::Proofreader, move |_| {
        Box::new(TidyProofreader {
            calls: Arc::clone(&calls),
        }) as Box<dyn ProofreaderSession>
    })
}

pub fn garbled_proofreader() -> Proofreader {
    FakeProvider::new(CapabilityKind::Proofreader, |_| {
        Box::new(GarbledProofreader) as Box<dyn ProofreaderSession>
    })
}

#[derive(Default, Clone)]
pub struct OverlapCounters {
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

pub fn translator(counters: OverlapCounters, delay: Duration, fail: bool) -> Translator {
    FakeProvider::new(CapabilityKind::Translator, move |key| {
        let target = key
            .language_pair()
            .map(|pair| pair.target.to_string())
            .unwrap_or_default();
        Box::new(TaggingTranslator {
            target,
            in_flight: Arc::clone(&counters.in_flight),
            max_in_flight: Arc::clone(&counters.max_in_flight),
            delay,
            fail,
        }) as Box<dyn TranslatorSession>
    })
}

/// Everything a facade test needs, with handles on each fake.
pub struct Harness {
    pub core: AssistCore,
    pub classifier: Arc<Classifier>,
    pub writer: Arc<Writer>,
    pub proofreader: Arc<Proofreader>,
    pub translator: Arc<Translator>,
    pub writer_calls: Arc<AtomicUsize>,
    pub proofreader_calls: Arc<AtomicUsize>,
    pub overlap: OverlapCounters,
}

pub struct HarnessBuilder {
    pub classifier: Classifier,
    pub writer: Writer,
    pub proofreader: Proofreader,
    pub translator: Translator,
    writer_calls: Arc<AtomicUsize>,
    proofreader_calls: Arc<AtomicUsize>,
    overlap: OverlapCounters,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        let writer_calls = Arc::new(AtomicUsize::new(0));
        let proofreader_calls = Arc::new(AtomicUsize::new(0));
        let overlap = OverlapCounters::default();
        Self {
            classifier: classifier(r#"{"animal":"dog","breed":"Labrador","confidence":0.8}"#),
            writer: writer(
                ChunkMode::Delta,
                &["Meet ", "Biscuit, ", "a gentle soul. "],
                Arc::clone(&writer_calls),
            ),
            proofreader: proofreader(Arc::clone(&proofreader_calls)),
            translator: translator(overlap.clone(), Duration::ZERO, false),
            writer_calls,
            proofreader_calls,
            overlap,
        }
    }

    pub fn map_classifier(mut self, f: impl FnOnce(Classifier) -> Classifier) -> Self {
        self.classifier = f(self.classifier);
        self
    }

    pub fn map_writer(mut self, f: impl FnOnce(Writer) -> Writer) -> Self {
        self.writer = f(self.writer);
        self
    }

    pub fn map_proofreader(mut self, f: impl FnOnce(Proofreader) -> Proofreader) -> Self {
        self.proofreader = f(self.proofreader);
        self
    }

    /// Replace the translator, keeping the shared overlap counters.
    pub fn translator_with(mut self, delay: Duration, fail: bool, f: impl FnOnce(Translator) -> Translator) -> Self {
        self.translator = f(translator(self.overlap.clone(), delay, fail));
        self
    }

    pub fn build(self) -> Harness {
        let classifier = Arc::new(self.classifier);
        let writer = Arc::new(self.writer);
        let proofreader = Arc::new(self.proofreader);
        let translator = Arc::new(self.translator);

        let core = AssistCore::new(Providers {
            classifier: Arc::clone(&classifier) as _,
            writer: Arc::clone(&writer) as _,
            proofreader: Arc::clone(&proofreader) as _,
            translator: Arc::clone(&translator) as _,
        });

        Harness {
            core,
            classifier,
            writer,
            proofreader,
            translator,
            writer_calls: self.writer_calls,
            proofreader_calls: self.proofreader_calls,
            overlap: self.overlap,
        }
    }
}

/// Progress sink recording every value it receives.
pub fn recording_sink() -> (Arc<Mutex<Vec<f64>>>, Arc<dyn ProgressSink>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink: Arc<dyn ProgressSink> = Arc::new(move |p: f64| sink_seen.lock().unwrap().push(p));
    (seen, sink)
}
