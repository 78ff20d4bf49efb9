//! Capability providers backed by an OpenAI-compatible chat backend.
//!
//! All four providers share one [`OpenAiClient`]. The backend never needs a
//! download step, so availability is either `available` or `unavailable`
//! and no download progress is ever reported.

use std::sync::Arc;

use async_trait::async_trait;
use petassist_core::{
    CapabilityKey, CapabilityKind, CapabilityProvider, ChunkMode, DownloadMonitor, LanguagePair,
    LanguageTag, PromptContent, PromptMessage, PromptRole, PromptSession, ProofreadResult,
    ProofreaderSession, RuntimeError, TextStream, TranslatorSession, WriterFormat, WriterLength,
    WriterOptions, WriterSession, WriterTone,
};
use tracing::debug;

use super::client::OpenAiClient;
use super::models::{ChatMessage, ContentPart, ImageUrl, MessageContent};

async fn availability(client: &OpenAiClient, key: &CapabilityKey) -> Result<String, RuntimeError> {
    let token = client.model_availability().await?;
    debug!(%key, token, "Backend availability");
    Ok(token.to_string())
}

// =============================================================================
// Image classifier
// =============================================================================

pub struct OpenAiPromptProvider {
    client: Arc<OpenAiClient>,
}

impl OpenAiPromptProvider {
    pub const fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CapabilityProvider for OpenAiPromptProvider {
    type Session = Box<dyn PromptSession>;

    fn kind(&self) -> CapabilityKind {
        CapabilityKind::ImageClassifier
    }

    fn is_present(&self) -> bool {
        true
    }

    async fn availability(&self, key: &CapabilityKey) -> Result<String, RuntimeError> {
        availability(&self.client, key).await
    }

    async fn create(
        &self,
        _key: &CapabilityKey,
        _monitor: Option<DownloadMonitor>,
    ) -> Result<Self::Session, RuntimeError> {
        self.client.ensure_ready().await?;
        Ok(Box::new(OpenAiPromptSession {
            client: Arc::clone(&self.client),
        }))
    }
}

struct OpenAiPromptSession {
    client: Arc<OpenAiClient>,
}

#[async_trait]
impl PromptSession for OpenAiPromptSession {
    async fn prompt(&self, messages: &[PromptMessage]) -> Result<String, RuntimeError> {
        let messages = messages.iter().map(to_chat_message).collect();
        self.client.complete(messages).await
    }
}

fn to_chat_message(message: &PromptMessage) -> ChatMessage {
    let role = match message.role {
        PromptRole::System => "system",
        PromptRole::User => "user",
    };
    let content = match message.content.as_slice() {
        [PromptContent::Text(text)] => MessageContent::Text(text.clone()),
        parts => MessageContent::Parts(
            parts
                .iter()
                .map(|part| match part {
                    PromptContent::Text(text) => ContentPart::Text { text: text.clone() },
                    PromptContent::Image(image) => ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_url(),
                        },
                    },
                })
                .collect(),
        ),
    };
    ChatMessage { role, content }
}

// =============================================================================
// Writer
// =============================================================================

pub struct OpenAiWriterProvider {
    client: Arc<OpenAiClient>,
    options: WriterOptions,
}

impl OpenAiWriterProvider {
    pub const fn new(client: Arc<OpenAiClient>, options: WriterOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl CapabilityProvider for OpenAiWriterProvider {
    type Session = Box<dyn WriterSession>;

    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Writer
    }

    fn is_present(&self) -> bool {
        true
    }

    async fn availability(&self, key: &CapabilityKey) -> Result<String, RuntimeError> {
        availability(&self.client, key).await
    }

    async fn create(
        &self,
        _key: &CapabilityKey,
        _monitor: Option<DownloadMonitor>,
    ) -> Result<Self::Session, RuntimeError> {
        self.client.ensure_ready().await?;
        Ok(Box::new(OpenAiWriterSession {
            client: Arc::clone(&self.client),
            options: self.options,
        }))
    }
}

struct OpenAiWriterSession {
    client: Arc<OpenAiClient>,
    options: WriterOptions,
}

#[async_trait]
impl WriterSession for OpenAiWriterSession {
    fn chunk_mode(&self) -> ChunkMode {
        ChunkMode::Delta
    }

    async fn write_streaming(&self, prompt: &str, context: &str) -> Result<TextStream, RuntimeError> {
        let messages = vec![
            ChatMessage::system(writer_instructions(self.options, context)),
            ChatMessage::user(prompt),
        ];
        self.client.complete_streaming(messages).await
    }
}

fn writer_instructions(options: WriterOptions, context: &str) -> String {
    let tone = match options.tone {
        WriterTone::Formal => "formal",
        WriterTone::Neutral => "friendly but neutral",
        WriterTone::Casual => "casual",
    };
    let length = match options.length {
        WriterLength::Short => "short",
        WriterLength::Medium => "medium-length",
        WriterLength::Long => "long",
    };
    let format = match options.format {
        WriterFormat::PlainText => "plain text without any markup",
        WriterFormat::Markdown => "Markdown",
    };

    let mut instructions = format!(
        "You are a copywriter. Write {length} text in a {tone} tone, formatted as {format}. \
Reply with the text only."
    );
    if !context.is_empty() {
        instructions.push_str("\n\nContext:\n");
        instructions.push_str(context);
    }
    instructions
}

// =============================================================================
// Proofreader
// =============================================================================

pub struct OpenAiProofreaderProvider {
    client: Arc<OpenAiClient>,
    languages: Vec<LanguageTag>,
}

impl OpenAiProofreaderProvider {
    pub const fn new(client: Arc<OpenAiClient>, languages: Vec<LanguageTag>) -> Self {
        Self { client, languages }
    }
}

#[async_trait]
impl CapabilityProvider for OpenAiProofreaderProvider {
    type Session = Box<dyn ProofreaderSession>;

    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Proofreader
    }

    fn is_present(&self) -> bool {
        true
    }

    async fn availability(&self, key: &CapabilityKey) -> Result<String, RuntimeError> {
        availability(&self.client, key).await
    }

    async fn create(
        &self,
        _key: &CapabilityKey,
        _monitor: Option<DownloadMonitor>,
    ) -> Result<Self::Session, RuntimeError> {
        self.client.ensure_ready().await?;
        let languages: Vec<&str> = self.languages.iter().map(LanguageTag::as_str).collect();
        Ok(Box::new(OpenAiProofreaderSession {
            client: Arc::clone(&self.client),
            instructions: format!(
                "You are a proofreader for text written in: {}. Fix spelling, grammar and \
punctuation only; keep wording and meaning. Reply with the corrected text only.",
                languages.join(", ")
            ),
        }))
    }
}

struct OpenAiProofreaderSession {
    client: Arc<OpenAiClient>,
    instructions: String,
}

#[async_trait]
impl ProofreaderSession for OpenAiProofreaderSession {
    async fn proofread(&self, text: &str) -> Result<ProofreadResult, RuntimeError> {
        let corrected = self
            .client
            .complete(vec![
                ChatMessage::system(self.instructions.clone()),
                ChatMessage::user(text),
            ])
            .await?;
        Ok(proofread_result(text, corrected.trim()))
    }
}

// The backend returns whole text, not spans, so corrections stay empty.
fn proofread_result(input: &str, corrected: &str) -> ProofreadResult {
    ProofreadResult {
        corrected_input: (!corrected.is_empty() && corrected != input)
            .then(|| corrected.to_string()),
        corrections: Vec::new(),
    }
}

// =============================================================================
// Translator
// =============================================================================

pub struct OpenAiTranslatorProvider {
    client: Arc<OpenAiClient>,
}

impl OpenAiTranslatorProvider {
    pub const fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CapabilityProvider for OpenAiTranslatorProvider {
    type Session = Box<dyn TranslatorSession>;

    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Translator
    }

    fn is_present(&self) -> bool {
        true
    }

    async fn availability(&self, key: &CapabilityKey) -> Result<String, RuntimeError> {
        availability(&self.client, key).await
    }

    async fn create(
        &self,
        key: &CapabilityKey,
        _monitor: Option<DownloadMonitor>,
    ) -> Result<Self::Session, RuntimeError> {
        let pair = key.language_pair().cloned().ok_or_else(|| {
            RuntimeError::SessionCreation(format!("{key} has no language pair"))
        })?;
        self.client.ensure_ready().await?;
        Ok(Box::new(OpenAiTranslatorSession {
            client: Arc::clone(&self.client),
            pair,
        }))
    }
}

struct OpenAiTranslatorSession {
    client: Arc<OpenAiClient>,
    pair: LanguagePair,
}

#[async_trait]
impl TranslatorSession for OpenAiTranslatorSession {
    async fn translate(&self, text: &str) -> Result<String, RuntimeError> {
        let instructions = format!(
            "Translate the user's text from language '{}' to language '{}'. \
Reply with the translation only.",
            self.pair.source, self.pair.target
        );
        let translated = self
            .client
            .complete(vec![ChatMessage::system(instructions), ChatMessage::user(text)])
            .await?;
        Ok(translated.trim().to_string())
    }
}
