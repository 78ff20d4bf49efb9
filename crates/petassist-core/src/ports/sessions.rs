//! Session ports, one per capability.
//!
//! A session is the warm, provisioned handle a provider returns. Sessions
//! are not safe for concurrent use; the orchestration layer guarantees a
//! single in-flight call per session.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::RuntimeError;
use crate::domain::ImageInput;

// =============================================================================
// Prompt (multimodal language model)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

/// One content part of a prompt message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptContent {
    Text(String),
    Image(ImageInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: Vec<PromptContent>,
}

impl PromptMessage {
    /// A user message carrying text followed by an image.
    #[must_use]
    pub fn user_with_image(text: impl Into<String>, image: ImageInput) -> Self {
        Self {
            role: PromptRole::User,
            content: vec![PromptContent::Text(text.into()), PromptContent::Image(image)],
        }
    }
}

/// Session of a language model accepting image-bearing prompts.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PromptSession: Send + Sync {
    /// Submit messages and return the full textual response.
    async fn prompt(&self, messages: &[PromptMessage]) -> Result<String, RuntimeError>;
}

// =============================================================================
// Writer
// =============================================================================

/// How streamed writer chunks relate to the full response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkMode {
    /// Each chunk is new text to append.
    Delta,
    /// Each chunk is the whole response so far.
    Cumulative,
}

/// Stream of writer chunks.
pub type TextStream = BoxStream<'static, Result<String, RuntimeError>>;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait WriterSession: Send + Sync {
    /// Chunk semantics of [`WriterSession::write_streaming`].
    fn chunk_mode(&self) -> ChunkMode;

    /// Start a streaming write for `prompt` with shared `context`.
    async fn write_streaming(&self, prompt: &str, context: &str)
    -> Result<TextStream, RuntimeError>;
}

// =============================================================================
// Proofreader
// =============================================================================

/// A single correction span in the proofread input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub start_index: usize,
    pub end_index: usize,
    pub correction: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofreadResult {
    /// The fully corrected text; `None` when nothing needed correcting.
    pub corrected_input: Option<String>,
    #[serde(default)]
    pub corrections: Vec<Correction>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ProofreaderSession: Send + Sync {
    async fn proofread(&self, text: &str) -> Result<ProofreadResult, RuntimeError>;
}

// =============================================================================
// Translator
// =============================================================================

/// Session bound to one language pair.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TranslatorSession: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, RuntimeError>;
}
