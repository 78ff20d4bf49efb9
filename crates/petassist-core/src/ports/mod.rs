//! Port definitions (trait abstractions) for AI capability runtimes.
//!
//! Ports define the interfaces that the orchestration layer expects from a
//! capability runtime. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - One [`CapabilityProvider`] per capability: presence, availability, create
//! - One session trait per capability for invocation
//! - No HTTP or browser types in any signature

pub mod progress;
pub mod provider;
pub mod sessions;

use thiserror::Error;

use crate::domain::CapabilityKind;

pub use progress::{NoopProgress, ProgressSink};
pub use provider::{CapabilityProvider, DownloadMonitor};
pub use sessions::{
    ChunkMode, Correction, PromptContent, PromptMessage, PromptRole, PromptSession,
    ProofreadResult, ProofreaderSession, TextStream, TranslatorSession, WriterSession,
};

#[cfg(any(test, feature = "test-utils"))]
pub use sessions::{
    MockPromptSession, MockProofreaderSession, MockTranslatorSession, MockWriterSession,
};

/// Errors raised by a capability runtime.
///
/// Runtimes report what went wrong; the facades decide which failure kind
/// the UI sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// The runtime has no entry point for this capability.
    #[error("{0} is not present in this runtime")]
    NotPresent(CapabilityKind),

    /// Downloading model assets failed.
    #[error("Model download failed: {0}")]
    Download(String),

    /// The session could not be created.
    #[error("Session creation failed: {0}")]
    SessionCreation(String),

    /// The model failed while serving a request.
    #[error("Invocation failed: {0}")]
    Invocation(String),

    /// The runtime could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The runtime answered with something unusable.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
