//! Core domain types and port definitions for petassist.
//!
//! This crate is pure: it defines what a capability runtime must provide
//! ([`ports`]), the values that flow through the assistant layer
//! ([`domain`]), the failure taxonomy facades return ([`failure`]) and the
//! assistant settings ([`settings`]). Orchestration and adapters live in
//! `petassist-runtime`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod failure;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Animal, AvailabilityState, CapabilityKey, CapabilityKind, Gender, ImageInput,
    ImageInputError, LanguagePair, LanguageTag, LanguageTagError, PetAge, PetDraft,
    PetImageAnalysis, ProvisioningEvent, media_type_for_extension, parse_classification,
};
pub use failure::AssistFailure;
pub use ports::{
    CapabilityProvider, ChunkMode, Correction, DownloadMonitor, NoopProgress, ProgressSink,
    PromptContent, PromptMessage, PromptRole, PromptSession, ProofreadResult,
    ProofreaderSession, RuntimeError, TextStream, TranslatorSession, WriterSession,
};
#[cfg(any(test, feature = "test-utils"))]
pub use ports::{
    MockPromptSession, MockProofreaderSession, MockTranslatorSession, MockWriterSession,
};
pub use settings::{
    AssistSettings, DEFAULT_BACKEND_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SOURCE_LANGUAGE, SettingsError, WriterFormat, WriterLength, WriterOptions,
    WriterTone, validate_settings,
};

// Silence unused dev-dependency warnings for crates only used by integration tests
#[cfg(test)]
use tokio as _;
