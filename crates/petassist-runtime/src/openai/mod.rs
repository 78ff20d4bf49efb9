//! OpenAI-compatible backend adapter.
//!
//! Serves all four capabilities from a local chat backend such as
//! llama-server. Multimodal models handle photo classification; any chat
//! model handles the text capabilities.

mod adapters;
mod client;
mod models;
mod sse;

use std::sync::Arc;

use petassist_core::{AssistSettings, RuntimeError};

use crate::services::Providers;

pub use adapters::{
    OpenAiPromptProvider, OpenAiProofreaderProvider, OpenAiTranslatorProvider,
    OpenAiWriterProvider,
};
pub use client::{AVAILABLE, OpenAiClient, UNAVAILABLE};

/// Build all four providers over one shared client.
pub fn providers(settings: &AssistSettings) -> Result<Providers, RuntimeError> {
    let client = Arc::new(OpenAiClient::from_settings(settings)?);
    Ok(Providers {
        classifier: Arc::new(OpenAiPromptProvider::new(Arc::clone(&client))),
        writer: Arc::new(OpenAiWriterProvider::new(
            Arc::clone(&client),
            settings.effective_writer_options(),
        )),
        proofreader: Arc::new(OpenAiProofreaderProvider::new(
            Arc::clone(&client),
            settings.effective_proofreader_languages(),
        )),
        translator: Arc::new(OpenAiTranslatorProvider::new(client)),
    })
}
