//! Assistant settings and validation.
//!
//! Pure configuration types; loading from the environment happens in the
//! CLI adapter.

use serde::{Deserialize, Serialize};

use crate::domain::{LanguageTag, LanguageTagError};

/// Default base URL of the OpenAI-compatible backend.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";

/// Default model name sent to the backend.
pub const DEFAULT_MODEL: &str = "default";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Listings are written in English first.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriterTone {
    Formal,
    #[default]
    Neutral,
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriterFormat {
    #[default]
    PlainText,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriterLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Options a writer session is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub tone: WriterTone,
    pub format: WriterFormat,
    pub length: WriterLength,
}

/// Assistant settings.
///
/// All fields are optional to support partial configuration and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssistSettings {
    /// Base URL of the OpenAI-compatible backend.
    pub backend_url: Option<String>,

    /// Model name requested from the backend.
    pub model: Option<String>,

    /// Per-request timeout in seconds (1-600).
    pub request_timeout_secs: Option<u64>,

    /// Writer session options.
    pub writer: Option<WriterOptions>,

    /// Languages the proofreader should expect.
    pub proofreader_languages: Option<Vec<String>>,

    /// Language listings are authored in.
    pub default_source_language: Option<String>,
}

impl AssistSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            backend_url: Some(DEFAULT_BACKEND_URL.to_string()),
            model: Some(DEFAULT_MODEL.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            writer: Some(WriterOptions::default()),
            proofreader_languages: Some(vec![DEFAULT_SOURCE_LANGUAGE.to_string()]),
            default_source_language: Some(DEFAULT_SOURCE_LANGUAGE.to_string()),
        }
    }

    #[must_use]
    pub fn effective_backend_url(&self) -> &str {
        self.backend_url
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
    }

    #[must_use]
    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    #[must_use]
    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    #[must_use]
    pub fn effective_writer_options(&self) -> WriterOptions {
        self.writer.unwrap_or_default()
    }

    /// Proofreader languages; invalid tags are skipped, empty means English.
    #[must_use]
    pub fn effective_proofreader_languages(&self) -> Vec<LanguageTag> {
        let parsed: Vec<LanguageTag> = self
            .proofreader_languages
            .iter()
            .flatten()
            .filter_map(|raw| LanguageTag::parse(raw).ok())
            .collect();
        if parsed.is_empty() {
            vec![default_source_tag()]
        } else {
            parsed
        }
    }

    #[must_use]
    pub fn effective_source_language(&self) -> LanguageTag {
        self.default_source_language
            .as_deref()
            .and_then(|raw| LanguageTag::parse(raw).ok())
            .unwrap_or_else(default_source_tag)
    }
}

fn default_source_tag() -> LanguageTag {
    LanguageTag::english()
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Backend URL must start with http:// or https://, got {0}")]
    InvalidBackendUrl(String),

    #[error("Model name cannot be empty")]
    EmptyModel,

    #[error("Request timeout must be between 1 and 600 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Invalid language in settings: {0}")]
    InvalidLanguage(#[from] LanguageTagError),
}

/// Validate settings values.
pub fn validate_settings(settings: &AssistSettings) -> Result<(), SettingsError> {
    // Validate backend URL
    if let Some(url) = &settings.backend_url {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SettingsError::InvalidBackendUrl(url.to_string()));
        }
    }

    // Validate model name
    if settings
        .model
        .as_ref()
        .is_some_and(|m| m.trim().is_empty())
    {
        return Err(SettingsError::EmptyModel);
    }

    // Validate request timeout
    if let Some(timeout) = settings.request_timeout_secs {
        if !(1..=600).contains(&timeout) {
            return Err(SettingsError::InvalidTimeout(timeout));
        }
    }

    // Validate languages
    for raw in settings.proofreader_languages.iter().flatten() {
        LanguageTag::parse(raw)?;
    }
    if let Some(raw) = &settings.default_source_language {
        LanguageTag::parse(raw)?;
    }

    Ok(())
}
