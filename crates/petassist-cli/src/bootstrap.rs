//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: settings are resolved, the OpenAI-compatible
//! providers are built, and the resulting `AssistCore` is handed to
//! command handlers.

use petassist_core::{AssistSettings, LanguageTag, WriterOptions, validate_settings};
use petassist_runtime::{AssistCore, openai};
use tracing::debug;

use crate::error::CliError;
use crate::parser::BackendArgs;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub settings: AssistSettings,
}

impl CliConfig {
    /// Defaults overlaid with whatever was given on the command line or
    /// in the environment.
    pub fn from_args(args: &BackendArgs) -> Result<Self, CliError> {
        let mut settings = AssistSettings::with_defaults();

        if let Some(url) = &args.backend_url {
            settings.backend_url = Some(url.clone());
        }
        if let Some(model) = &args.model {
            settings.model = Some(model.clone());
        }
        if let Some(timeout) = args.timeout_secs {
            settings.request_timeout_secs = Some(timeout);
        }

        let base = settings.effective_writer_options();
        settings.writer = Some(WriterOptions {
            tone: args.tone.unwrap_or(base.tone),
            format: args.format.unwrap_or(base.format),
            length: args.length.unwrap_or(base.length),
        });

        if !args.proofread_languages.is_empty() {
            settings.proofreader_languages = Some(args.proofread_languages.clone());
        }
        if let Some(lang) = &args.source_language {
            settings.default_source_language = Some(lang.clone());
        }

        validate_settings(&settings)?;
        Ok(Self { settings })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub core: AssistCore,
    pub settings: AssistSettings,
}

impl CliContext {
    pub const fn core(&self) -> &AssistCore {
        &self.core
    }

    pub fn source_language(&self) -> LanguageTag {
        self.settings.effective_source_language()
    }
}

/// Wire the OpenAI-compatible providers into an [`AssistCore`].
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let providers =
        openai::providers(&config.settings).map_err(|e| CliError::Config(e.to_string()))?;
    debug!(
        backend_url = config.settings.effective_backend_url(),
        model = config.settings.effective_model(),
        "Assistant backend configured"
    );

    Ok(CliContext {
        core: AssistCore::new(providers),
        settings: config.settings,
    })
}
