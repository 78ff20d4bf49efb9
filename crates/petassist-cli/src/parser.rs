//! Main CLI parser and top-level argument handling.
//!
//! Backend options are global and can also come from `PETASSIST_*`
//! environment variables (or a `.env` file).

use clap::{Args, Parser};
use petassist_core::{WriterFormat, WriterLength, WriterTone};
use serde::de::DeserializeOwned;

use crate::commands::Commands;

/// Command-line interface for the pet listing assistant.
#[derive(Parser)]
#[command(name = "petassist")]
#[command(about = "AI assistance for pet adoption listings")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Backend and capability settings.
#[derive(Debug, Clone, Default, Args)]
pub struct BackendArgs {
    /// Base URL of the OpenAI-compatible backend
    #[arg(long = "backend-url", env = "PETASSIST_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Model name to request
    #[arg(long = "model", env = "PETASSIST_MODEL", global = true)]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", env = "PETASSIST_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Writer tone (formal, neutral, casual)
    #[arg(long = "tone", env = "PETASSIST_WRITER_TONE", global = true, value_parser = parse_kebab::<WriterTone>)]
    pub tone: Option<WriterTone>,

    /// Writer length (short, medium, long)
    #[arg(long = "length", env = "PETASSIST_WRITER_LENGTH", global = true, value_parser = parse_kebab::<WriterLength>)]
    pub length: Option<WriterLength>,

    /// Writer output format (plain-text, markdown)
    #[arg(long = "format", env = "PETASSIST_WRITER_FORMAT", global = true, value_parser = parse_kebab::<WriterFormat>)]
    pub format: Option<WriterFormat>,

    /// Languages the proofreader should expect, comma separated
    #[arg(long = "proofread-lang", env = "PETASSIST_PROOFREAD_LANGS", global = true, value_delimiter = ',')]
    pub proofread_languages: Vec<String>,

    /// Language listings are written in
    #[arg(long = "source-lang", env = "PETASSIST_SOURCE_LANG", global = true)]
    pub source_language: Option<String>,
}

/// Parse a kebab-case option value through its serde representation.
fn parse_kebab<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unrecognized value '{raw}'"))
}
