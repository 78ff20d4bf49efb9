//! Capability identity.
//!
//! A capability is named by [`CapabilityKind`]. Its cache identity is a
//! [`CapabilityKey`], which for the translator also carries the language
//! pair: `en->es` and `en->fr` are separate logical capabilities with
//! separate sessions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four on-device AI capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    /// Image classification through a multimodal prompt.
    ImageClassifier,
    /// Streaming text rewriting.
    Writer,
    /// Grammar and spelling correction.
    Proofreader,
    /// Text translation between a language pair.
    Translator,
}

impl CapabilityKind {
    /// Every capability, in display order.
    pub const ALL: [Self; 4] = [
        Self::ImageClassifier,
        Self::Writer,
        Self::Proofreader,
        Self::Translator,
    ];

    /// Stable machine name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImageClassifier => "image-classifier",
            Self::Writer => "writer",
            Self::Proofreader => "proofreader",
            Self::Translator => "translator",
        }
    }

    /// Human-readable label for UI messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ImageClassifier => "Pet photo autofill",
            Self::Writer => "Description writer",
            Self::Proofreader => "Proofreader",
            Self::Translator => "Translator",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced when parsing a language tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LanguageTagError {
    #[error("Language tag cannot be empty")]
    Empty,

    #[error("Invalid language tag: {0}")]
    Invalid(String),
}

/// A BCP 47 style language tag (`en`, `es`, `pt-br`), stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and normalize a language tag.
    ///
    /// The primary subtag must be 2-3 ASCII letters; further subtags are
    /// 1-8 ASCII alphanumerics separated by `-`.
    pub fn parse(raw: &str) -> Result<Self, LanguageTagError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LanguageTagError::Empty);
        }

        let mut subtags = trimmed.split('-');
        let primary_ok = subtags
            .next()
            .is_some_and(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()));
        let rest_ok =
            subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));

        if !primary_ok || !rest_ok {
            return Err(LanguageTagError::Invalid(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The `en` tag.
    #[must_use]
    pub fn english() -> Self {
        Self("en".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageTag {
    type Err = LanguageTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = LanguageTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source and target language for a translator instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePair {
    pub source: LanguageTag,
    pub target: LanguageTag,
}

impl LanguagePair {
    #[must_use]
    pub const fn new(source: LanguageTag, target: LanguageTag) -> Self {
        Self { source, target }
    }

    /// True when translating would be a no-op.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Cache identity of a capability instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "capability", rename_all = "kebab-case")]
pub enum CapabilityKey {
    ImageClassifier,
    Writer,
    Proofreader,
    Translator(LanguagePair),
}

impl CapabilityKey {
    /// Key for a translator between two languages.
    #[must_use]
    pub const fn translator(source: LanguageTag, target: LanguageTag) -> Self {
        Self::Translator(LanguagePair::new(source, target))
    }

    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        match self {
            Self::ImageClassifier => CapabilityKind::ImageClassifier,
            Self::Writer => CapabilityKind::Writer,
            Self::Proofreader => CapabilityKind::Proofreader,
            Self::Translator(_) => CapabilityKind::Translator,
        }
    }

    #[must_use]
    pub const fn language_pair(&self) -> Option<&LanguagePair> {
        match self {
            Self::Translator(pair) => Some(pair),
            _ => None,
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translator(pair) => write!(f, "translator({pair})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}
