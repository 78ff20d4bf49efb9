//! Pet image analysis and classification output validation.
//!
//! The classifier is a free-form language model that is asked for minified
//! JSON but routinely wraps it in prose or code fences, invents values, or
//! answers in plain text. [`parse_classification`] turns whatever came back
//! into a [`PetImageAnalysis`] without ever failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::pet::PetAge;

/// Animal detected in a pet photo. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    Cat,
    Dog,
    #[default]
    Unknown,
}

impl Animal {
    /// Strict parse: only the exact strings `cat` and `dog` are recognized.
    #[must_use]
    pub fn from_model_value(value: &str) -> Self {
        match value {
            "cat" => Self::Cat,
            "dog" => Self::Dog,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Animal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of classifying a pet photo.
///
/// `raw_text` always holds the model's full response so a bad answer can be
/// diagnosed after the fact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetImageAnalysis {
    pub animal: Animal,
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<PetAge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Model self-reported confidence in `0.0..=1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub raw_text: String,
}

impl PetImageAnalysis {
    /// The fallback result: unknown animal, empty breed, raw text kept.
    pub fn unknown(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }
}

/// Parse a classifier response into a [`PetImageAnalysis`].
///
/// The JSON payload is taken to span from the first `{` to the last `}` so
/// that prose preambles and code fences are tolerated. When no such span
/// exists or it does not parse as a JSON object, the [`PetImageAnalysis::unknown`]
/// fallback is returned. Otherwise every field is coerced on its own, so one
/// bad field never discards the others.
pub fn parse_classification(raw_text: &str) -> PetImageAnalysis {
    let Some(payload) = json_object_span(raw_text) else {
        debug!(raw_len = raw_text.len(), "Classifier response has no JSON object");
        return PetImageAnalysis::unknown(raw_text);
    };

    let fields = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            debug!("Classifier JSON payload is not an object");
            return PetImageAnalysis::unknown(raw_text);
        }
        Err(e) => {
            debug!(error = %e, "Classifier JSON payload failed to parse");
            return PetImageAnalysis::unknown(raw_text);
        }
    };

    PetImageAnalysis {
        animal: fields
            .get("animal")
            .and_then(Value::as_str)
            .map_or(Animal::Unknown, Animal::from_model_value),
        breed: string_field(&fields, "breed").unwrap_or_default(),
        gender: string_field(&fields, "gender"),
        age: fields.get("age").and_then(coerce_age),
        name: string_field(&fields, "name"),
        description: string_field(&fields, "description"),
        confidence: fields
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| (0.0..=1.0).contains(c)),
        raw_text: raw_text.to_string(),
    }
}

fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Accepts `{"years": n, "months": m}` or a bare number of (possibly
/// fractional) years.
fn coerce_age(value: &Value) -> Option<PetAge> {
    match value {
        Value::Object(parts) => {
            let years = parts.get("years").and_then(whole_number)?;
            let months = match parts.get("months") {
                None | Some(Value::Null) => 0,
                Some(m) => whole_number(m).filter(|m| *m < 12)?,
            };
            Some(PetAge::new(years, months))
        }
        Value::Number(n) => n
            .as_f64()
            .filter(|years| years.is_finite() && *years >= 0.0)
            .map(PetAge::from_fractional_years),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: &Value) -> Option<u32> {
    let n = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    })?;
    u32::try_from(n).ok()
}
