//! Pet listing fields the assistant can fill in.
//!
//! The listing itself is owned by the CRUD backend; this is the client-side
//! draft that AI-derived values are merged into before the create/update
//! request is sent.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::analysis::{Animal, PetImageAnalysis};

/// Age of a pet in whole years and months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PetAge {
    pub years: u32,
    pub months: u32,
}

impl PetAge {
    #[must_use]
    pub const fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// Convert fractional years, rounding the remainder to the nearest month.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_fractional_years(years: f64) -> Self {
        let whole = years.trunc().clamp(0.0, f64::from(u32::MAX)) as u32;
        let months = ((years - years.trunc()) * 12.0).round() as u32;
        if months >= 12 {
            Self::new(whole.saturating_add(1), 0)
        } else {
            Self::new(whole, months)
        }
    }
}

impl fmt::Display for PetAge {
    /// `"2 years 1 month"`; a zero age renders as `"0 months"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(2);
        if self.years > 0 {
            let unit = if self.years == 1 { "year" } else { "years" };
            parts.push(format!("{} {unit}", self.years));
        }
        if self.months > 0 {
            let unit = if self.months == 1 { "month" } else { "months" };
            parts.push(format!("{} {unit}", self.months));
        }
        if parts.is_empty() {
            f.write_str("0 months")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Lenient parse of a model-provided gender string.
    #[must_use]
    pub fn from_model_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "boy" => Some(Self::Male),
            "female" | "f" | "girl" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Draft of a pet listing before it is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDraft {
    pub name: String,
    /// Only ever `Cat` or `Dog` once set.
    pub animal_type: Option<Animal>,
    pub breed: String,
    pub gender: Option<Gender>,
    pub age: Option<PetAge>,
    pub location: String,
    pub adoption_date: String,
    pub image_url: String,
    pub description: String,
}

impl PetDraft {
    /// Fill empty fields from an image analysis, leaving user input intact.
    ///
    /// Returns the names of the fields that were filled.
    pub fn apply_analysis(&mut self, analysis: &PetImageAnalysis) -> Vec<&'static str> {
        let mut filled = Vec::new();

        if self.animal_type.is_none() && analysis.animal.is_known() {
            self.animal_type = Some(analysis.animal);
            filled.push("animalType");
        }
        if self.breed.trim().is_empty() && !analysis.breed.trim().is_empty() {
            self.breed = analysis.breed.trim().to_string();
            filled.push("breed");
        }
        if self.gender.is_none() {
            if let Some(gender) = analysis.gender.as_deref().and_then(Gender::from_model_value) {
                self.gender = Some(gender);
                filled.push("gender");
            }
        }
        if self.age.is_none() {
            if let Some(age) = analysis.age {
                self.age = Some(age);
                filled.push("age");
            }
        }
        if let Some(name) = non_blank(analysis.name.as_deref()) {
            if self.name.trim().is_empty() {
                self.name = name.to_string();
                filled.push("name");
            }
        }
        if let Some(description) = non_blank(analysis.description.as_deref()) {
            if self.description.trim().is_empty() {
                self.description = description.to_string();
                filled.push("description");
            }
        }

        filled
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
