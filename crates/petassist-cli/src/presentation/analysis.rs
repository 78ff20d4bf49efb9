//! Text rendering of analyses and capability status.

use std::fmt::Write as _;

use petassist_core::{AvailabilityState, CapabilityKey, PetDraft, PetImageAnalysis};

/// Human-readable summary of a classification and the draft fields it fills.
pub fn format_analysis(analysis: &PetImageAnalysis, draft: &PetDraft, filled: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Animal:      {}", analysis.animal.as_str());
    let _ = writeln!(out, "Breed:       {}", or_dash(&draft.breed));
    let _ = writeln!(
        out,
        "Gender:      {}",
        analysis.gender.as_deref().map_or("-", str::trim)
    );
    let _ = writeln!(
        out,
        "Age:         {}",
        draft.age.map_or_else(|| "-".to_string(), |age| age.to_string())
    );
    let _ = writeln!(out, "Name:        {}", or_dash(&draft.name));
    if let Some(confidence) = analysis.confidence {
        let _ = writeln!(out, "Confidence:  {:.0}%", confidence * 100.0);
    }
    if !draft.description.is_empty() {
        let _ = writeln!(out, "Description: {}", draft.description);
    }
    if filled.is_empty() {
        out.push_str("\nNothing could be suggested from this photo.\n");
    } else {
        let _ = writeln!(out, "\nSuggested fields: {}", filled.join(", "));
    }
    out
}

/// One line of `petassist status`.
pub fn format_status_row(key: &CapabilityKey, state: AvailabilityState, offered: bool) -> String {
    let label = key.kind().label();
    let marker = if offered { "✓" } else { "✗" };
    format!("{marker} {label:<20} {:<22} {state}", key.to_string())
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
