//! Domain types for the assistant layer.
//!
//! Pure types with no infrastructure dependencies.

pub mod analysis;
pub mod availability;
pub mod capability;
pub mod image;
pub mod pet;

pub use analysis::{Animal, PetImageAnalysis, parse_classification};
pub use availability::{AvailabilityState, ProvisioningEvent};
pub use capability::{CapabilityKey, CapabilityKind, LanguagePair, LanguageTag, LanguageTagError};
pub use image::{ImageInput, ImageInputError, media_type_for_extension};
pub use pet::{Gender, PetAge, PetDraft};
