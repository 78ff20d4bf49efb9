//! Shared CLI presentation utilities.
//!
//! Format-only: no domain transforms.

pub mod analysis;
pub mod progress;

pub use analysis::{format_analysis, format_status_row};
pub use progress::ProvisioningProgress;
