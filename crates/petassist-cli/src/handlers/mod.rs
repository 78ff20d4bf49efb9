//! Command handlers that delegate to `AssistCore`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call a facade
//!   3. Format output for the terminal

pub mod classify;
pub mod improve;
pub mod proofread;
pub mod status;
pub mod translate;
