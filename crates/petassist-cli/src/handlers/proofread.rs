//! Proofread command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::ProvisioningProgress;
use crate::utils::input::text_or_stdin;

pub async fn execute(ctx: &CliContext, text: Option<String>) -> Result<()> {
    let text = text_or_stdin(text)?;

    let progress = ProvisioningProgress::new("Proofreader");
    let result = ctx.core().proofreader().correct(&text, Some(progress.sink())).await;
    progress.abandon();

    println!("{}", result.map_err(CliError::from)?);
    Ok(())
}
