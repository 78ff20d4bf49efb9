//! Improve command handler.

use anyhow::Result;
use petassist_runtime::ImproveRequest;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::ProvisioningProgress;
use crate::utils::input::text_or_stdin;

pub async fn execute(ctx: &CliContext, text: Option<String>, context: Option<String>) -> Result<()> {
    let request = ImproveRequest {
        current: text_or_stdin(text)?,
        context,
    };

    let progress = ProvisioningProgress::new("Description writer");
    let result = ctx.core().writer().improve(request, Some(progress.sink())).await;
    progress.abandon();

    println!("{}", result.map_err(CliError::from)?);
    Ok(())
}
