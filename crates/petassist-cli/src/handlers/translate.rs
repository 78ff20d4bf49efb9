//! Translate command handler.

use anyhow::Result;
use petassist_core::LanguageTag;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::ProvisioningProgress;
use crate::utils::input::text_or_stdin;

pub async fn execute(
    ctx: &CliContext,
    text: Option<String>,
    to: &str,
    from: Option<&str>,
) -> Result<()> {
    let target = LanguageTag::parse(to).map_err(CliError::from)?;
    let source = match from {
        Some(raw) => LanguageTag::parse(raw).map_err(CliError::from)?,
        None => ctx.source_language(),
    };
    let text = text_or_stdin(text)?;

    let progress = ProvisioningProgress::new(format!("Translator ({source} -> {target})"));
    let result = ctx
        .core()
        .translator()
        .translate(&text, &source, &target, Some(progress.sink()))
        .await;
    progress.abandon();

    println!("{}", result.map_err(CliError::from)?);
    Ok(())
}
