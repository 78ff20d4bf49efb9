//! Classify command handler.

use anyhow::Result;
use petassist_core::PetDraft;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{ProvisioningProgress, format_analysis};
use crate::utils::input::load_image;

/// Classify a pet photo and show the listing fields it would fill.
pub async fn execute(ctx: &CliContext, image: &str, json: bool) -> Result<()> {
    let image = load_image(image)?;

    let progress = ProvisioningProgress::new("Pet photo autofill");
    let result = ctx.core().classifier().analyze(image, Some(progress.sink())).await;
    progress.abandon();
    let analysis = result.map_err(CliError::from)?;
    debug!(raw_text = %analysis.raw_text, "Classifier raw output");

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let mut draft = PetDraft::default();
    let filled = draft.apply_analysis(&analysis);
    print!("{}", format_analysis(&analysis, &draft, &filled));
    Ok(())
}
