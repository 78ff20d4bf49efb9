//! Status command handler.

use anyhow::Result;
use petassist_core::{CapabilityKey, LanguageTag};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_status_row;

/// Probe every capability (and each requested translation target) without
/// provisioning anything.
pub async fn execute(ctx: &CliContext, targets: &[String]) -> Result<()> {
    let source = ctx.source_language();
    let mut keys = vec![
        CapabilityKey::ImageClassifier,
        CapabilityKey::Writer,
        CapabilityKey::Proofreader,
    ];
    for raw in targets {
        let target = LanguageTag::parse(raw).map_err(CliError::from)?;
        if target != source {
            keys.push(CapabilityKey::translator(source.clone(), target));
        }
    }

    println!("Backend: {} (model {})", ctx.settings.effective_backend_url(), ctx.settings.effective_model());
    println!();
    for key in &keys {
        let state = ctx.core().refresh(key).await;
        println!("{}", format_status_row(key, state, ctx.core().is_offered(key)));
    }
    Ok(())
}
