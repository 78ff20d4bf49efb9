//! Proofreading.

use petassist_core::RuntimeError;
use tracing::debug;

use super::ProofreaderSessionHandle;

/// Return the corrected text, or `text` itself when nothing was corrected.
///
/// Blank input is returned unchanged without touching the session.
pub async fn correct(session: &ProofreaderSessionHandle, text: &str) -> Result<String, RuntimeError> {
    if text.trim().is_empty() {
        return Ok(text.to_string());
    }

    let result = {
        let session = session.lock().await;
        session.proofread(text.trim()).await?
    };
    debug!(corrections = result.corrections.len(), "Proofread finished");

    Ok(result
        .corrected_input
        .filter(|corrected| !corrected.trim().is_empty())
        .unwrap_or_else(|| text.to_string()))
}
