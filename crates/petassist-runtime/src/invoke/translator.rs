//! Translation of listing text.

use petassist_core::RuntimeError;

use super::TranslatorSessionHandle;

/// Translate `text` with a session bound to one language pair.
///
/// Blank input is returned unchanged without touching the session.
pub async fn translate(session: &TranslatorSessionHandle, text: &str) -> Result<String, RuntimeError> {
    if text.trim().is_empty() {
        return Ok(text.to_string());
    }

    let session = session.lock().await;
    session.translate(text.trim()).await
}
