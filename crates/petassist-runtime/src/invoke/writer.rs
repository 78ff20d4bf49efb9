//! Listing description improvement.

use futures_util::StreamExt;
use petassist_core::{ChunkMode, RuntimeError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::WriterSessionHandle;

/// Text to improve plus optional shared context (name, breed, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImproveRequest {
    pub current: String,
    #[serde(default)]
    pub context: Option<String>,
}

impl ImproveRequest {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether there is nothing to improve.
    pub fn is_blank(&self) -> bool {
        self.current.trim().is_empty()
    }
}

/// Rewrite instruction wrapping the current description.
pub fn build_prompt(current: &str) -> String {
    format!(
        "Rewrite and elevate this pet adoption description. Keep it warm, vivid, and persuasive, \
suitable for a pet shelter listing. 2-4 sentences. Avoid making up facts; do not contradict \
provided details.\n\nDescription to improve:\n{}",
        current.trim()
    )
}

/// Stream an improved description and return it trimmed.
///
/// Blank input is returned unchanged without touching the session.
pub async fn improve(
    session: &WriterSessionHandle,
    request: &ImproveRequest,
) -> Result<String, RuntimeError> {
    if request.is_blank() {
        return Ok(request.current.clone());
    }

    let prompt = build_prompt(&request.current);
    let context = request.context.as_deref().unwrap_or_default().trim();

    let session = session.lock().await;
    let mode = session.chunk_mode();
    let mut stream = session.write_streaming(&prompt, context).await?;

    let mut full = String::new();
    let mut chunks = 0usize;
    while let Some(chunk) = stream.next().await {
        accumulate(mode, &mut full, chunk?);
        chunks += 1;
    }
    debug!(chunks, ?mode, len = full.len(), "Writer stream finished");

    Ok(full.trim().to_string())
}

fn accumulate(mode: ChunkMode, full: &mut String, chunk: String) {
    match mode {
        ChunkMode::Delta => full.push_str(&chunk),
        ChunkMode::Cumulative => *full = chunk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_cache::SessionCache;
    use futures_util::stream;
    use petassist_core::{CapabilityKey, MockWriterSession, WriterSession};

    async fn handle_for(session: MockWriterSession) -> WriterSessionHandle {
        let cache: SessionCache<Box<dyn WriterSession>> = SessionCache::new();
        cache
            .get_or_create(&CapabilityKey::Writer, || async move {
                Ok(Box::new(session) as Box<dyn WriterSession>)
            })
            .await
            .unwrap()
    }

    fn streaming(mode: ChunkMode, chunks: &'static [&'static str]) -> MockWriterSession {
        let mut session = MockWriterSession::new();
        session.expect_chunk_mode().return_const(mode);
        session.expect_write_streaming().returning(move |_, _| {
            let items: Vec<Result<String, RuntimeError>> =
                chunks.iter().map(|c| Ok((*c).to_string())).collect();
            Ok(stream::iter(items).boxed())
        });
        session
    }

    #[tokio::test]
    async fn test_delta_chunks_concatenate() {
        let session = streaming(ChunkMode::Delta, &["A ", "b", "c "]);
        let out = improve(&handle_for(session).await, &ImproveRequest::new("x"))
            .await
            .unwrap();
        assert_eq!(out, "A bc");
    }

    #[tokio::test]
    async fn test_cumulative_chunks_replace() {
        let session = streaming(ChunkMode::Cumulative, &["A", "A b", "A bc "]);
        let out = improve(&handle_for(session).await, &ImproveRequest::new("x"))
            .await
            .unwrap();
        assert_eq!(out, "A bc");
    }

    #[tokio::test]
    async fn test_blank_input_skips_session() {
        let mut session = MockWriterSession::new();
        session.expect_chunk_mode().never();
        session.expect_write_streaming().never();

        let out = improve(&handle_for(session).await, &ImproveRequest::new("   "))
            .await
            .unwrap();
        assert_eq!(out, "   ");
    }

    #[tokio::test]
    async fn test_passes_trimmed_context() {
        let mut session = MockWriterSession::new();
        session.expect_chunk_mode().return_const(ChunkMode::Delta);
        session
            .expect_write_streaming()
            .withf(|prompt, context| {
                prompt.ends_with("Description to improve:\nsweet cat") && context == "Name: Mochi"
            })
            .times(1)
            .returning(|_, _| Ok(stream::iter(vec![Ok("Mochi is sweet.".to_string())]).boxed()));

        let request = ImproveRequest::new("  sweet cat ").with_context(" Name: Mochi ");
        let out = improve(&handle_for(session).await, &request).await.unwrap();
        assert_eq!(out, "Mochi is sweet.");
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let mut session = MockWriterSession::new();
        session.expect_chunk_mode().return_const(ChunkMode::Delta);
        session.expect_write_streaming().returning(|_, _| {
            let items: Vec<Result<String, RuntimeError>> = vec![
                Ok("Half".to_string()),
                Err(RuntimeError::Invocation("stream reset".into())),
            ];
            Ok(stream::iter(items).boxed())
        });

        let err = improve(&handle_for(session).await, &ImproveRequest::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err, RuntimeError::Invocation("stream reset".into()));
    }
}
