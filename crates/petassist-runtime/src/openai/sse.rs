//! SSE parsing for streamed chat completions.
//!
//! llama-server streams `data: {...}\n\n` events terminated by
//! `data: [DONE]`. Only `choices[0].delta.content` is of interest here.

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt, stream};
use petassist_core::{RuntimeError, TextStream};
use tracing::{trace, warn};

use super::models::ChatCompletionChunk;

/// What one SSE line means for the content stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// A content delta.
    Content(String),
    /// End of stream.
    Done,
    /// Blank line, comment, role-only delta, or anything unrecognized.
    Skip,
}

/// Classify a single SSE line.
pub fn parse_line(line: &str) -> SseLine {
    let trimmed = line.trim();
    let Some(data) = trimmed.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<ChatCompletionChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
            .map_or(SseLine::Skip, SseLine::Content),
        Err(e) => {
            trace!(error = %e, "Skipping unparseable SSE payload");
            SseLine::Skip
        }
    }
}

struct DeltaState<S> {
    stream: S,
    buf: BytesMut,
    done: bool,
}

/// Turn an upstream SSE byte stream into a stream of content deltas.
pub fn content_deltas<S>(byte_stream: S) -> TextStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    let state = DeltaState {
        stream: byte_stream.boxed(),
        buf: BytesMut::new(),
        done: false,
    };

    stream::unfold(state, |mut st| async move {
        if st.done {
            return None;
        }

        loop {
            if let Some(line_end) = st.buf.iter().position(|b| *b == b'\n') {
                let line = st.buf.split_to(line_end + 1);
                match parse_line(&String::from_utf8_lossy(&line)) {
                    SseLine::Content(content) => return Some((Ok(content), st)),
                    SseLine::Done => return None,
                    SseLine::Skip => continue,
                }
            }

            match st.stream.next().await {
                Some(Ok(chunk)) => st.buf.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    warn!("Upstream stream error: {e}");
                    st.done = true;
                    return Some((Err(RuntimeError::Invocation(e.to_string())), st));
                }
                None => {
                    // Flush a final line that lacked its newline.
                    st.done = true;
                    let rest = st.buf.split();
                    return match parse_line(&String::from_utf8_lossy(&rest)) {
                        SseLine::Content(content) => Some((Ok(content), st)),
                        SseLine::Done | SseLine::Skip => None,
                    };
                }
            }
        }
    })
    .boxed()
}
