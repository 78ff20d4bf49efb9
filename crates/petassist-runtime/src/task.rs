//! Disposable background tasks.
//!
//! UI components start assistant calls they may outlive. The underlying call
//! is never cancelled; disposing only guarantees its result is dropped
//! instead of delivered.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Cloneable handle that disposes a [`Disposable`] from elsewhere.
#[derive(Debug, Clone)]
pub struct Disposer(CancellationToken);

impl Disposer {
    pub fn dispose(&self) {
        self.0.cancel();
    }
}

/// A spawned task whose result can be abandoned.
#[derive(Debug)]
pub struct Disposable<T> {
    token: CancellationToken,
    handle: JoinHandle<T>,
}

impl<T> Disposable<T>
where
    T: Send + 'static,
{
    /// Spawn `future` on the current tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            token: CancellationToken::new(),
            handle: tokio::spawn(future),
        }
    }

    pub fn disposer(&self) -> Disposer {
        Disposer(self.token.clone())
    }

    pub fn dispose(&self) {
        self.token.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the result.
    ///
    /// Returns `None` as soon as the task is disposed, or if it panicked.
    /// A disposed task keeps running detached; its output is discarded.
    pub async fn settle(self) -> Option<T> {
        let Self { token, mut handle } = self;
        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Task disposed, dropping its result");
                None
            }
            joined = &mut handle => {
                if token.is_cancelled() {
                    debug!("Task disposed, dropping its result");
                    return None;
                }
                match joined {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(error = %e, "Assistant task aborted");
                        None
                    }
                }
            }
        }
    }

    /// Deliver the result to `sink` unless disposed. Returns whether it was delivered.
    pub async fn deliver(self, sink: impl FnOnce(T)) -> bool {
        match self.settle().await {
            Some(value) => {
                sink(value);
                true
            }
            None => false,
        }
    }
}
