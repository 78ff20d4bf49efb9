//! Capability orchestration for petassist.
//!
//! Builds on the ports in `petassist-core`:
//!
//! - [`probe`]: availability probing that never fails
//! - [`session_cache`]: one session per capability key, single-flight provisioning
//! - [`progress`]: download progress relay
//! - [`invoke`]: per-capability invokers
//! - [`facade`]: the four entry points UI code calls
//! - [`services`]: [`AssistCore`], the facade container
//! - [`task`]: disposable background calls
//! - [`openai`]: adapter for OpenAI-compatible local backends

#![deny(unused_crate_dependencies)]

pub mod availability;
pub mod facade;
pub mod invoke;
pub mod openai;
pub mod probe;
pub mod progress;
pub mod services;
pub mod session_cache;
pub mod task;

pub use availability::AvailabilityTracker;
pub use facade::{
    CapabilityGateway, ImageClassifierFacade, ProofreaderFacade, PromptProvider,
    ProofreaderProvider, TranslatorFacade, TranslatorProvider, WriterFacade, WriterProvider,
};
pub use invoke::ImproveRequest;
pub use probe::probe;
pub use progress::DownloadProgressRelay;
pub use services::{AssistCore, Providers};
pub use session_cache::{SessionCache, SessionHandle};
pub use task::{Disposable, Disposer};

// Dev-dependencies used only by integration tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
