//! Capability invokers.
//!
//! Each invoker runs one logical request against a cached session while
//! holding the session's lock, so at most one call is in flight per session.
//! Invokers return raw [`RuntimeError`]s; facades map them to failures.
//!
//! [`RuntimeError`]: petassist_core::RuntimeError

pub mod classifier;
pub mod proofreader;
pub mod translator;
pub mod writer;

use petassist_core::{PromptSession, ProofreaderSession, TranslatorSession, WriterSession};

use crate::session_cache::SessionHandle;

pub type PromptSessionHandle = SessionHandle<Box<dyn PromptSession>>;
pub type WriterSessionHandle = SessionHandle<Box<dyn WriterSession>>;
pub type ProofreaderSessionHandle = SessionHandle<Box<dyn ProofreaderSession>>;
pub type TranslatorSessionHandle = SessionHandle<Box<dyn TranslatorSession>>;

pub use classifier::{CLASSIFICATION_INSTRUCTION, classify};
pub use proofreader::correct;
pub use translator::translate;
pub use writer::{ImproveRequest, improve};
