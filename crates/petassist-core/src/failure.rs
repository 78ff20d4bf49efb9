//! Failure taxonomy surfaced by the assistant facades.
//!
//! Every error raised below the facade boundary is converted into one of
//! these values; nothing else reaches UI code. Failures are serializable so
//! they can cross IPC or HTTP boundaries unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CapabilityKind;
use crate::ports::RuntimeError;

/// Typed failure returned by a facade call.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum AssistFailure {
    /// The runtime lacks the capability or reported it unavailable.
    /// Not retryable without a different runtime.
    #[error("{capability} is unavailable: {reason}")]
    CapabilityUnavailable {
        capability: CapabilityKind,
        reason: String,
    },

    /// Asset download or session creation failed. Retryable.
    #[error("{capability} could not be set up: {message}")]
    ProvisioningFailed {
        capability: CapabilityKind,
        message: String,
    },

    /// The capability failed while serving the request. Retryable.
    #[error("{capability} request failed: {message}")]
    InvocationFailed {
        capability: CapabilityKind,
        message: String,
    },

    /// The capability answered with unusable output.
    ///
    /// Internal only. Facades never return it: classification falls back to
    /// an unknown result and the text capabilities report undecodable
    /// responses as [`AssistFailure::InvocationFailed`].
    #[error("{capability} returned malformed output: {message}")]
    MalformedOutput {
        capability: CapabilityKind,
        message: String,
    },
}

impl AssistFailure {
    pub fn unavailable(capability: CapabilityKind, reason: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability,
            reason: reason.into(),
        }
    }

    /// Map a provisioning error. A provider that turns out to be absent is
    /// reported as unavailable rather than as a retryable failure.
    #[must_use]
    pub fn from_provisioning(capability: CapabilityKind, err: &RuntimeError) -> Self {
        match err {
            RuntimeError::NotPresent(_) => Self::unavailable(capability, err.to_string()),
            _ => Self::ProvisioningFailed {
                capability,
                message: err.to_string(),
            },
        }
    }

    /// Map an invocation error.
    ///
    /// A response the runtime could not decode is an invocation failure like
    /// any other; it is never reported as malformed output.
    #[must_use]
    pub fn from_invocation(capability: CapabilityKind, err: &RuntimeError) -> Self {
        match err {
            RuntimeError::NotPresent(_) => Self::unavailable(capability, err.to_string()),
            _ => Self::InvocationFailed {
                capability,
                message: err.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn capability(&self) -> CapabilityKind {
        match self {
            Self::CapabilityUnavailable { capability, .. }
            | Self::ProvisioningFailed { capability, .. }
            | Self::InvocationFailed { capability, .. }
            | Self::MalformedOutput { capability, .. } => *capability,
        }
    }

    /// Whether re-invoking the same facade call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProvisioningFailed { .. } | Self::InvocationFailed { .. }
        )
    }

    /// Short capability-specific message for display next to a retry action.
    #[must_use]
    pub fn user_message(&self) -> String {
        let label = self.capability().label();
        match self {
            Self::CapabilityUnavailable { .. } => {
                format!("{label} isn't available on this device. You can still fill this in by hand.")
            }
            Self::ProvisioningFailed { .. } => {
                format!("{label} couldn't finish setting up. Please try again.")
            }
            Self::InvocationFailed { .. } => format!("{label} hit a snag. Please try again."),
            Self::MalformedOutput { .. } => {
                format!("{label} returned something unexpected. Please try again.")
            }
        }
    }
}
