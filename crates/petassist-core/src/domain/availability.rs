//! Capability availability state machine.

use serde::{Deserialize, Serialize};

/// Whether a capability can be used in the current runtime.
///
/// ```text
/// Downloadable --started--> Downloading --succeeded--> Available
///      |                        |
///      +--------failed----------+--------> Unavailable
/// ```
///
/// `Unavailable` reported by the runtime itself is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityState {
    /// The runtime lacks the capability or cannot serve it.
    Unavailable,
    /// Usable after a one-time model asset download.
    Downloadable,
    /// The asset download is in progress.
    Downloading,
    /// Usable immediately.
    Available,
}

/// Events driving [`AvailabilityState`] transitions during provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningEvent {
    Started,
    Succeeded,
    Failed,
}

impl AvailabilityState {
    /// Map a runtime's availability token onto the state enum.
    ///
    /// Accepts the tokens emitted by the various runtime revisions
    /// (`readily`/`after-download`/`no` as well as the current names).
    /// Anything unrecognized, including a missing token, is `Unavailable`.
    #[must_use]
    pub fn from_runtime_token(token: Option<&str>) -> Self {
        match token.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("available" | "readily") => Self::Available,
            Some("downloadable" | "after-download") => Self::Downloadable,
            Some("downloading") => Self::Downloading,
            _ => Self::Unavailable,
        }
    }

    /// True when provisioning may be attempted.
    #[must_use]
    pub const fn is_usable(self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// True when provisioning will download assets and may report progress.
    #[must_use]
    pub const fn needs_download(self) -> bool {
        matches!(self, Self::Downloadable | Self::Downloading)
    }

    /// Apply a provisioning event.
    #[must_use]
    pub const fn transition(self, event: ProvisioningEvent) -> Self {
        match (self, event) {
            (Self::Unavailable, _) => Self::Unavailable,
            (Self::Downloadable, ProvisioningEvent::Started) => Self::Downloading,
            (_, ProvisioningEvent::Succeeded) => Self::Available,
            (Self::Downloadable | Self::Downloading, ProvisioningEvent::Failed) => {
                Self::Unavailable
            }
            (state, _) => state,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Downloadable => "downloadable",
            Self::Downloading => "downloading",
            Self::Available => "available",
        }
    }
}

impl std::fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
