//! Latest known availability per capability instance.
//!
//! Backs the synchronous "is this worth offering in the UI" query. Updated
//! by the gateways whenever they probe or provision.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use petassist_core::{AvailabilityState, CapabilityKey, ProvisioningEvent};
use tracing::debug;

#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    states: RwLock<HashMap<CapabilityKey, AvailabilityState>>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly probed state.
    pub fn record(&self, key: &CapabilityKey, state: AvailabilityState) {
        let mut states = self.states.write().unwrap_or_else(PoisonError::into_inner);
        states.insert(key.clone(), state);
    }

    /// Apply a provisioning event to the known state, if any.
    pub fn apply(&self, key: &CapabilityKey, event: ProvisioningEvent) -> Option<AvailabilityState> {
        let mut states = self.states.write().unwrap_or_else(PoisonError::into_inner);
        let state = states.get_mut(key)?;
        let next = state.transition(event);
        if next != *state {
            debug!(%key, from = %state, to = %next, "Availability transition");
            *state = next;
        }
        Some(next)
    }

    /// Latest known state, `None` if never probed.
    pub fn latest(&self, key: &CapabilityKey) -> Option<AvailabilityState> {
        self.states
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    /// All known states, sorted by key for stable display.
    pub fn snapshot(&self) -> Vec<(CapabilityKey, AvailabilityState)> {
        let states = self.states.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<_> = states.iter().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort_by_key(|(k, _)| k.to_string());
        entries
    }
}
