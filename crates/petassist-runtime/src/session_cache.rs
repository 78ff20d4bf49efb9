//! Per-key session cache with single-flight provisioning.
//!
//! Each key owns a slot holding a `tokio::sync::OnceCell`. The first caller
//! runs the provisioning future; callers arriving while it runs wait on the
//! same cell and receive the same session. A failed provisioning leaves the
//! cell empty so the next caller starts over.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use petassist_core::{CapabilityKey, RuntimeError};
use tokio::sync::{MutexGuard, OnceCell};
use tracing::debug;

/// Shared handle to a provisioned session.
///
/// Cloning is cheap; all clones point at the same session. [`lock`] is the
/// only way to reach the session and enforces one in-flight call at a time.
///
/// [`lock`]: SessionHandle::lock
pub struct SessionHandle<S> {
    inner: Arc<tokio::sync::Mutex<S>>,
}

impl<S> SessionHandle<S> {
    fn new(session: S) -> Self {
        Self {
            inner: Arc::new(tokio::sync::Mutex::new(session)),
        }
    }

    /// Wait for exclusive use of the session.
    pub async fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().await
    }

    /// Whether two handles refer to the same session.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> std::fmt::Debug for SessionHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("ptr", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

type Slot<S> = Arc<OnceCell<SessionHandle<S>>>;

/// Memoizes one session per [`CapabilityKey`] for the process lifetime.
pub struct SessionCache<S> {
    slots: Mutex<HashMap<CapabilityKey, Slot<S>>>,
}

impl<S> Default for SessionCache<S> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<S> SessionCache<S>
where
    S: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The ready session for `key`, if provisioning already succeeded.
    pub fn get(&self, key: &CapabilityKey) -> Option<SessionHandle<S>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of keys with a ready session.
    pub fn ready_count(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    /// Return the session for `key`, running `provision` only if none exists.
    ///
    /// Concurrent callers for the same key share one provisioning run. If it
    /// fails, every waiter sees the slot empty again; the next waiter in line
    /// runs its own `provision`.
    pub async fn get_or_create<F, Fut>(
        &self,
        key: &CapabilityKey,
        provision: F,
    ) -> Result<SessionHandle<S>, RuntimeError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<S, RuntimeError>>,
    {
        let slot = self.slot(key);
        let handle = slot
            .get_or_try_init(move || async move {
                let session = provision().await?;
                debug!(%key, "Session provisioned");
                Ok::<_, RuntimeError>(SessionHandle::new(session))
            })
            .await?;
        Ok(handle.clone())
    }

    fn slot(&self, key: &CapabilityKey) -> Slot<S> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }
}
