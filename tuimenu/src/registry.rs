//! Cross-instance coordination of the single open top-level menu.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace};

/// Unique identifier for a mounted menu instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Allocate a fresh id.
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__menu_{}", self.0)
    }
}

/// Callback that forces a registered instance closed.
pub type CloseFn = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct RegistryInner {
    /// Registered instances in registration order.
    entries: Vec<(InstanceId, CloseFn)>,
    /// Instance currently holding the open slot.
    open: Option<InstanceId>,
}

/// Registry guaranteeing that at most one top-level menu is open.
///
/// The registry is an explicit handle owned by the application root and
/// passed to every menu it should coordinate. Cloning shares the same
/// registry. It only holds close callbacks, never the instances themselves.
///
/// Close callbacks run after the registry's own lock is released, so a
/// callback may call back into the registry.
#[derive(Clone, Default)]
pub struct MenuRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl MenuRegistry {
    /// Create an empty registry with no open instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance. Registering an id twice keeps the first callback.
    pub fn register(&self, id: InstanceId, close: CloseFn) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.entries.iter().any(|(entry, _)| *entry == id) {
                trace!("registry: {} already registered", id);
                return;
            }
            guard.entries.push((id, close));
            debug!("registry: registered {} ({} total)", id, guard.entries.len());
        }
    }

    /// Remove an instance, clearing the open marker if it held it.
    pub fn unregister(&self, id: InstanceId) {
        if let Ok(mut guard) = self.inner.write() {
            let before = guard.entries.len();
            guard.entries.retain(|(entry, _)| *entry != id);
            if guard.open == Some(id) {
                guard.open = None;
            }
            if guard.entries.len() != before {
                debug!("registry: unregistered {}", id);
            }
        }
    }

    /// Make `id` the open instance, closing every other instance first.
    ///
    /// Siblings are closed synchronously, in registration order, before the
    /// marker moves. Requests from unregistered ids are ignored.
    ///
    /// Returns true if `id` holds the open slot afterwards.
    pub fn request_open(&self, id: InstanceId) -> bool {
        let to_close: Vec<CloseFn> = {
            let Ok(guard) = self.inner.read() else {
                return false;
            };
            if !guard.entries.iter().any(|(entry, _)| *entry == id) {
                trace!("registry: open request from unknown {}", id);
                return false;
            }
            match guard.open {
                Some(current) if current != id => guard
                    .entries
                    .iter()
                    .filter(|(entry, _)| *entry != id)
                    .map(|(_, close)| Arc::clone(close))
                    .collect(),
                _ => Vec::new(),
            }
        };

        if !to_close.is_empty() {
            debug!("registry: {} opening, closing {} sibling(s)", id, to_close.len());
        }
        for close in to_close {
            close();
        }

        match self.inner.write() {
            // A callback may have unregistered the requester.
            Ok(mut guard) if guard.entries.iter().any(|(entry, _)| *entry == id) => {
                guard.open = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Clear the open marker if `id` holds it.
    pub fn request_close(&self, id: InstanceId) {
        if let Ok(mut guard) = self.inner.write()
            && guard.open == Some(id)
        {
            guard.open = None;
            trace!("registry: {} released the open slot", id);
        }
    }

    /// The instance currently marked open.
    pub fn open_instance(&self) -> Option<InstanceId> {
        self.inner.read().map(|guard| guard.open).unwrap_or(None)
    }

    /// Whether `id` is registered.
    pub fn is_registered(&self, id: InstanceId) -> bool {
        self.inner
            .read()
            .map(|guard| guard.entries.iter().any(|(entry, _)| *entry == id))
            .unwrap_or(false)
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registration and the open marker.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.entries.clear();
            guard.open = None;
            debug!("registry: cleared");
        }
    }
}

impl std::fmt::Debug for MenuRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuRegistry")
            .field("len", &self.len())
            .field("open", &self.open_instance())
            .finish()
    }
}
