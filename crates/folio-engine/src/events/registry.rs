use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Host event kinds an engine can listen to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
    KeyDown,
    PointerDown,
}

type Counts = RefCell<HashMap<EventKind, usize>>;

/// Live listener counts per [`EventKind`].
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    counts: Rc<Counts>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for `kind`. It stays registered until the returned
    /// guard is dropped.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe(&self, kind: EventKind) -> Subscription {
        *self.counts.borrow_mut().entry(kind).or_insert(0) += 1;
        log::trace!("listener added: {kind:?}");
        Subscription { counts: Rc::downgrade(&self.counts), kind }
    }

    /// Number of live listeners for `kind`.
    pub fn listeners(&self, kind: EventKind) -> usize {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.listeners(kind) > 0
    }

    /// Total live listeners across all kinds.
    pub fn total(&self) -> usize {
        self.counts.borrow().values().sum()
    }
}

/// RAII guard for one registered listener.
#[derive(Debug)]
pub struct Subscription {
    counts: Weak<Counts>,
    kind: EventKind,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The registry may already be gone during host teardown.
        let Some(shared) = self.counts.upgrade() else { return };
        let mut counts = shared.borrow_mut();
        if let Some(n) = counts.get_mut(&self.kind) {
            *n = n.saturating_sub(1);
            if *n == 0 {
                counts.remove(&self.kind);
            }
        }
        log::trace!("listener removed: {:?}", self.kind);
    }
}
