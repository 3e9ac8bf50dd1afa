//! Per-event-kind listener registries.
//!
//! Listener lists have deliberately explicit, tested semantics rather than
//! incidental collection behavior:
//!
//! - **Order**: listeners are notified in registration order.
//! - **Duplicates**: the same callback may be registered twice for one kind
//!   and is then invoked twice per matching event.
//! - **Removal**: deletes only the *first* occurrence of the given callback
//!   reference; removing an unregistered callback is a no-op.
//!
//! A subscription is identified by `Arc` pointer identity: the `Arc<dyn Fn>`
//! the host registered is the handle it later passes to remove.

use std::collections::HashMap;
use std::sync::Arc;

use orbit_embed_core::{EventEnvelope, EventKind};

/// A registered callback. Receives the full event envelope, payload included.
pub type Listener = Arc<dyn Fn(&EventEnvelope) + Send + Sync + 'static>;

/// Ordered listener lists, one per [`EventKind`].
///
/// Every kind has a slot from construction on, mirroring the closed event
/// enumeration: lookup never misses, an empty slot simply notifies nobody.
pub struct ListenerRegistry {
    slots: HashMap<EventKind, Vec<Listener>>,
}

impl ListenerRegistry {
    /// Creates a registry with an empty slot for every event kind.
    pub fn new() -> Self {
        let mut slots = HashMap::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            slots.insert(kind, Vec::new());
        }
        Self { slots }
    }

    /// Appends a listener to the given kind's list.
    pub fn add(&mut self, kind: EventKind, listener: Listener) {
        // The slot always exists; see `new`.
        self.slots.entry(kind).or_default().push(listener);
    }

    /// Removes the first occurrence of `listener` from the given kind's list.
    ///
    /// Identity is `Arc` pointer identity, not closure equality. Returns
    /// `true` if a registration was removed, `false` if none matched.
    pub fn remove(&mut self, kind: EventKind, listener: &Listener) -> bool {
        let slot = self.slots.entry(kind).or_default();
        match slot.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                slot.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invokes every listener registered for `kind`, in registration order,
    /// passing the full envelope. Returns the number of invocations.
    pub fn notify(&self, kind: EventKind, envelope: &EventEnvelope) -> usize {
        match self.slots.get(&kind) {
            Some(slot) => {
                for listener in slot {
                    listener(envelope);
                }
                slot.len()
            }
            None => 0,
        }
    }

    /// Clones the listener list for `kind`, in registration order.
    ///
    /// The clones stay invocable independently of the registry, so a caller
    /// may deliver an event without holding whatever lock guards the
    /// registry itself.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Listener> {
        self.slots.get(&kind).cloned().unwrap_or_default()
    }

    /// Number of registrations currently held for `kind`.
    pub fn len(&self, kind: EventKind) -> usize {
        self.slots.get(&kind).map_or(0, Vec::len)
    }

    /// `true` if no listener is registered for any kind.
    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
