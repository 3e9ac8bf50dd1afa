//! The pending-call queue.
//!
//! Every facade operation issued before the bridge exists is captured as a
//! [`DeferredCall`] and replayed, strictly in issue order, once the bootstrap
//! completes. The call set is a closed enum rather than opaque thunks, so the
//! drain site matches exhaustively and a new operation cannot be forgotten.

use std::fmt;

use orbit_embed_core::{EventKind, Route};

use crate::domain::listeners::Listener;

/// One facade call captured before readiness, with its arguments.
pub enum DeferredCall {
    /// A navigation request.
    Navigate(Route),
    /// A listener registration.
    AddListener(EventKind, Listener),
    /// A listener removal.
    RemoveListener(EventKind, Listener),
}

// Listener is an opaque Arc<dyn Fn>, so Debug is written by hand.
impl fmt::Debug for DeferredCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferredCall::Navigate(route) => f.debug_tuple("Navigate").field(route).finish(),
            DeferredCall::AddListener(kind, _) => {
                f.debug_tuple("AddListener").field(kind).finish()
            }
            DeferredCall::RemoveListener(kind, _) => {
                f.debug_tuple("RemoveListener").field(kind).finish()
            }
        }
    }
}

/// FIFO queue of deferred calls.
///
/// Insertion order is call order; [`PendingQueue::drain`] empties the queue
/// atomically and yields the calls in that order. The queue is drained at
/// most once per successful bootstrap, and the drain site never re-enters it.
#[derive(Default)]
pub struct PendingQueue {
    calls: Vec<DeferredCall>,
}

impl PendingQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call at the back of the queue.
    pub fn push(&mut self, call: DeferredCall) {
        self.calls.push(call);
    }

    /// Empties the queue, returning the calls in insertion order.
    pub fn drain(&mut self) -> Vec<DeferredCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of queued calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_queue_is_empty() {
        let queue = PendingQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_drain_preserves_insertion_order() {
        // Arrange
        let mut queue = PendingQueue::new();
        queue.push(DeferredCall::Navigate(Route::Dashboard));
        queue.push(DeferredCall::Navigate(Route::Clients));
        queue.push(DeferredCall::Navigate(Route::Settings));

        // Act
        let drained = queue.drain();

        // Assert
        let routes: Vec<_> = drained
            .iter()
            .map(|call| match call {
                DeferredCall::Navigate(route) => route.clone(),
                other => panic!("expected Navigate, got {other:?}"),
            })
            .collect();
        assert_eq!(routes, vec![Route::Dashboard, Route::Clients, Route::Settings]);
    }

    #[test]
    fn test_drain_leaves_queue_empty() {
        let mut queue = PendingQueue::new();
        queue.push(DeferredCall::Navigate(Route::Dashboard));
        let _ = queue.drain();
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty(), "second drain yields nothing");
    }

    #[test]
    fn test_pushes_after_drain_queue_again() {
        let mut queue = PendingQueue::new();
        queue.push(DeferredCall::Navigate(Route::Dashboard));
        let _ = queue.drain();

        queue.push(DeferredCall::Navigate(Route::Payments));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_debug_formatting_names_the_operation() {
        let listener: Listener = Arc::new(|_| {});
        let add = DeferredCall::AddListener(EventKind::DashboardReady, listener);
        assert_eq!(format!("{add:?}"), "AddListener(DashboardReady)");

        let nav = DeferredCall::Navigate(Route::Dashboard);
        assert_eq!(format!("{nav:?}"), "Navigate(Dashboard)");
    }
}
