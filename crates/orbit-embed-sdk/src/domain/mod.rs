//! Domain layer for orbit-embed-sdk.
//!
//! Pure data structures with carefully specified ordering semantics:
//!
//! - [`queue::PendingQueue`] – the FIFO queue of calls issued before the
//!   bridge exists.
//! - [`listeners::ListenerRegistry`] – per-event-kind ordered listener lists
//!   with explicit duplicate and removal semantics.
//!
//! Nothing here performs I/O or knows about the embedding environment.

pub mod listeners;
pub mod queue;

pub use listeners::{Listener, ListenerRegistry};
pub use queue::{DeferredCall, PendingQueue};
