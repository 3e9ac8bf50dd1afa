//! orbit-embed-sdk library crate.
//!
//! This crate embeds the Orbit application into a host surface: it shows
//! Orbit pages inside an isolated frame and exchanges a small set of typed
//! notifications with the embedded content. The two public entry points are
//! [`EmbedSdk`] (the always-available facade) and, behind it, the bridge that
//! exists once the asynchronous bootstrap has completed.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host application
//!         ↕
//! [orbit-embed-sdk]
//!   ├── domain/           Pure types: pending-call queue, listener registry
//!   ├── application/      Facade state machine, bridge, inbound dispatch
//!   └── infrastructure/
//!         ├── frame_host/ The embedding seam (trait + in-tree mock)
//!         └── bootstrap/  Bootstrap-resource loading (reqwest + mocks)
//! ```
//!
//! # Layer rules
//!
//! - `domain` depends on `orbit-embed-core` only (no I/O, no async).
//! - `application` orchestrates via the infrastructure traits; it never
//!   touches a concrete transport.
//! - `infrastructure` holds the seams a real embedding integration plugs
//!   into, plus the reqwest-backed bootstrap loader.
//!
//! # Lifecycle at a glance
//!
//! ```text
//! EmbedSdk::new(host)            phase = Uninitialized, calls are queued
//! sdk.initialize(cfg, loader)    phase = Initializing, returns BootstrapTask
//! task.run().await               loads the bootstrap resource, builds the
//!                                bridge, drains the queue in FIFO order
//! sdk.ready().await              phase = Ready; calls now forward directly
//! ```

/// Domain layer: the pending-call queue and the listener registry.
pub mod domain;

/// Application layer: facade, bridge, and inbound dispatch.
pub mod application;

/// Infrastructure layer: frame host seam and bootstrap loaders.
pub mod infrastructure;

// Re-export the surface a host application actually touches.
pub use application::bridge::{Bridge, NavigateError};
pub use application::dispatch::Dispatch;
pub use application::facade::{BootstrapTask, EmbedSdk, SdkError, SdkPhase};
pub use domain::listeners::{Listener, ListenerRegistry};
pub use domain::queue::{DeferredCall, PendingQueue};
pub use infrastructure::bootstrap::{BootstrapError, BootstrapLoader, HttpBootstrapLoader};
pub use infrastructure::frame_host::{FrameHost, FrameSpec, HostError};
