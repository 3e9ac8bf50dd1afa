//! Infrastructure layer for orbit-embed-sdk.
//!
//! Two seams connect the SDK to its surroundings:
//!
//! - [`frame_host`] – how a frame is mounted into the host surface, pointed
//!   at a URL, and resized. A concrete embedding integration implements
//!   [`frame_host::FrameHost`]; tests use the in-tree mock.
//! - [`bootstrap`] – how the bootstrap resource is loaded. Production uses
//!   the reqwest-backed [`bootstrap::HttpBootstrapLoader`]; tests use the
//!   instant/failing mocks.

pub mod bootstrap;
pub mod frame_host;

pub use bootstrap::{BootstrapError, BootstrapLoader, HttpBootstrapLoader};
pub use frame_host::{FrameHost, FrameSpec, HostError};
