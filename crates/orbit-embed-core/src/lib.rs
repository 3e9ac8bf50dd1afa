//! # orbit-embed-core
//!
//! Shared library for the Orbit Embed SDK containing the embed configuration,
//! the page route catalog, the inbound event protocol, and embed URL
//! construction.
//!
//! This crate is pure: it performs no I/O, spawns no tasks, and has no
//! dependency on any particular embedding environment. The SDK crate
//! (`orbit-embed-sdk`) layers the facade, the bridge, and the host seams on
//! top of these types.
//!
//! # What lives where
//!
//! - **`domain`** – Configuration supplied by the host application
//!   ([`EmbedConfig`], [`Environment`]) and the closed catalog of navigable
//!   pages ([`Route`], [`DocumentKind`]).
//!
//! - **`protocol`** – The inbound notification contract: the closed set of
//!   event kinds ([`EventKind`]), the `{type, payload}` envelope
//!   ([`EventEnvelope`]), and the URL builders that produce the embed and
//!   bootstrap locations.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `orbit_embed_core::EmbedConfig` instead of the full module path.
pub use domain::config::{EmbedConfig, Environment, TokenParam};
pub use domain::routes::{ClientId, DocumentId, DocumentKind, Route, RouteError};
pub use protocol::embed_url::{build_embed_url, bootstrap_url, EmbedUrlError, BOOTSTRAP_RESOURCE};
pub use protocol::events::{EventDecodeError, EventEnvelope, EventKind};
