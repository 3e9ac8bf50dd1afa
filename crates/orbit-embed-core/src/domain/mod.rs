//! Domain layer: host-supplied configuration and the page route catalog.
//!
//! Everything here is a plain value type. No I/O, no async, no framework
//! dependencies, which keeps these types trivially testable and usable from
//! any embedding environment.

pub mod config;
pub mod routes;

pub use config::{EmbedConfig, Environment, TokenParam};
pub use routes::{ClientId, DocumentId, DocumentKind, Route, RouteError};
