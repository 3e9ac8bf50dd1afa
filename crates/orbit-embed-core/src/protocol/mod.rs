//! Protocol layer: the inbound notification contract and URL construction.
//!
//! The embedded application talks back to the host through a cross-document
//! message transport. Each message carries a JSON body of the shape
//! `{ "type": <discriminator>, "payload": { ... } }`. This module defines the
//! closed discriminator set, the envelope type, and the builders for the
//! outbound navigation and bootstrap URLs.

pub mod embed_url;
pub mod events;

pub use embed_url::{build_embed_url, bootstrap_url, EmbedUrlError, BOOTSTRAP_RESOURCE};
pub use events::{EventDecodeError, EventEnvelope, EventKind};
