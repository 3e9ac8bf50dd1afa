//! Application layer for orbit-embed-sdk.
//!
//! This layer orchestrates the embed session:
//!
//! - [`facade`] – the always-available call surface and its bootstrap state
//!   machine. Calls made before readiness are queued and replayed in order.
//! - [`bridge`] – the ready-state object owning the frame, navigation, and
//!   the listener registry.
//! - [`dispatch`] – classification of inbound transport messages (origin
//!   check, envelope decoding, outcome reporting).
//!
//! The layer talks to the outside world exclusively through the
//! infrastructure traits ([`crate::FrameHost`], [`crate::BootstrapLoader`]).

pub mod bridge;
pub mod dispatch;
pub mod facade;

pub use bridge::{Bridge, NavigateError};
pub use dispatch::Dispatch;
pub use facade::{BootstrapTask, EmbedSdk, SdkError, SdkPhase};
