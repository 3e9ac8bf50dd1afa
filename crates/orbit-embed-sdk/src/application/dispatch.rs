//! Inbound message classification.
//!
//! Every received transport message is classified exactly once. The outcome
//! taxonomy mirrors the error-handling contract:
//!
//! - a foreign origin is dropped **silently** (trust boundary, not a bug
//!   path, so not even a diagnostic);
//! - a malformed body or unknown discriminator is dropped **with** a
//!   diagnostic;
//! - everything else is delivered to the registered listeners.
//!
//! Nothing in this module throws; inbound anomalies never propagate to the
//! host as errors.

use serde_json::Value;
use tracing::warn;

use orbit_embed_core::{EventDecodeError, EventEnvelope, EventKind};

/// Outcome of handling one inbound transport message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The message was recognized and the listener list was notified.
    Delivered {
        /// The recognized event kind.
        kind: EventKind,
        /// How many listeners were invoked (0 when none are registered).
        listeners: usize,
    },
    /// No transport handler is armed yet (nothing was navigated, or the
    /// bridge does not exist); the message went nowhere.
    Inactive,
    /// The declared origin did not match the expected base origin exactly.
    /// Dropped silently.
    ForeignOrigin,
    /// The body was not an envelope (not an object, or no `"type"` string).
    MalformedEnvelope,
    /// The `"type"` discriminator is outside the known event space.
    UnknownEvent,
}

/// Exact-match origin check: the sole trust boundary for inbound messages.
pub(crate) fn origin_is_expected(expected: &str, declared: &str) -> bool {
    declared == expected
}

/// Decodes an inbound body, mapping decode failures to their drop outcome
/// (with the appropriate diagnostic).
pub(crate) fn decode_inbound(body: &Value) -> Result<EventEnvelope, Dispatch> {
    match EventEnvelope::from_value(body) {
        Ok(envelope) => Ok(envelope),
        Err(EventDecodeError::UnknownType(tag)) => {
            warn!(%tag, "dropping inbound message with unknown event type");
            Err(Dispatch::UnknownEvent)
        }
        Err(error) => {
            warn!(%error, "dropping malformed inbound message");
            Err(Dispatch::MalformedEnvelope)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
