//! Inbound event kinds and the `{type, payload}` envelope.
//!
//! The embedded application notifies the host about a small, closed set of
//! occurrences: the dashboard finished rendering, a document was created, or
//! the content height changed. Each notification arrives as a JSON object
//! with a `"type"` discriminator and an optional `"payload"` object:
//!
//! ```json
//! {"type":"DOCUMENT_HEIGHT","payload":{"height":480}}
//! ```
//!
//! The discriminator space is closed. Unknown discriminators decode to an
//! error so the dispatcher can drop them with a diagnostic; they are never a
//! hard failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ── Event kinds ───────────────────────────────────────────────────────────────

/// The closed enumeration of inbound notification categories.
///
/// Adding a kind means adding a variant here plus its wire tag in
/// [`EventKind::wire_name`] / [`EventKind::from_wire_name`]; both matches are
/// exhaustive, so forgetting one is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The dashboard finished its initial render.
    DashboardReady,
    /// An invoice was created inside the embedded application.
    InvoiceCreated,
    /// An estimate was created.
    EstimateCreated,
    /// A credit note was created.
    CreditNoteCreated,
    /// An advance was created.
    AdvanceCreated,
    /// The rendered content height changed (drives frame auto-resize).
    HeightChanged,
}

impl EventKind {
    /// Every kind, in a fixed order. Used to pre-populate listener slots.
    pub const ALL: [EventKind; 6] = [
        EventKind::DashboardReady,
        EventKind::InvoiceCreated,
        EventKind::EstimateCreated,
        EventKind::CreditNoteCreated,
        EventKind::AdvanceCreated,
        EventKind::HeightChanged,
    ];

    /// The wire discriminator for this kind.
    pub fn wire_name(&self) -> &'static str {
        match self {
            EventKind::DashboardReady => "DASHBOARD_AFTER_VIEW_INIT",
            EventKind::InvoiceCreated => "INVOICE_CREATED",
            EventKind::EstimateCreated => "ESTIMATE_CREATED",
            EventKind::CreditNoteCreated => "CREDIT_NOTE_CREATED",
            EventKind::AdvanceCreated => "ADVANCE_CREATED",
            EventKind::HeightChanged => "DOCUMENT_HEIGHT",
        }
    }

    /// Maps a wire discriminator back to its kind, if recognized.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "DASHBOARD_AFTER_VIEW_INIT" => Some(EventKind::DashboardReady),
            "INVOICE_CREATED" => Some(EventKind::InvoiceCreated),
            "ESTIMATE_CREATED" => Some(EventKind::EstimateCreated),
            "CREDIT_NOTE_CREATED" => Some(EventKind::CreditNoteCreated),
            "ADVANCE_CREATED" => Some(EventKind::AdvanceCreated),
            "DOCUMENT_HEIGHT" => Some(EventKind::HeightChanged),
            _ => None,
        }
    }
}

// ── Decode errors ─────────────────────────────────────────────────────────────

/// Reasons an inbound message body fails to decode into an [`EventEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDecodeError {
    /// The body was not a JSON object at all.
    #[error("message body is not a JSON object")]
    NotAnObject,
    /// The body carried no string `"type"` field.
    #[error("message body has no \"type\" discriminator")]
    MissingType,
    /// The `"type"` value is outside the known event space.
    #[error("unknown event type \"{0}\"")]
    UnknownType(String),
}

// ── Envelope ──────────────────────────────────────────────────────────────────

/// Raw wire shape of an inbound message, used for (de)serialization only.
#[derive(Debug, Serialize, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

/// A decoded inbound notification: a recognized kind plus its payload.
///
/// Listeners always receive the full envelope, payload included, so a host
/// listening for `InvoiceCreated` can read the created document's fields
/// without the SDK having to understand them.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    /// The recognized event category.
    pub kind: EventKind,
    /// The optional `payload` object, passed through verbatim.
    pub payload: Option<Value>,
}

impl EventEnvelope {
    /// Creates an envelope without a payload.
    pub fn new(kind: EventKind) -> Self {
        Self { kind, payload: None }
    }

    /// Creates an envelope with a payload.
    pub fn with_payload(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload: Some(payload) }
    }

    /// Decodes an inbound JSON body.
    ///
    /// # Errors
    ///
    /// - [`EventDecodeError::NotAnObject`] if `value` is not an object.
    /// - [`EventDecodeError::MissingType`] if the `"type"` field is absent
    ///   or not a string.
    /// - [`EventDecodeError::UnknownType`] if the discriminator is outside
    ///   the known event space.
    pub fn from_value(value: &Value) -> Result<Self, EventDecodeError> {
        if !value.is_object() {
            return Err(EventDecodeError::NotAnObject);
        }
        let raw: RawEnvelope =
            serde_json::from_value(value.clone()).map_err(|_| EventDecodeError::MissingType)?;
        let kind = EventKind::from_wire_name(&raw.tag)
            .ok_or_else(|| EventDecodeError::UnknownType(raw.tag.clone()))?;
        Ok(Self { kind, payload: raw.payload })
    }

    /// Re-encodes the envelope into its wire shape.
    pub fn to_value(&self) -> Value {
        // RawEnvelope serialization cannot fail: the tag is a plain string
        // and the payload is already a Value.
        serde_json::to_value(RawEnvelope {
            tag: self.kind.wire_name().to_string(),
            payload: self.payload.clone(),
        })
        .expect("envelope serialization is infallible")
    }

    /// Extracts a numeric `payload.height`, used by the auto-resize path.
    ///
    /// Returns `None` when the payload is absent, `height` is missing, or
    /// the value is not a non-negative number. Fractional heights are
    /// truncated to whole pixels.
    pub fn height(&self) -> Option<u32> {
        let height = self.payload.as_ref()?.get("height")?;
        if let Some(h) = height.as_u64() {
            return u32::try_from(h).ok();
        }
        match height.as_f64() {
            Some(h) if h.is_finite() && h >= 0.0 && h <= f64::from(u32::MAX) => Some(h as u32),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind_round_trips_through_wire_name() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_wire_name(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_wire_name_maps_to_none() {
        assert_eq!(EventKind::from_wire_name("SOMETHING_ELSE"), None);
    }

    #[test]
    fn test_decode_height_event() {
        let body = json!({"type": "DOCUMENT_HEIGHT", "payload": {"height": 480}});
        let env = EventEnvelope::from_value(&body).unwrap();
        assert_eq!(env.kind, EventKind::HeightChanged);
        assert_eq!(env.height(), Some(480));
    }

    #[test]
    fn test_decode_event_without_payload() {
        let body = json!({"type": "DASHBOARD_AFTER_VIEW_INIT"});
        let env = EventEnvelope::from_value(&body).unwrap();
        assert_eq!(env.kind, EventKind::DashboardReady);
        assert!(env.payload.is_none());
    }

    #[test]
    fn test_decode_unknown_type_is_reported() {
        let body = json!({"type": "NOT_A_REAL_EVENT"});
        let err = EventEnvelope::from_value(&body).unwrap_err();
        assert_eq!(err, EventDecodeError::UnknownType("NOT_A_REAL_EVENT".to_string()));
    }

    #[test]
    fn test_decode_missing_type_is_reported() {
        let body = json!({"payload": {"height": 10}});
        assert_eq!(
            EventEnvelope::from_value(&body),
            Err(EventDecodeError::MissingType)
        );
    }

    #[test]
    fn test_decode_non_string_type_is_reported() {
        let body = json!({"type": 7});
        assert_eq!(
            EventEnvelope::from_value(&body),
            Err(EventDecodeError::MissingType)
        );
    }

    #[test]
    fn test_decode_non_object_body_is_reported() {
        assert_eq!(
            EventEnvelope::from_value(&json!("DOCUMENT_HEIGHT")),
            Err(EventDecodeError::NotAnObject)
        );
        assert_eq!(
            EventEnvelope::from_value(&json!(null)),
            Err(EventDecodeError::NotAnObject)
        );
    }

    #[test]
    fn test_envelope_to_value_round_trip() {
        let env = EventEnvelope::with_payload(
            EventKind::InvoiceCreated,
            json!({"documentId": "doc-1"}),
        );
        let decoded = EventEnvelope::from_value(&env.to_value()).unwrap();
        assert_eq!(decoded, env);
    }

    #[test]
    fn test_to_value_omits_absent_payload() {
        let value = EventEnvelope::new(EventKind::DashboardReady).to_value();
        assert_eq!(value, json!({"type": "DASHBOARD_AFTER_VIEW_INIT"}));
    }

    #[test]
    fn test_height_missing_payload_is_none() {
        assert_eq!(EventEnvelope::new(EventKind::HeightChanged).height(), None);
    }

    #[test]
    fn test_height_non_numeric_is_none() {
        let env = EventEnvelope::with_payload(
            EventKind::HeightChanged,
            json!({"height": "480"}),
        );
        assert_eq!(env.height(), None);
    }

    #[test]
    fn test_height_negative_is_none() {
        let env = EventEnvelope::with_payload(EventKind::HeightChanged, json!({"height": -5}));
        assert_eq!(env.height(), None);
    }

    #[test]
    fn test_height_fractional_is_truncated() {
        let env = EventEnvelope::with_payload(EventKind::HeightChanged, json!({"height": 480.9}));
        assert_eq!(env.height(), Some(480));
    }
}
