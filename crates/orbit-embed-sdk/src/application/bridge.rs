//! The bridge: the ready-state object owning the frame, navigation, and the
//! listener registry.
//!
//! Exactly one bridge exists per embed session, constructed by the facade
//! when the bootstrap completes. It owns the [`FrameHost`] exclusively: the
//! frame is mounted lazily on the first navigation and reused afterwards
//! (later navigations only re-assign the frame URL).
//!
//! # Inbound dispatch
//!
//! [`Bridge::handle_message`] is called once per received transport message.
//! The checks run in a fixed order: transport armed, origin, envelope shape,
//! discriminator. Only a message that passes all four reaches the listener
//! registry, and the height-change kind additionally drives the built-in
//! auto-resize behavior unless it was disabled at configuration time.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use orbit_embed_core::{
    build_embed_url, EmbedConfig, EmbedUrlError, EventEnvelope, EventKind, Route,
};

use crate::application::dispatch::{decode_inbound, origin_is_expected, Dispatch};
use crate::domain::listeners::{Listener, ListenerRegistry};
use crate::domain::queue::DeferredCall;
use crate::infrastructure::frame_host::{FrameHost, FrameSpec, HostError};

/// Errors raised by a navigation request.
///
/// Both variants are configuration errors: the operation is aborted with no
/// partial navigation, and the caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    /// The navigation URL could not be built.
    #[error(transparent)]
    Url(#[from] EmbedUrlError),
    /// The frame host rejected the operation (usually: container missing).
    #[error(transparent)]
    Host(#[from] HostError),
}

/// A classified inbound event, accepted but not yet delivered.
pub(crate) struct InboundEvent {
    pub envelope: EventEnvelope,
    /// Whether the built-in auto-resize applies after listener delivery.
    pub auto_resize: bool,
}

/// The ready-state embed session object.
pub struct Bridge<H: FrameHost> {
    config: EmbedConfig,
    /// Cached [`EmbedConfig::base_origin`]; the sole inbound trust anchor.
    expected_origin: String,
    host: H,
    registry: ListenerRegistry,
    frame_mounted: bool,
    transport_armed: bool,
}

impl<H: FrameHost> Bridge<H> {
    /// Constructs the bridge for a configuration, taking ownership of the host.
    pub fn new(config: EmbedConfig, host: H) -> Self {
        let expected_origin = config.base_origin();
        info!(origin = %expected_origin, "embed bridge constructed");
        Self {
            config,
            expected_origin,
            host,
            registry: ListenerRegistry::new(),
            frame_mounted: false,
            transport_armed: false,
        }
    }

    /// The configuration this bridge was built with.
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Read access to the owned frame host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Presents a route inside the embed frame.
    ///
    /// The frame is mounted into the configured container on the first call;
    /// later calls only re-assign its URL. A failed mount aborts the
    /// navigation entirely: no frame, no URL change, and the next call
    /// retries the mount.
    ///
    /// # Errors
    ///
    /// [`NavigateError::Url`] if the base origin is unusable,
    /// [`NavigateError::Host`] if the container cannot be found.
    pub fn navigate(&mut self, route: &Route) -> Result<(), NavigateError> {
        let url = build_embed_url(&self.config, route)?;

        if !self.frame_mounted {
            self.host
                .mount_frame(&self.config.container_id, &FrameSpec::default())?;
            self.frame_mounted = true;
            debug!(container = %self.config.container_id, "embed frame mounted");
        }

        self.host.set_frame_url(&url)?;
        // Arming is idempotent: re-navigation never registers a second
        // inbound handler or a second auto-resize hook.
        self.transport_armed = true;
        // The query string carries the access token; log the path only.
        info!(path = url.path(), "embed frame navigated");
        Ok(())
    }

    /// Appends a listener for the given event kind.
    pub fn add_listener(&mut self, kind: EventKind, listener: Listener) {
        self.registry.add(kind, listener);
    }

    /// Removes the first matching registration of `listener` for `kind`.
    /// Returns `false` (and logs nothing but a debug line) when absent.
    pub fn remove_listener(&mut self, kind: EventKind, listener: &Listener) -> bool {
        let removed = self.registry.remove(kind, listener);
        if !removed {
            debug!(?kind, "remove_listener found no matching registration");
        }
        removed
    }

    /// Number of registrations currently held for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry.len(kind)
    }

    /// Handles one received transport message.
    ///
    /// See the module documentation for the check order. This never fails:
    /// every anomaly maps to a drop outcome.
    pub fn handle_message(&mut self, origin: &str, body: &Value) -> Dispatch {
        let event = match self.classify_message(origin, body) {
            Ok(event) => event,
            Err(outcome) => return outcome,
        };

        let listeners = self.registry.notify(event.envelope.kind, &event.envelope);
        trace!(kind = ?event.envelope.kind, listeners, "event delivered");

        if event.auto_resize {
            self.apply_auto_resize(&event.envelope);
        }

        Dispatch::Delivered {
            kind: event.envelope.kind,
            listeners,
        }
    }

    /// Classifies one received transport message without delivering it.
    ///
    /// This is the locked half of the facade's dispatch: the facade
    /// classifies and snapshots listeners under its mutex, then invokes
    /// the callbacks with the mutex released so a listener may call back
    /// into the facade.
    pub(crate) fn classify_message(
        &mut self,
        origin: &str,
        body: &Value,
    ) -> Result<InboundEvent, Dispatch> {
        if !self.transport_armed {
            trace!("inbound message before first navigation; ignoring");
            return Err(Dispatch::Inactive);
        }

        // Trust boundary: anything not from the expected origin is untrusted
        // and ignored without a diagnostic.
        if !origin_is_expected(&self.expected_origin, origin) {
            return Err(Dispatch::ForeignOrigin);
        }

        let envelope = decode_inbound(body)?;
        let auto_resize =
            envelope.kind == EventKind::HeightChanged && !self.config.disable_auto_height;
        Ok(InboundEvent { envelope, auto_resize })
    }

    /// Clones the listener list for `kind`, in registration order.
    pub(crate) fn snapshot_listeners(&self, kind: EventKind) -> Vec<Listener> {
        self.registry.snapshot(kind)
    }

    /// Built-in auto-resize: applies `payload.height` as the frame height.
    /// A missing or non-numeric height is a silent no-op.
    pub(crate) fn apply_auto_resize(&mut self, envelope: &EventEnvelope) {
        let Some(height_px) = envelope.height() else {
            return;
        };
        match self.host.set_frame_height(height_px) {
            Ok(()) => debug!(height_px, "auto-resize applied"),
            Err(error) => warn!(%error, "auto-resize could not set frame height"),
        }
    }

    /// Replays one deferred facade call. Per-call failures are diagnostics
    /// only; a failed replay never interrupts the rest of the drain.
    pub(crate) fn apply(&mut self, call: DeferredCall) {
        match call {
            DeferredCall::Navigate(route) => {
                if let Err(error) = self.navigate(&route) {
                    warn!(%error, ?route, "replaying queued navigation failed");
                }
            }
            DeferredCall::AddListener(kind, listener) => self.add_listener(kind, listener),
            DeferredCall::RemoveListener(kind, listener) => {
                self.remove_listener(kind, &listener);
            }
        }
    }

    /// Releases the frame host (facade teardown).
    pub(crate) fn into_host(self) -> H {
        self.host
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
