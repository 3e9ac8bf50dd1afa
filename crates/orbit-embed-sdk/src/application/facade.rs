//! The facade: a call surface usable the instant the host starts, even
//! though the bridge does not exist until the asynchronous bootstrap
//! completes.
//!
//! # State machine
//!
//! ```text
//! Uninitialized ──initialize()──▶ Initializing ──run() ok──▶ Ready
//!       ▲                              │
//!       │                              └──run() err──▶ Failed ──initialize()──▶ Initializing
//!       └────────── shutdown() from any state
//! ```
//!
//! Calls issued while the bridge does not exist are captured in the pending
//! queue and replayed in exactly their original order when the bootstrap
//! succeeds. Calls issued afterwards forward synchronously. The whole
//! lifecycle lives in one explicitly owned [`EmbedSdk`] value; there is no
//! process-global state, and [`EmbedSdk::shutdown`] is the teardown hook for
//! host surface unload.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use orbit_embed_core::{
    bootstrap_url, ClientId, DocumentId, DocumentKind, EmbedConfig, EmbedUrlError, EventKind,
    Route, RouteError,
};
use url::Url;

use crate::application::bridge::{Bridge, NavigateError};
use crate::application::dispatch::Dispatch;
use crate::domain::listeners::Listener;
use crate::domain::queue::{DeferredCall, PendingQueue};
use crate::infrastructure::bootstrap::{BootstrapError, BootstrapLoader};
use crate::infrastructure::frame_host::FrameHost;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors surfaced by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// `initialize` was called while a session is initializing or ready.
    /// The existing session and its queue are untouched.
    #[error("the embed SDK is already initialized")]
    AlreadyInitialized,
    /// The bootstrap ended in failure; queued calls remain pending and
    /// `initialize` may be called again to retry.
    #[error("bootstrap failed: {0}")]
    BootstrapFailed(String),
    /// A route could not be constructed (missing required identifier).
    #[error(transparent)]
    Route(#[from] RouteError),
    /// The configured base origin is unusable.
    #[error(transparent)]
    Url(#[from] EmbedUrlError),
    /// A ready-state navigation failed.
    #[error(transparent)]
    Navigate(#[from] NavigateError),
}

// ── Phases ────────────────────────────────────────────────────────────────────

/// Observable lifecycle phase of the embed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkPhase {
    /// No bootstrap requested yet; calls are queued.
    Uninitialized,
    /// A bootstrap task is outstanding; calls are queued.
    Initializing,
    /// The bridge exists; calls forward synchronously.
    Ready,
    /// The bootstrap failed; calls are queued and a retry is possible.
    Failed,
}

// ── Internal shared state ─────────────────────────────────────────────────────

/// State shared between the facade and its bootstrap task.
///
/// Invariants: `host` is `Some` exactly while `bridge` is `None` (the host
/// moves into the bridge at readiness and back out at shutdown); `bridge` is
/// `Some` exactly in the `Ready` phase.
struct SdkInner<H: FrameHost> {
    phase: SdkPhase,
    queue: PendingQueue,
    host: Option<H>,
    bridge: Option<Bridge<H>>,
    failure: Option<BootstrapError>,
    /// Bumped by `shutdown`; a bootstrap task from an earlier epoch aborts
    /// instead of completing against torn-down state.
    epoch: u64,
}

// ── Facade ────────────────────────────────────────────────────────────────────

/// The embed SDK context object.
///
/// Construct one per embed surface, keep it for the surface's lifetime, and
/// call [`EmbedSdk::shutdown`] when the surface goes away. All methods take
/// `&self`; the facade may be cloned cheaply and shared.
///
/// ```rust,no_run
/// use orbit_embed_core::{EmbedConfig, Environment};
/// use orbit_embed_sdk::infrastructure::bootstrap::HttpBootstrapLoader;
/// use orbit_embed_sdk::infrastructure::frame_host::mock::MockFrameHost;
/// use orbit_embed_sdk::EmbedSdk;
///
/// # async fn example() -> Result<(), orbit_embed_sdk::SdkError> {
/// let sdk = EmbedSdk::new(MockFrameHost::new().with_container("embed-div"));
/// sdk.load_dashboard()?; // queued until ready
///
/// let cfg = EmbedConfig::new("token", Environment::Production, "org-1", "embed-div");
/// let task = sdk.initialize(cfg, HttpBootstrapLoader::new())?;
/// tokio::spawn(task.run());
/// sdk.ready().await?; // dashboard navigation has been replayed
/// # Ok(())
/// # }
/// ```
pub struct EmbedSdk<H: FrameHost> {
    inner: Arc<Mutex<SdkInner<H>>>,
    phase_tx: watch::Sender<SdkPhase>,
    phase_rx: watch::Receiver<SdkPhase>,
}

impl<H: FrameHost> Clone for EmbedSdk<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            phase_tx: self.phase_tx.clone(),
            phase_rx: self.phase_rx.clone(),
        }
    }
}

impl<H: FrameHost> EmbedSdk<H> {
    /// Creates an uninitialized facade owning the given frame host.
    pub fn new(host: H) -> Self {
        let (phase_tx, phase_rx) = watch::channel(SdkPhase::Uninitialized);
        Self {
            inner: Arc::new(Mutex::new(SdkInner {
                phase: SdkPhase::Uninitialized,
                queue: PendingQueue::new(),
                host: Some(host),
                bridge: None,
                failure: None,
                epoch: 0,
            })),
            phase_tx,
            phase_rx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SdkInner<H>> {
        self.inner.lock().expect("lock poisoned")
    }

    fn publish_phase(&self, phase: SdkPhase) {
        // The facade holds a receiver, so sending cannot fail in practice.
        let _ = self.phase_tx.send(phase);
    }

    /// Requests the one-time asynchronous bootstrap.
    ///
    /// Transitions to `Initializing` and returns the bootstrap task; the
    /// host drives it to completion (`task.run().await`) or spawns it. The
    /// session becomes `Ready` only when the task finishes successfully.
    ///
    /// # Errors
    ///
    /// - [`SdkError::AlreadyInitialized`] while a session is initializing or
    ///   ready (the outstanding session is untouched).
    /// - [`SdkError::Url`] when no bootstrap URL can be built from the
    ///   configuration.
    pub fn initialize<L: BootstrapLoader>(
        &self,
        config: EmbedConfig,
        loader: L,
    ) -> Result<BootstrapTask<H, L>, SdkError> {
        // Validate the configuration before touching any state.
        let url = bootstrap_url(&config)?;

        let epoch = {
            let mut inner = self.lock();
            match inner.phase {
                SdkPhase::Uninitialized | SdkPhase::Failed => {}
                SdkPhase::Initializing | SdkPhase::Ready => {
                    return Err(SdkError::AlreadyInitialized)
                }
            }
            inner.failure = None;
            inner.phase = SdkPhase::Initializing;
            inner.epoch
        };
        self.publish_phase(SdkPhase::Initializing);
        info!(%url, "embed bootstrap started");

        Ok(BootstrapTask {
            inner: Arc::clone(&self.inner),
            phase_tx: self.phase_tx.clone(),
            config,
            loader,
            url,
            epoch,
        })
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> SdkPhase {
        self.lock().phase
    }

    /// Number of calls waiting for the bridge.
    pub fn pending_calls(&self) -> usize {
        self.lock().queue.len()
    }

    /// Runs a closure against the frame host, wherever it currently lives
    /// (inside the bridge once ready, parked in the facade before that).
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        let inner = self.lock();
        if let Some(bridge) = inner.bridge.as_ref() {
            f(bridge.host())
        } else if let Some(host) = inner.host.as_ref() {
            f(host)
        } else {
            unreachable!("the frame host is always held in exactly one place")
        }
    }

    /// Awaits readiness of the embed session.
    ///
    /// Resolves `Ok(())` once the phase reaches `Ready`.
    ///
    /// # Errors
    ///
    /// [`SdkError::BootstrapFailed`] if the bootstrap ends in failure.
    pub async fn ready(&self) -> Result<(), SdkError> {
        let mut rx = self.phase_rx.clone();
        loop {
            let phase = *rx.borrow_and_update();
            match phase {
                SdkPhase::Ready => return Ok(()),
                SdkPhase::Failed => {
                    let reason = self
                        .lock()
                        .failure
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "bootstrap failed".to_string());
                    return Err(SdkError::BootstrapFailed(reason));
                }
                SdkPhase::Uninitialized | SdkPhase::Initializing => {
                    if rx.changed().await.is_err() {
                        return Err(SdkError::BootstrapFailed(
                            "facade dropped before readiness".to_string(),
                        ));
                    }
                }
            }
        }
    }

    /// Tears the session down: releases the bridge (recovering the frame
    /// host), clears the pending queue, and returns to `Uninitialized`.
    ///
    /// A bootstrap task still in flight aborts instead of completing.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        if let Some(bridge) = inner.bridge.take() {
            inner.host = Some(bridge.into_host());
        }
        let dropped = inner.queue.drain().len();
        inner.failure = None;
        inner.phase = SdkPhase::Uninitialized;
        drop(inner);
        self.publish_phase(SdkPhase::Uninitialized);
        info!(dropped_calls = dropped, "embed SDK shut down");
    }

    // ── Forwarding operations ─────────────────────────────────────────────────

    /// Navigates the embed frame, or queues the navigation until ready.
    pub fn navigate(&self, route: Route) -> Result<(), SdkError> {
        let mut inner = self.lock();
        match inner.bridge.as_mut() {
            Some(bridge) => bridge.navigate(&route).map_err(SdkError::from),
            None => {
                debug!(?route, "bridge not ready; queueing navigation");
                inner.queue.push(DeferredCall::Navigate(route));
                Ok(())
            }
        }
    }

    /// Registers a listener, or queues the registration until ready.
    pub fn add_listener(&self, kind: EventKind, listener: Listener) {
        let mut inner = self.lock();
        match inner.bridge.as_mut() {
            Some(bridge) => bridge.add_listener(kind, listener),
            None => {
                debug!(?kind, "bridge not ready; queueing listener registration");
                inner.queue.push(DeferredCall::AddListener(kind, listener));
            }
        }
    }

    /// Removes a listener registration, or queues the removal until ready.
    pub fn remove_listener(&self, kind: EventKind, listener: &Listener) {
        let mut inner = self.lock();
        match inner.bridge.as_mut() {
            Some(bridge) => {
                bridge.remove_listener(kind, listener);
            }
            None => {
                debug!(?kind, "bridge not ready; queueing listener removal");
                inner
                    .queue
                    .push(DeferredCall::RemoveListener(kind, Arc::clone(listener)));
            }
        }
    }

    /// Feeds one received transport message into the session.
    ///
    /// Messages arriving before the bridge exists are dropped as
    /// [`Dispatch::Inactive`] (there is no handler to receive them yet).
    ///
    /// Listeners run with no facade lock held, so a listener may call back
    /// into this facade (navigate, register or remove listeners, even shut
    /// down) without deadlocking.
    pub fn handle_message(&self, origin: &str, body: &Value) -> Dispatch {
        // Classify and snapshot the listener list under the lock; invoke the
        // callbacks only after releasing it.
        let (event, listeners) = {
            let mut inner = self.lock();
            let Some(bridge) = inner.bridge.as_mut() else {
                return Dispatch::Inactive;
            };
            match bridge.classify_message(origin, body) {
                Ok(event) => {
                    let listeners = bridge.snapshot_listeners(event.envelope.kind);
                    (event, listeners)
                }
                Err(outcome) => return outcome,
            }
        };

        let invoked = listeners.len();
        for listener in &listeners {
            listener(&event.envelope);
        }
        trace!(kind = ?event.envelope.kind, listeners = invoked, "event delivered");

        if event.auto_resize {
            // Listeners are notified before the resize; re-acquire since one
            // of them may have torn the session down meanwhile.
            let mut inner = self.lock();
            if let Some(bridge) = inner.bridge.as_mut() {
                bridge.apply_auto_resize(&event.envelope);
            }
        }

        Dispatch::Delivered {
            kind: event.envelope.kind,
            listeners: invoked,
        }
    }

    // ── Per-route convenience surface ─────────────────────────────────────────

    /// Shows the organization dashboard.
    pub fn load_dashboard(&self) -> Result<(), SdkError> {
        self.navigate(Route::Dashboard)
    }

    /// Shows the document list for one family.
    pub fn load_document_list(&self, kind: DocumentKind) -> Result<(), SdkError> {
        self.navigate(Route::ListDocuments(kind))
    }

    /// Shows the document creation form for one family.
    pub fn load_document_create(&self, kind: DocumentKind) -> Result<(), SdkError> {
        self.navigate(Route::CreateDocument(kind))
    }

    /// Shows one document's detail view. Fails locally, without queueing
    /// anything, when the identifier is empty.
    pub fn load_document_view(&self, document_id: &str) -> Result<(), SdkError> {
        let id = DocumentId::new(document_id)?;
        self.navigate(Route::ViewDocument(id))
    }

    /// Shows the client directory.
    pub fn load_clients(&self) -> Result<(), SdkError> {
        self.navigate(Route::Clients)
    }

    /// Shows one client's detail view. Fails locally when the identifier is
    /// empty.
    pub fn load_client_view(&self, client_id: &str) -> Result<(), SdkError> {
        let id = ClientId::new(client_id)?;
        self.navigate(Route::ViewClient(id))
    }

    /// Shows the payment overview.
    pub fn load_payments(&self) -> Result<(), SdkError> {
        self.navigate(Route::Payments)
    }

    /// Shows the organization settings.
    pub fn load_settings(&self) -> Result<(), SdkError> {
        self.navigate(Route::Settings)
    }

    /// Shows the data exports page.
    pub fn load_exports(&self) -> Result<(), SdkError> {
        self.navigate(Route::Exports)
    }

    /// Shows the price list management page.
    pub fn load_price_lists(&self) -> Result<(), SdkError> {
        self.navigate(Route::PriceLists)
    }
}

// ── Bootstrap task ────────────────────────────────────────────────────────────

/// The outstanding bootstrap: loads the bootstrap resource, then constructs
/// the bridge and drains the pending queue.
///
/// Returned by [`EmbedSdk::initialize`]; the host either awaits it in place
/// or spawns it. Dropping it without running leaves the session parked in
/// `Initializing` forever, which mirrors a bootstrap that never completes.
pub struct BootstrapTask<H: FrameHost, L: BootstrapLoader> {
    inner: Arc<Mutex<SdkInner<H>>>,
    phase_tx: watch::Sender<SdkPhase>,
    config: EmbedConfig,
    loader: L,
    url: Url,
    epoch: u64,
}

impl<H: FrameHost, L: BootstrapLoader> BootstrapTask<H, L> {
    /// Drives the bootstrap to completion.
    ///
    /// On success the bridge is constructed, the pending queue is drained
    /// strictly in call order (per-call failures are diagnostics only), and
    /// the phase becomes `Ready`. On failure the phase becomes `Failed`; the
    /// queue and the frame host are kept so a retry can pick them up.
    ///
    /// # Errors
    ///
    /// The loader's [`BootstrapError`], or [`BootstrapError::Superseded`] if
    /// the facade was shut down while the load was in flight.
    pub async fn run(self) -> Result<(), BootstrapError> {
        let result = self.loader.load(&self.url).await;

        let mut inner = self.inner.lock().expect("lock poisoned");
        if inner.epoch != self.epoch || inner.phase != SdkPhase::Initializing {
            warn!("bootstrap completed after teardown; discarding result");
            return Err(BootstrapError::Superseded);
        }

        match result {
            Ok(()) => {
                let Some(host) = inner.host.take() else {
                    // Unreachable while the invariants hold; treat like a
                    // teardown race rather than corrupting the session.
                    warn!("bootstrap found no frame host; discarding result");
                    return Err(BootstrapError::Superseded);
                };

                let mut bridge = Bridge::new(self.config, host);
                let calls = inner.queue.drain();
                let drained = calls.len();
                for call in calls {
                    bridge.apply(call);
                }
                inner.bridge = Some(bridge);
                inner.phase = SdkPhase::Ready;
                drop(inner);
                let _ = self.phase_tx.send(SdkPhase::Ready);
                info!(drained, "embed bridge ready");
                Ok(())
            }
            Err(error) => {
                inner.phase = SdkPhase::Failed;
                inner.failure = Some(error.clone());
                let pending = inner.queue.len();
                drop(inner);
                let _ = self.phase_tx.send(SdkPhase::Failed);
                warn!(%error, pending, "embed bootstrap failed; queued calls remain pending");
                Err(error)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bootstrap::mock::{FailingBootstrapLoader, InstantBootstrapLoader};
    use crate::infrastructure::frame_host::mock::MockFrameHost;
    use orbit_embed_core::Environment;

    fn config() -> EmbedConfig {
        EmbedConfig::new("t1", Environment::Production, "org1", "div1")
            .with_custom_domain("https://app.example")
    }

    fn sdk() -> EmbedSdk<MockFrameHost> {
        EmbedSdk::new(MockFrameHost::new().with_container("div1"))
    }

    #[test]
    fn test_new_sdk_is_uninitialized_with_empty_queue() {
        let sdk = sdk();
        assert_eq!(sdk.phase(), SdkPhase::Uninitialized);
        assert_eq!(sdk.pending_calls(), 0);
    }

    #[test]
    fn test_calls_before_initialize_are_queued() {
        let sdk = sdk();
        sdk.load_dashboard().unwrap();
        sdk.load_clients().unwrap();
        assert_eq!(sdk.pending_calls(), 2);
        assert_eq!(sdk.phase(), SdkPhase::Uninitialized);
    }

    #[test]
    fn test_initialize_transitions_to_initializing() {
        let sdk = sdk();
        let _task = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();
        assert_eq!(sdk.phase(), SdkPhase::Initializing);
    }

    #[test]
    fn test_second_initialize_is_a_usage_error() {
        // Arrange: one bootstrap outstanding
        let sdk = sdk();
        sdk.load_dashboard().unwrap();
        let _task = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();

        // Act
        let second = sdk.initialize(config(), InstantBootstrapLoader::new());

        // Assert: usage error, first session untouched
        assert!(matches!(second, Err(SdkError::AlreadyInitialized)));
        assert_eq!(sdk.phase(), SdkPhase::Initializing);
        assert_eq!(sdk.pending_calls(), 1);
    }

    #[test]
    fn test_initialize_with_invalid_domain_fails_without_state_change() {
        let sdk = sdk();
        let bad = config().with_custom_domain("not a url");
        let result = sdk.initialize(bad, InstantBootstrapLoader::new());
        assert!(matches!(result, Err(SdkError::Url(_))));
        assert_eq!(sdk.phase(), SdkPhase::Uninitialized);
    }

    #[tokio::test]
    async fn test_bootstrap_loads_resource_from_base_origin() {
        let sdk = sdk();
        let loader = InstantBootstrapLoader::new();
        let task = sdk.initialize(config(), loader.clone()).unwrap();
        task.run().await.unwrap();

        let requested = loader.requested();
        assert_eq!(requested.len(), 1);
        assert_eq!(requested[0].as_str(), "https://app.example/sdk-internal.js");
    }

    #[tokio::test]
    async fn test_successful_bootstrap_becomes_ready_and_drains_queue() {
        // Arrange
        let sdk = sdk();
        sdk.load_dashboard().unwrap();
        let task = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();

        // Act
        task.run().await.unwrap();

        // Assert
        assert_eq!(sdk.phase(), SdkPhase::Ready);
        assert_eq!(sdk.pending_calls(), 0);
        sdk.ready().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_bootstrap_keeps_queue_and_reports_failure() {
        // Arrange
        let sdk = sdk();
        sdk.load_dashboard().unwrap();
        let task = sdk
            .initialize(config(), FailingBootstrapLoader::unreachable())
            .unwrap();

        // Act
        let result = task.run().await;

        // Assert: failure state, queue intact, ready() errors
        assert!(result.is_err());
        assert_eq!(sdk.phase(), SdkPhase::Failed);
        assert_eq!(sdk.pending_calls(), 1);
        assert!(matches!(sdk.ready().await, Err(SdkError::BootstrapFailed(_))));
    }

    #[tokio::test]
    async fn test_retry_after_failed_bootstrap_drains_original_queue() {
        // Arrange: a failed first bootstrap with one queued call
        let sdk = sdk();
        sdk.load_dashboard().unwrap();
        let failed = sdk
            .initialize(config(), FailingBootstrapLoader::unreachable())
            .unwrap();
        let _ = failed.run().await;

        // Act: retry with a working loader
        let retry = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();
        retry.run().await.unwrap();

        // Assert: the originally queued call was replayed
        assert_eq!(sdk.phase(), SdkPhase::Ready);
        assert_eq!(sdk.pending_calls(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_aborts_in_flight_bootstrap() {
        // Arrange
        let sdk = sdk();
        let task = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();

        // Act: tear down before the task runs
        sdk.shutdown();
        let result = task.run().await;

        // Assert
        assert_eq!(result, Err(BootstrapError::Superseded));
        assert_eq!(sdk.phase(), SdkPhase::Uninitialized);
    }

    #[tokio::test]
    async fn test_shutdown_then_reinitialize_works() {
        // Arrange: a full session
        let sdk = sdk();
        let task = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();
        task.run().await.unwrap();
        sdk.load_dashboard().unwrap();

        // Act
        sdk.shutdown();

        // Assert: back to a clean slate, and a fresh session is possible
        assert_eq!(sdk.phase(), SdkPhase::Uninitialized);
        assert_eq!(sdk.pending_calls(), 0);
        let task = sdk.initialize(config(), InstantBootstrapLoader::new()).unwrap();
        task.run().await.unwrap();
        assert_eq!(sdk.phase(), SdkPhase::Ready);
    }

    #[test]
    fn test_document_view_with_empty_id_fails_without_queueing() {
        let sdk = sdk();
        let result = sdk.load_document_view("");
        assert!(matches!(result, Err(SdkError::Route(RouteError::EmptyDocumentId))));
        assert_eq!(sdk.pending_calls(), 0, "nothing may be queued for a bad id");
    }

    #[test]
    fn test_client_view_with_empty_id_fails_without_queueing() {
        let sdk = sdk();
        let result = sdk.load_client_view("  ");
        assert!(matches!(result, Err(SdkError::Route(RouteError::EmptyClientId))));
        assert_eq!(sdk.pending_calls(), 0);
    }

    #[test]
    fn test_message_before_ready_is_inactive() {
        let sdk = sdk();
        let outcome = sdk.handle_message(
            "https://app.example",
            &serde_json::json!({"type": "DOCUMENT_HEIGHT", "payload": {"height": 1}}),
        );
        assert_eq!(outcome, Dispatch::Inactive);
    }
}
