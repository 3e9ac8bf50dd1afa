//! Mock bootstrap loaders for testing.
//!
//! [`InstantBootstrapLoader`] completes immediately and records the URL it
//! was asked to fetch; [`FailingBootstrapLoader`] fails immediately with a
//! configurable error. Both let lifecycle tests drive the facade's state
//! machine deterministically, without any network.

use std::sync::{Arc, Mutex};

use url::Url;

use super::{BootstrapError, BootstrapLoader};

/// A loader that always succeeds, immediately.
#[derive(Clone, Default)]
pub struct InstantBootstrapLoader {
    requested: Arc<Mutex<Vec<Url>>>,
}

impl InstantBootstrapLoader {
    /// Creates a new instant loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL this loader was asked to fetch, in order.
    pub fn requested(&self) -> Vec<Url> {
        self.requested.lock().expect("lock poisoned").clone()
    }
}

impl BootstrapLoader for InstantBootstrapLoader {
    async fn load(&self, url: &Url) -> Result<(), BootstrapError> {
        self.requested.lock().expect("lock poisoned").push(url.clone());
        Ok(())
    }
}

/// A loader that always fails, immediately.
#[derive(Clone)]
pub struct FailingBootstrapLoader {
    error: BootstrapError,
}

impl FailingBootstrapLoader {
    /// Creates a loader failing with the given error.
    pub fn new(error: BootstrapError) -> Self {
        Self { error }
    }

    /// Creates a loader failing as if the resource were unreachable.
    pub fn unreachable() -> Self {
        Self::new(BootstrapError::Unreachable {
            url: "https://app.example/sdk-internal.js".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

impl BootstrapLoader for FailingBootstrapLoader {
    async fn load(&self, _url: &Url) -> Result<(), BootstrapError> {
        Err(self.error.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
