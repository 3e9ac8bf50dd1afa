//! Bootstrap-resource loading.
//!
//! The embed session becomes ready only after the bootstrap resource
//! (`<base-origin>/sdk-internal.js`) has been fetched successfully; that load
//! is the sole readiness signal. [`BootstrapLoader`] abstracts the fetch so
//! the facade's state machine can be driven by a real HTTP client in
//! production and by the instant/failing mocks in tests.

use std::future::Future;

use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod mock;

/// Errors raised while loading the bootstrap resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The resource could not be reached at all (DNS, TCP, TLS failures).
    #[error("bootstrap resource {url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },
    /// The server answered with a non-success status.
    #[error("bootstrap resource {url} returned status {status}")]
    BadStatus { url: String, status: u16 },
    /// The facade was torn down while this bootstrap was in flight.
    #[error("bootstrap superseded by facade teardown")]
    Superseded,
}

/// Fetches the bootstrap resource.
///
/// The returned future is `Send` so a host may drive the bootstrap task on a
/// multi-threaded runtime or spawn it outright.
pub trait BootstrapLoader: Send {
    /// Loads the resource at `url`; `Ok(())` means the session may become ready.
    fn load(&self, url: &Url) -> impl Future<Output = Result<(), BootstrapError>> + Send;
}

/// Production loader: a plain HTTP GET of the bootstrap script.
///
/// Any 2xx answer counts as a successful load; the body is not interpreted
/// (the resource exists to prove the deployment is reachable and serving).
#[derive(Debug, Clone, Default)]
pub struct HttpBootstrapLoader {
    client: reqwest::Client,
}

impl HttpBootstrapLoader {
    /// Creates a loader with a default HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl BootstrapLoader for HttpBootstrapLoader {
    async fn load(&self, url: &Url) -> Result<(), BootstrapError> {
        debug!(%url, "fetching bootstrap resource");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| BootstrapError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BootstrapError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        debug!(%url, "bootstrap resource loaded");
        Ok(())
    }
}
