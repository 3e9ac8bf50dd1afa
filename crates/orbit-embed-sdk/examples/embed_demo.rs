//! End-to-end walkthrough of the embed SDK lifecycle.
//!
//! Stands in for a host application: it builds a facade over a logging frame
//! host, issues calls before initialization (they queue), bootstraps against
//! a real deployment, and reacts to a typed event.
//!
//! ```sh
//! cargo run --example embed_demo -- https://app.orbit.localhost:4200
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use orbit_embed_core::{DocumentKind, EmbedConfig, Environment, EventKind};
use orbit_embed_sdk::{
    EmbedSdk, FrameHost, FrameSpec, HostError, HttpBootstrapLoader,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// A frame host that only logs what a real embedding integration would do.
struct LoggingFrameHost;

impl FrameHost for LoggingFrameHost {
    fn mount_frame(&mut self, container_id: &str, spec: &FrameSpec) -> Result<(), HostError> {
        info!(container_id, title = %spec.title, "mounting embed frame");
        Ok(())
    }

    fn set_frame_url(&mut self, url: &Url) -> Result<(), HostError> {
        info!(%url, "frame navigated");
        Ok(())
    }

    fn set_frame_height(&mut self, height_px: u32) -> Result<(), HostError> {
        info!(height_px, "frame resized");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let custom_domain = std::env::args().nth(1);

    let sdk = EmbedSdk::new(LoggingFrameHost);

    // Calls made before initialization are queued, in order.
    sdk.load_dashboard()?;
    sdk.add_listener(
        EventKind::InvoiceCreated,
        Arc::new(|envelope| {
            info!(payload = ?envelope.payload, "invoice created in the embedded app");
        }),
    );
    info!(pending = sdk.pending_calls(), "calls queued before bootstrap");

    let mut config = EmbedConfig::new(
        std::env::var("ORBIT_ACCESS_TOKEN").context("ORBIT_ACCESS_TOKEN must be set")?,
        Environment::Production,
        "demo-org",
        "orbit-embed-container",
    )
    .with_hide_head_menu(true);
    if let Some(domain) = custom_domain {
        config = config.with_custom_domain(domain);
    }

    let task = sdk.initialize(config, HttpBootstrapLoader::new())?;
    tokio::spawn(task.run());

    sdk.ready().await?;
    info!("embed session ready; queued calls have been replayed");

    // From here on calls forward synchronously.
    sdk.load_document_create(DocumentKind::Invoice)?;

    sdk.shutdown();
    Ok(())
}
