//! Outbound URL construction: navigation targets and the bootstrap resource.
//!
//! A navigation URL is assembled as
//!
//! ```text
//! <base-origin><route-path>?<token-key>=<credential>&sdk=true[&hideHeadMenu=true][&l=<locale>]
//! ```
//!
//! The `sdk=true` marker tells the embedded application it is running inside
//! an SDK-driven embed (it tightens its chrome and enables the notification
//! channel). Optional parameters appear only when configured, in the fixed
//! order above.

use thiserror::Error;
use url::Url;

use crate::domain::config::EmbedConfig;
use crate::domain::routes::Route;

/// File name of the bootstrap script fetched from the base origin.
///
/// Its successful load is the sole readiness signal for the embed session.
pub const BOOTSTRAP_RESOURCE: &str = "sdk-internal.js";

/// Errors raised while building an outbound URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedUrlError {
    /// The configured base origin (usually a custom domain) is not a valid
    /// absolute URL, so no navigation target can be produced from it.
    #[error("invalid base origin \"{0}\"")]
    InvalidBaseOrigin(String),
}

/// Builds the full navigation URL for a route under the given configuration.
///
/// # Errors
///
/// Returns [`EmbedUrlError::InvalidBaseOrigin`] when the configured base
/// origin cannot be parsed. No partial URL is ever produced.
pub fn build_embed_url(config: &EmbedConfig, route: &Route) -> Result<Url, EmbedUrlError> {
    let origin = config.base_origin();
    let full = format!("{}{}", origin, route.path(&config.organization_id));
    let mut url = Url::parse(&full).map_err(|_| EmbedUrlError::InvalidBaseOrigin(origin))?;

    // Query parameters are appended in a fixed order so the produced URLs
    // are stable across runs (and trivially assertable in tests).
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(config.token_param.query_key(), &config.access_token);
        pairs.append_pair("sdk", "true");
        if config.hide_head_menu {
            pairs.append_pair("hideHeadMenu", "true");
        }
        if let Some(locale) = &config.locale {
            pairs.append_pair("l", locale);
        }
    }

    Ok(url)
}

/// Builds the URL of the bootstrap resource for the given configuration.
///
/// # Errors
///
/// Returns [`EmbedUrlError::InvalidBaseOrigin`] when the configured base
/// origin cannot be parsed.
pub fn bootstrap_url(config: &EmbedConfig) -> Result<Url, EmbedUrlError> {
    let origin = config.base_origin();
    Url::parse(&format!("{origin}/{BOOTSTRAP_RESOURCE}"))
        .map_err(|_| EmbedUrlError::InvalidBaseOrigin(origin))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
