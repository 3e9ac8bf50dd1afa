//! Embed configuration types.
//!
//! [`EmbedConfig`] is the single source of truth for all runtime settings of
//! an embed session. The host application builds it once, hands it to
//! `initialize`, and it is never mutated afterwards.
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads) makes the SDK easy to embed in tests and lets a single
//! process host several independent configurations if it ever needs to.

/// Which deployment of the Orbit application the embed should point at.
///
/// Each environment maps to a fixed base origin. A [`EmbedConfig::custom_domain`]
/// overrides the environment-derived origin entirely, which is how
/// white-labelled deployments are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// The hosted production deployment.
    #[default]
    Production,
    /// A locally running development server.
    Local,
}

impl Environment {
    /// Returns the base origin (scheme + host + port) for this environment.
    pub fn base_origin(&self) -> &'static str {
        match self {
            Environment::Production => "https://app.orbitinvoice.io",
            Environment::Local => "http://localhost:4200",
        }
    }
}

/// Spelling of the credential query parameter.
///
/// The embedded application accepted `accessToken` in its first protocol
/// revision and `access_token` in a later one. The two revisions are live
/// simultaneously, so the spelling is selectable rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenParam {
    /// `accessToken` (the original revision; the default).
    #[default]
    CamelCase,
    /// `access_token` (the later revision).
    SnakeCase,
}

impl TokenParam {
    /// Returns the query-string key for this revision.
    pub fn query_key(&self) -> &'static str {
        match self {
            TokenParam::CamelCase => "accessToken",
            TokenParam::SnakeCase => "access_token",
        }
    }
}

/// All settings for one embed session.
///
/// Construct with [`EmbedConfig::new`] and refine with the `with_*` helpers:
///
/// ```rust
/// use orbit_embed_core::{EmbedConfig, Environment};
///
/// let cfg = EmbedConfig::new("tok-123", Environment::Production, "org-1", "embed-div")
///     .with_hide_head_menu(true)
///     .with_locale("de");
/// assert_eq!(cfg.base_origin(), "https://app.orbitinvoice.io");
/// ```
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Credential forwarded to the embedded application as a query parameter.
    pub access_token: String,
    /// Deployment the embed points at (ignored when `custom_domain` is set).
    pub environment: Environment,
    /// Organization whose pages are shown; the first path segment of every route.
    pub organization_id: String,
    /// Identifier of the host-provided container element the frame is mounted in.
    pub container_id: String,
    /// Suppress the embedded application's own header/navigation chrome.
    pub hide_head_menu: bool,
    /// Disable the built-in frame auto-resize behavior.
    pub disable_auto_height: bool,
    /// Overrides the environment-derived base origin (white-label deployments).
    /// A trailing `/` is tolerated and stripped.
    pub custom_domain: Option<String>,
    /// BCP 47 locale code passed to the embedded application (`l=` parameter).
    pub locale: Option<String>,
    /// Spelling of the credential query parameter.
    pub token_param: TokenParam,
}

impl EmbedConfig {
    /// Creates a configuration with the four required fields; all optional
    /// behavior starts disabled.
    pub fn new(
        access_token: impl Into<String>,
        environment: Environment,
        organization_id: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            environment,
            organization_id: organization_id.into(),
            container_id: container_id.into(),
            hide_head_menu: false,
            disable_auto_height: false,
            custom_domain: None,
            locale: None,
            token_param: TokenParam::default(),
        }
    }

    /// Suppresses the embedded application's header chrome.
    pub fn with_hide_head_menu(mut self, hide: bool) -> Self {
        self.hide_head_menu = hide;
        self
    }

    /// Disables the built-in auto-resize behavior.
    pub fn with_disable_auto_height(mut self, disable: bool) -> Self {
        self.disable_auto_height = disable;
        self
    }

    /// Points the embed at a custom domain instead of the environment origin.
    pub fn with_custom_domain(mut self, domain: impl Into<String>) -> Self {
        self.custom_domain = Some(domain.into());
        self
    }

    /// Sets the locale passed to the embedded application.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Selects the credential query-parameter spelling.
    pub fn with_token_param(mut self, param: TokenParam) -> Self {
        self.token_param = param;
        self
    }

    /// The base origin embedded content is expected to run under.
    ///
    /// This is both the prefix of every navigation URL and the sole trust
    /// boundary for inbound messages: anything whose declared origin does not
    /// exactly equal this string is ignored.
    pub fn base_origin(&self) -> String {
        match &self.custom_domain {
            Some(domain) => domain.trim_end_matches('/').to_string(),
            None => self.environment.base_origin().to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> EmbedConfig {
        EmbedConfig::new("t1", Environment::Production, "org1", "div1")
    }

    #[test]
    fn test_production_base_origin() {
        assert_eq!(
            Environment::Production.base_origin(),
            "https://app.orbitinvoice.io"
        );
    }

    #[test]
    fn test_local_base_origin() {
        assert_eq!(Environment::Local.base_origin(), "http://localhost:4200");
    }

    #[test]
    fn test_default_environment_is_production() {
        assert_eq!(Environment::default(), Environment::Production);
    }

    #[test]
    fn test_token_param_default_is_camel_case() {
        // The original protocol revision spelled the parameter `accessToken`.
        assert_eq!(TokenParam::default().query_key(), "accessToken");
    }

    #[test]
    fn test_token_param_snake_case_key() {
        assert_eq!(TokenParam::SnakeCase.query_key(), "access_token");
    }

    #[test]
    fn test_new_config_has_optional_behavior_disabled() {
        let cfg = base_config();
        assert!(!cfg.hide_head_menu);
        assert!(!cfg.disable_auto_height);
        assert!(cfg.custom_domain.is_none());
        assert!(cfg.locale.is_none());
    }

    #[test]
    fn test_base_origin_from_environment() {
        let cfg = base_config();
        assert_eq!(cfg.base_origin(), "https://app.orbitinvoice.io");
    }

    #[test]
    fn test_custom_domain_overrides_environment() {
        let cfg = base_config().with_custom_domain("https://billing.acme.com");
        assert_eq!(cfg.base_origin(), "https://billing.acme.com");
    }

    #[test]
    fn test_custom_domain_trailing_slash_is_stripped() {
        // Hosts routinely paste a domain with a trailing slash; a double
        // slash in the final URL would break the expected-origin comparison.
        let cfg = base_config().with_custom_domain("https://billing.acme.com/");
        assert_eq!(cfg.base_origin(), "https://billing.acme.com");
    }

    #[test]
    fn test_with_helpers_set_fields() {
        let cfg = base_config()
            .with_hide_head_menu(true)
            .with_disable_auto_height(true)
            .with_locale("fr")
            .with_token_param(TokenParam::SnakeCase);
        assert!(cfg.hide_head_menu);
        assert!(cfg.disable_auto_height);
        assert_eq!(cfg.locale.as_deref(), Some("fr"));
        assert_eq!(cfg.token_param, TokenParam::SnakeCase);
    }

    #[test]
    fn test_config_can_be_cloned() {
        // Cloneability is required so the facade can hand the configuration
        // to the bootstrap task while keeping its own copy.
        let cfg = base_config();
        let cloned = cfg.clone();
        assert_eq!(cfg.access_token, cloned.access_token);
        assert_eq!(cfg.container_id, cloned.container_id);
    }
}
