//! The closed catalog of navigable pages.
//!
//! Every page the SDK can show is a [`Route`] variant, and every variant
//! renders to a path template parameterized by the organization identifier.
//! Detail routes carry a validated identifier newtype, so a route with a
//! missing or empty resource identifier cannot be constructed in the first
//! place: the "malformed location" failure mode is ruled out at the type
//! level rather than checked at navigation time.

use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors raised while constructing a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A document detail route was requested without a usable identifier.
    #[error("a document identifier is required for this route")]
    EmptyDocumentId,
    /// A client detail route was requested without a usable identifier.
    #[error("a client identifier is required for this route")]
    EmptyClientId,
}

// ── Identifier newtypes ───────────────────────────────────────────────────────

/// A non-empty document identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validates and wraps a document identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyDocumentId`] if the identifier is empty or
    /// whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, RouteError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RouteError::EmptyDocumentId);
        }
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A non-empty client identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Validates and wraps a client identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyClientId`] if the identifier is empty or
    /// whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, RouteError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RouteError::EmptyClientId);
        }
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ── Document families ─────────────────────────────────────────────────────────

/// Document family shown by the list/create document routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    Estimate,
    CreditNote,
    Advance,
}

impl DocumentKind {
    /// The path segment identifying this family in the embedded application.
    pub fn path_segment(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Estimate => "estimate",
            DocumentKind::CreditNote => "credit-note",
            DocumentKind::Advance => "advance",
        }
    }
}

// ── Routes ────────────────────────────────────────────────────────────────────

/// A named destination inside the embedded application.
///
/// The set is closed: adding a page means adding a variant here, and the
/// exhaustive match in [`Route::path`] makes any incomplete handling a
/// compile error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The organization dashboard.
    Dashboard,
    /// Document list for one family (invoices, estimates, ...).
    ListDocuments(DocumentKind),
    /// Document creation form for one family.
    CreateDocument(DocumentKind),
    /// Detail view of a single document.
    ViewDocument(DocumentId),
    /// The client directory.
    Clients,
    /// Detail view of a single client.
    ViewClient(ClientId),
    /// Payment overview.
    Payments,
    /// Organization settings.
    Settings,
    /// Data exports.
    Exports,
    /// Price list management.
    PriceLists,
}

impl Route {
    /// Renders the path for this route under the given organization.
    ///
    /// The result always starts with `/` and never carries a query string;
    /// query parameters are appended by the embed URL builder.
    pub fn path(&self, organization_id: &str) -> String {
        match self {
            Route::Dashboard => format!("/{organization_id}/dashboard"),
            Route::ListDocuments(kind) => {
                format!("/{organization_id}/documents/o/{}", kind.path_segment())
            }
            Route::CreateDocument(kind) => {
                format!("/{organization_id}/documents/o/add/{}", kind.path_segment())
            }
            Route::ViewDocument(id) => {
                format!("/{organization_id}/documents/o/view/{}", id.as_str())
            }
            Route::Clients => format!("/{organization_id}/clients"),
            Route::ViewClient(id) => {
                format!("/{organization_id}/clients/view/{}", id.as_str())
            }
            Route::Payments => format!("/{organization_id}/payments"),
            Route::Settings => format!("/{organization_id}/settings"),
            Route::Exports => format!("/{organization_id}/exports"),
            Route::PriceLists => format!("/{organization_id}/price-lists"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_path() {
        assert_eq!(Route::Dashboard.path("org1"), "/org1/dashboard");
    }

    #[test]
    fn test_list_paths_for_all_document_kinds() {
        assert_eq!(
            Route::ListDocuments(DocumentKind::Invoice).path("org1"),
            "/org1/documents/o/invoice"
        );
        assert_eq!(
            Route::ListDocuments(DocumentKind::Estimate).path("org1"),
            "/org1/documents/o/estimate"
        );
        assert_eq!(
            Route::ListDocuments(DocumentKind::CreditNote).path("org1"),
            "/org1/documents/o/credit-note"
        );
        assert_eq!(
            Route::ListDocuments(DocumentKind::Advance).path("org1"),
            "/org1/documents/o/advance"
        );
    }

    #[test]
    fn test_create_paths_use_add_segment() {
        assert_eq!(
            Route::CreateDocument(DocumentKind::Invoice).path("org1"),
            "/org1/documents/o/add/invoice"
        );
        assert_eq!(
            Route::CreateDocument(DocumentKind::Advance).path("org1"),
            "/org1/documents/o/add/advance"
        );
    }

    #[test]
    fn test_view_document_path_contains_identifier() {
        let id = DocumentId::new("doc-42").unwrap();
        assert_eq!(
            Route::ViewDocument(id).path("org1"),
            "/org1/documents/o/view/doc-42"
        );
    }

    #[test]
    fn test_client_and_misc_paths() {
        assert_eq!(Route::Clients.path("org1"), "/org1/clients");
        assert_eq!(Route::Payments.path("org1"), "/org1/payments");
        assert_eq!(Route::Settings.path("org1"), "/org1/settings");
        assert_eq!(Route::Exports.path("org1"), "/org1/exports");
        assert_eq!(Route::PriceLists.path("org1"), "/org1/price-lists");
    }

    #[test]
    fn test_view_client_path_contains_identifier() {
        let id = ClientId::new("cl-7").unwrap();
        assert_eq!(Route::ViewClient(id).path("org1"), "/org1/clients/view/cl-7");
    }

    #[test]
    fn test_empty_document_id_is_rejected() {
        assert_eq!(DocumentId::new(""), Err(RouteError::EmptyDocumentId));
    }

    #[test]
    fn test_whitespace_document_id_is_rejected() {
        assert_eq!(DocumentId::new("   "), Err(RouteError::EmptyDocumentId));
    }

    #[test]
    fn test_empty_client_id_is_rejected() {
        assert_eq!(ClientId::new(""), Err(RouteError::EmptyClientId));
    }

    #[test]
    fn test_valid_identifiers_round_trip() {
        assert_eq!(DocumentId::new("abc").unwrap().as_str(), "abc");
        assert_eq!(ClientId::new("xyz").unwrap().as_str(), "xyz");
    }
}
