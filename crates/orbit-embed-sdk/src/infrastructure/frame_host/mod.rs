//! The embedding seam: mounting and manipulating the frame.
//!
//! The SDK itself never touches a concrete display surface. Everything it
//! needs from the host environment is behind [`FrameHost`]: mount one frame
//! into a named container, point it at a URL, set its rendered height. A
//! browser-backed integration implements this against its document API; unit
//! and integration tests use [`mock::MockFrameHost`].
//!
//! # Frame ownership
//!
//! The bridge owns exactly one frame per session. It is mounted lazily on the
//! first navigation and reused afterwards (navigation re-assigns the URL,
//! never re-mounts). Tearing the frame down together with its container is
//! the host's business, outside this seam.

use thiserror::Error;
use url::Url;

pub mod mock;

/// Visual contract of the embed frame.
///
/// The frame fills its container completely and carries no border of its
/// own; sizing is the container's job (plus the auto-resize behavior).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    /// Fixed accessibility title of the frame element.
    pub title: String,
    /// CSS width, always relative to the container.
    pub width: String,
    /// CSS height, always relative to the container.
    pub height: String,
    /// Frames are borderless; the host surface decides any visual chrome.
    pub borderless: bool,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            title: "Orbit Embed".to_string(),
            width: "100%".to_string(),
            height: "100%".to_string(),
            borderless: true,
        }
    }
}

/// Errors surfaced by a frame host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The configured container element does not exist in the host surface.
    #[error("container element \"{0}\" not found")]
    ContainerNotFound(String),
    /// A frame operation was requested before any frame was mounted.
    #[error("no frame has been mounted yet")]
    FrameNotMounted,
    /// The host backend failed in an environment-specific way.
    #[error("host backend error: {0}")]
    Backend(String),
}

/// Operations the SDK needs from the embedding environment.
///
/// Implementations may assume single ownership: the bridge serializes all
/// calls, so no interior synchronization is required.
pub trait FrameHost: Send {
    /// Mounts the embed frame as a child of the named container.
    ///
    /// Called at most once per session (the bridge guards against
    /// re-mounting).
    ///
    /// # Errors
    ///
    /// [`HostError::ContainerNotFound`] if the container does not exist; in
    /// that case no frame may be created.
    fn mount_frame(&mut self, container_id: &str, spec: &FrameSpec) -> Result<(), HostError>;

    /// Points the mounted frame at a new location.
    ///
    /// # Errors
    ///
    /// [`HostError::FrameNotMounted`] if no frame exists yet.
    fn set_frame_url(&mut self, url: &Url) -> Result<(), HostError>;

    /// Sets the frame's rendered height in pixels.
    ///
    /// # Errors
    ///
    /// [`HostError::FrameNotMounted`] if no frame exists yet.
    fn set_frame_height(&mut self, height_px: u32) -> Result<(), HostError>;
}
