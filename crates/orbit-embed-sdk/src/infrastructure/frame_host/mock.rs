//! Mock frame host for testing.
//!
//! Records every mount, navigation, and resize so tests can assert the exact
//! sequence of host interactions without any real display surface.

use std::collections::HashSet;

use url::Url;

use super::{FrameHost, FrameSpec, HostError};

/// An in-memory [`FrameHost`] with a configurable set of known containers.
pub struct MockFrameHost {
    containers: HashSet<String>,
    mounted_in: Option<String>,
    mounted_spec: Option<FrameSpec>,
    mount_count: u32,
    url_history: Vec<Url>,
    height_px: Option<u32>,
}

impl MockFrameHost {
    /// Creates a mock host knowing no containers (every mount fails).
    pub fn new() -> Self {
        Self {
            containers: HashSet::new(),
            mounted_in: None,
            mounted_spec: None,
            mount_count: 0,
            url_history: Vec::new(),
            height_px: None,
        }
    }

    /// Adds a container the host will accept mounts into.
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.containers.insert(container_id.into());
        self
    }

    /// The container the frame was mounted in, if any.
    pub fn mounted_in(&self) -> Option<&str> {
        self.mounted_in.as_deref()
    }

    /// The spec the frame was mounted with, if any.
    pub fn mounted_spec(&self) -> Option<&FrameSpec> {
        self.mounted_spec.as_ref()
    }

    /// How many times `mount_frame` succeeded.
    pub fn mount_count(&self) -> u32 {
        self.mount_count
    }

    /// Every URL ever assigned to the frame, in order.
    pub fn url_history(&self) -> &[Url] {
        &self.url_history
    }

    /// The frame's current URL, if any navigation happened.
    pub fn current_url(&self) -> Option<&Url> {
        self.url_history.last()
    }

    /// The last applied height, if any.
    pub fn height_px(&self) -> Option<u32> {
        self.height_px
    }
}

impl Default for MockFrameHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost for MockFrameHost {
    fn mount_frame(&mut self, container_id: &str, spec: &FrameSpec) -> Result<(), HostError> {
        if !self.containers.contains(container_id) {
            return Err(HostError::ContainerNotFound(container_id.to_string()));
        }
        self.mounted_in = Some(container_id.to_string());
        self.mounted_spec = Some(spec.clone());
        self.mount_count += 1;
        Ok(())
    }

    fn set_frame_url(&mut self, url: &Url) -> Result<(), HostError> {
        if self.mounted_in.is_none() {
            return Err(HostError::FrameNotMounted);
        }
        self.url_history.push(url.clone());
        Ok(())
    }

    fn set_frame_height(&mut self, height_px: u32) -> Result<(), HostError> {
        if self.mounted_in.is_none() {
            return Err(HostError::FrameNotMounted);
        }
        self.height_px = Some(height_px);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
