//! The media-library collaborator boundary.

use async_trait::async_trait;
use cull_core::{AccessLevel, MediaItem};
use thiserror::Error;

/// Error returned by the media library when an operation is rejected.
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("media library access denied")]
    AccessDenied,
    #[error("unknown media item: {0}")]
    UnknownItem(String),
    #[error("media library backend error: {0}")]
    Backend(String),
}

/// A decoded image at a requested resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// The platform media library. Implemented by the host against the real
/// photo store; tests use an in-memory mock.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Enumerate available items, newest first.
    async fn fetch_all(&self) -> Result<Vec<MediaItem>, MediaError>;

    /// Permanently delete an item. Irreversible.
    async fn delete(&self, item: &MediaItem) -> Result<(), MediaError>;

    /// Flip the favorite flag on an item.
    async fn toggle_favorite(&self, item: &MediaItem) -> Result<(), MediaError>;

    /// Fetch a decoded image at roughly `target_size`. Best-effort:
    /// `Ok(None)` when the image cannot be produced.
    async fn load_image(
        &self,
        item: &MediaItem,
        target_size: (u32, u32),
    ) -> Result<Option<DecodedImage>, MediaError>;

    /// Current authorization state, without prompting.
    fn authorization(&self) -> AccessLevel;

    /// Prompt the user for access and report the resulting state.
    async fn request_access(&self) -> AccessLevel;
}
