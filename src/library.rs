//! Video library seam: folder/item models and the provider trait.
//!
//! The on-device (or remote) media index is an external collaborator. This
//! crate only consumes the locator strings it yields, so the provider is a
//! trait with a single enumeration method.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single playable video file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    /// Opaque locator handed to the playback session (content URI or URL).
    pub locator: String,
    /// Display name of the file.
    pub name: String,
    /// Duration in milliseconds, if the index knows it.
    pub duration_ms: i64,
    /// Name of the parent folder containing the video.
    pub folder_name: String,
}

/// A folder grouping playable items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoFolder {
    /// Stable folder identifier from the backing index.
    pub id: i64,
    /// Display name of the folder.
    pub name: String,
    /// The items within this folder.
    pub videos: Vec<VideoItem>,
}

/// Capability to enumerate playable media grouped by folder.
#[async_trait]
pub trait VideoLibraryProvider: Send + Sync {
    /// List all folders and their items.
    async fn list_folders(&self) -> Result<Vec<VideoFolder>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_round_trips_through_json() {
        let folder = VideoFolder {
            id: 7,
            name: "Camera".into(),
            videos: vec![VideoItem {
                locator: "content://media/external/video/42".into(),
                name: "clip.mp4".into(),
                duration_ms: 61_000,
                folder_name: "Camera".into(),
            }],
        };

        let json = serde_json::to_string(&folder).unwrap();
        let back: VideoFolder = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 7);
        assert_eq!(back.videos.len(), 1);
        assert_eq!(back.videos[0].duration_ms, 61_000);
    }
}
