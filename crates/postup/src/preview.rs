//! Link preview resolution
//!
//! Maps a pasted URL to the thumbnail and title shown on its preview
//! card. Resolution works on the URL string alone; no network fetch
//! happens here.

use once_cell::sync::Lazy;
use regex::Regex;

use postup_core::{ContentNode, PreviewKind};

static YOUTUBE_VIDEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]+)").unwrap());

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/120x80?text=Link";

/// Resolved card contents for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewData {
    pub url: String,
    pub image: String,
    pub title: String,
}

impl PreviewData {
    /// Build the preview leaf node for this card.
    pub fn into_node(self, kind: PreviewKind) -> ContentNode {
        ContentNode::link_preview(self.url, self.image, kind)
    }
}

/// Resolve preview data for a URL.
///
/// YouTube links get the video's hosted thumbnail; everything else
/// falls back to a generic placeholder card.
pub fn resolve_preview(url: &str) -> PreviewData {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        let video_id = YOUTUBE_VIDEO_ID
            .captures(url)
            .map(|caps| caps[1].to_string())
            .or_else(|| {
                url.rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            });

        if let Some(id) = video_id {
            return PreviewData {
                url: url.to_string(),
                image: format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"),
                title: "YouTube Video".to_string(),
            };
        }
    }

    PreviewData {
        url: url.to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
        title: url.to_string(),
    }
}
