//! Post records
//!
//! The persisted JSON layout keeps camelCase keys so feeds written by
//! earlier clients keep loading unchanged.

use chrono::{DateTime, Utc};
use postup_core::ContentNode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display identity attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

impl Author {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// A published post.
///
/// Built whole at publish time and inserted atomically into the feed;
/// the only in-place mutations afterwards are like toggles and content
/// edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,

    /// Plain-text projection of the document tree
    pub content: String,

    /// HTML projection used by read-only renderers
    pub html_content: String,

    /// Round-trippable document tree, kept for re-editing
    pub editor_state: ContentNode,

    pub author: Author,

    /// Publish time, persisted as an ISO-8601 string
    pub timestamp: DateTime<Utc>,

    pub likes: u32,

    pub is_liked: bool,
}

impl Post {
    /// Build a fresh post with a generated id and the current time.
    pub fn new(
        content: impl Into<String>,
        html_content: impl Into<String>,
        editor_state: ContentNode,
        author: Author,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            html_content: html_content.into(),
            editor_state,
            author,
            timestamp: Utc::now(),
            likes: 0,
            is_liked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post::new(
            "hello",
            "<p>hello</p>",
            ContentNode::root(vec![ContentNode::paragraph(vec![
                ContentNode::plain_text("hello"),
            ])]),
            Author::new("Ada", "https://example.com/ada.png"),
        )
    }

    #[test]
    fn test_new_post_starts_unliked() {
        let post = sample_post();
        assert_eq!(post.likes, 0);
        assert!(!post.is_liked);
    }

    #[test]
    fn test_persisted_layout_uses_camel_case_keys() {
        let post = sample_post();
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("htmlContent").is_some());
        assert!(json.get("editorState").is_some());
        assert!(json.get("isLiked").is_some());
        assert!(json["author"].get("name").is_some());
        assert!(json["author"].get("avatar").is_some());
        // Timestamp persists as an ISO-8601 string.
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_round_trip() {
        let post = sample_post();
        let json = serde_json::to_string(&post).unwrap();
        let parsed: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, post);
    }
}
