//! Feed store
//!
//! Key-ordered collection of posts, newest first. Every mutation
//! read-modify-writes the in-memory collection and then persists the
//! whole feed through the storage port; a storage failure surfaces to
//! the caller and is never retried here.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use postup_core::ContentNode;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::post::Post;
use crate::storage::PostStorage;
use crate::Result;

/// Partial edit applied to an existing post.
///
/// Only the content-bearing fields are editable; identity, authorship
/// and like state are owned by their dedicated operations.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub content: Option<String>,
    pub html_content: Option<String>,
    pub editor_state: Option<ContentNode>,
}

/// The post feed, ordered newest first.
pub struct FeedStore<S: PostStorage> {
    posts: IndexMap<Uuid, Post>,
    storage: S,
    last_updated: Option<DateTime<Utc>>,
}

impl<S: PostStorage> FeedStore<S> {
    /// Create an empty feed over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self {
            posts: IndexMap::new(),
            storage,
            last_updated: None,
        }
    }

    /// Create a feed hydrated from the storage backend.
    pub fn load(storage: S) -> Result<Self> {
        let posts = storage.load_all()?;
        debug!(count = posts.len(), "loaded feed from storage");
        Ok(Self {
            posts: posts.into_iter().map(|p| (p.id, p)).collect(),
            storage,
            last_updated: None,
        })
    }

    /// Insert a post at the front of the feed.
    ///
    /// Returns `false` without persisting when a post with the same id
    /// is already present, so replays on startup cannot duplicate.
    pub fn add(&mut self, post: Post) -> Result<bool> {
        if self.posts.contains_key(&post.id) {
            debug!(id = %post.id, "skipping duplicate post");
            return Ok(false);
        }
        let id = post.id;
        self.posts.shift_insert(0, id, post);
        self.commit()?;
        debug!(id = %id, "post added");
        Ok(true)
    }

    /// Apply a partial edit to an existing post. Returns `false` when
    /// the id is unknown.
    pub fn update(&mut self, id: Uuid, patch: PostUpdate) -> Result<bool> {
        let Some(post) = self.posts.get_mut(&id) else {
            warn!(id = %id, "update for unknown post");
            return Ok(false);
        };
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(html) = patch.html_content {
            post.html_content = html;
        }
        if let Some(tree) = patch.editor_state {
            post.editor_state = tree;
        }
        self.commit()?;
        debug!(id = %id, "post updated");
        Ok(true)
    }

    /// Delete a post by id, preserving the order of the rest. Returns
    /// `false` when the id is unknown.
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        if self.posts.shift_remove(&id).is_none() {
            return Ok(false);
        }
        self.commit()?;
        debug!(id = %id, "post removed");
        Ok(true)
    }

    /// Flip the like flag, adjusting the counter. Returns the new
    /// liked state, or `None` when the id is unknown. The counter
    /// never goes below zero.
    pub fn toggle_like(&mut self, id: Uuid) -> Result<Option<bool>> {
        let Some(post) = self.posts.get_mut(&id) else {
            return Ok(None);
        };
        post.is_liked = !post.is_liked;
        if post.is_liked {
            post.likes += 1;
        } else {
            post.likes = post.likes.saturating_sub(1);
        }
        let liked = post.is_liked;
        self.commit()?;
        debug!(id = %id, liked, "like toggled");
        Ok(Some(liked))
    }

    /// Replace the whole feed, e.g. from a future sync channel.
    pub fn replace_all(&mut self, posts: Vec<Post>) -> Result<()> {
        self.posts = posts.into_iter().map(|p| (p.id, p)).collect();
        self.commit()?;
        debug!(count = self.posts.len(), "feed replaced");
        Ok(())
    }

    /// Drop every post and persist the empty feed.
    pub fn clear(&mut self) -> Result<()> {
        self.posts.clear();
        self.commit()?;
        debug!("feed cleared");
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Posts in feed order, newest first.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Time of the last successful mutation, if any.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    fn commit(&mut self) -> Result<()> {
        let snapshot: Vec<Post> = self.posts.values().cloned().collect();
        self.storage.save_all(&snapshot)?;
        self.last_updated = Some(Utc::now());
        Ok(())
    }
}
