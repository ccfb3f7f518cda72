//! Persistence port
//!
//! The feed rewrites its full collection on every mutation, so the
//! port is intentionally narrow: load everything, save everything.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::post::Post;

/// Error type for storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed feed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable storage for the whole feed.
///
/// `save_all` must be atomic per call: either the full collection is
/// written or the previous contents survive. Last writer wins.
pub trait PostStorage {
    fn load_all(&self) -> Result<Vec<Post>, StorageError>;
    fn save_all(&self, posts: &[Post]) -> Result<(), StorageError>;
}

/// In-memory backend modelling a single durable-storage key.
///
/// The feed is held as its serialized JSON form, exactly as a
/// key-value store would keep it.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized contents of the storage slot, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl PostStorage for MemoryStorage {
    fn load_all(&self) -> Result<Vec<Post>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_all(&self, posts: &[Post]) -> Result<(), StorageError> {
        let json = serde_json::to_string(posts)?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }
}

/// File-backed storage: one JSON array, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PostStorage for JsonFileStorage {
    fn load_all(&self) -> Result<Vec<Post>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn save_all(&self, posts: &[Post]) -> Result<(), StorageError> {
        let json = serde_json::to_string(posts)?;
        // Write to a sibling file first so a failed write cannot
        // truncate the previous feed.
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Author;
    use postup_core::ContentNode;

    fn sample_posts() -> Vec<Post> {
        vec![
            Post::new(
                "one",
                "<p>one</p>",
                ContentNode::root(vec![]),
                Author::new("Ada", "a.png"),
            ),
            Post::new(
                "two",
                "<p>two</p>",
                ContentNode::root(vec![]),
                Author::new("Ada", "a.png"),
            ),
        ]
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load_all().unwrap().is_empty());

        let posts = sample_posts();
        storage.save_all(&posts).unwrap();
        assert_eq!(storage.load_all().unwrap(), posts);
    }

    #[test]
    fn test_memory_storage_overwrites_on_save() {
        let storage = MemoryStorage::new();
        let posts = sample_posts();
        storage.save_all(&posts).unwrap();
        storage.save_all(&posts[..1]).unwrap();
        assert_eq!(storage.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("posts.json"));
        assert!(storage.load_all().unwrap().is_empty());

        let posts = sample_posts();
        storage.save_all(&posts).unwrap();
        assert_eq!(storage.load_all().unwrap(), posts);
    }

    #[test]
    fn test_file_storage_empty_file_is_empty_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "").unwrap();
        let storage = JsonFileStorage::new(path);
        assert!(storage.load_all().unwrap().is_empty());
    }
}
