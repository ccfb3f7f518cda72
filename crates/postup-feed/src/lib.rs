//! postup-feed - the published-post feed
//!
//! A key-ordered collection of [`Post`] records (newest first) that
//! rewrites its full contents through an injected [`PostStorage`] port
//! after every mutation. Persistence is atomic per mutation with
//! last-writer-wins semantics; there is no conflict resolution.
//!
//! # Example
//!
//! ```rust
//! use postup_feed::{Author, FeedStore, MemoryStorage, Post};
//! use postup_core::ContentNode;
//!
//! let mut feed = FeedStore::new(MemoryStorage::new());
//! let author = Author::new("Ada", "https://example.com/ada.png");
//! let tree = ContentNode::root(vec![]);
//! let post = Post::new("hello", "<p>hello</p>", tree, author);
//!
//! feed.add(post).unwrap();
//! assert_eq!(feed.len(), 1);
//! ```

mod post;
mod storage;
mod store;

pub use post::{Author, Post};
pub use storage::{JsonFileStorage, MemoryStorage, PostStorage, StorageError};
pub use store::{FeedStore, PostUpdate};

/// Error type for feed operations
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, FeedError>;
