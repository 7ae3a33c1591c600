//! Store Module
//!
//! The chat room keeps two collections: `participants` and `messages`.
//! Everything the server knows lives in a [`ChatStore`]; the presence
//! tracker and the message board hold no state of their own and re-read the
//! store on every call.
//!
//! # Implementations
//!
//! - **`memory`** - `MemoryStore`, collections behind `tokio::sync::RwLock`
//! - **`sql`** - `SqlStore`, a SQLite database accessed through sqlx
//!
//! # Consistency
//!
//! Each operation is atomic on its own. Multi-step work such as "check the
//! sender exists, then insert the message" is not transactional. The one
//! exception callers can rely on is [`ChatStore::remove_participant_if_stale`],
//! which only deletes a participant whose `last_status` is still older than
//! the cutoff at the moment of the delete.

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::{Message, Participant};

pub mod memory;
pub mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// Errors produced by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key already exists
    #[error("Duplicate key: {key}")]
    Duplicate { key: String },

    /// The database driver failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migrations could not be applied
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Filter, sort and limit for [`ChatStore::find_messages`]
///
/// Results are always newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageQuery {
    /// Only messages visible to this name; `None` returns every message
    pub visible_to: Option<String>,
    /// Maximum number of messages returned
    pub limit: Option<usize>,
}

impl MessageQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn visible_to(user: impl Into<String>) -> Self {
        Self {
            visible_to: Some(user.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Document-store operations needed by the chat room
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Insert a participant; fails with [`StoreError::Duplicate`] if the name exists
    async fn insert_participant(&self, participant: &Participant) -> Result<(), StoreError>;

    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError>;

    /// All participants ordered by name
    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError>;

    /// Raise `last_status` to `seen_at` (never lowers it)
    ///
    /// Returns `false` if no participant has that name.
    async fn touch_participant(&self, name: &str, seen_at: i64) -> Result<bool, StoreError>;

    /// Participants with `last_status < cutoff`, ordered by name
    async fn find_stale_participants(&self, cutoff: i64) -> Result<Vec<Participant>, StoreError>;

    /// Delete `name` only if its `last_status` is still `< cutoff`
    ///
    /// Returns whether a participant was removed.
    async fn remove_participant_if_stale(&self, name: &str, cutoff: i64) -> Result<bool, StoreError>;

    /// Append a message to the log
    async fn insert_message(&self, message: &Message) -> Result<(), StoreError>;

    /// Messages matching `query`, newest first
    async fn find_messages(&self, query: &MessageQuery) -> Result<Vec<Message>, StoreError>;

    /// Release connections held by the backend
    async fn close(&self) {}
}
