/**
 * SQLite Store
 *
 * This module persists the chat room in a SQLite database through sqlx.
 * The schema lives in `migrations/` and is applied on connect.
 *
 * # Tables
 *
 * - `participants (name PRIMARY KEY, last_status)`
 * - `messages (id AUTOINCREMENT, sender, recipient, text, kind, time)`
 *
 * The autoincrement `id` is the insertion sequence used for newest-first
 * ordering; the human-readable `time` column is never sorted on.
 */

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{ChatStore, MessageQuery, StoreError};
use crate::shared::{Message, MessageKind, Participant, BROADCAST};

/// SQLite-backed [`ChatStore`]
#[derive(Debug, Clone)]
pub struct SqlStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    name: String,
    last_status: i64,
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Participant::new(row.name, row.last_status)
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    sender: String,
    recipient: String,
    text: String,
    kind: String,
    time: String,
}

impl TryFrom<MessageRow> for Message {
    type Error = sqlx::Error;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let kind = MessageKind::from_str(&row.kind)
            .map_err(|e| sqlx::Error::Decode(format!("Failed to parse message kind: {}", e).into()))?;
        Ok(Message {
            from: row.sender,
            to: row.recipient,
            text: row.text,
            kind,
            time: row.time,
        })
    }
}

impl SqlStore {
    /// Open (creating if missing) the database at `database_url` and run migrations
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use batepapo::backend::store::SqlStore;
    ///
    /// # async fn example() -> Result<(), batepapo::backend::store::StoreError> {
    /// let store = SqlStore::connect("sqlite://batepapo.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::info!("Database connection pool created successfully");
        Self::from_pool(pool).await
    }

    /// A private in-memory database
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite `:memory:` connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and bring its schema up to date
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ChatStore for SqlStore {
    async fn insert_participant(&self, participant: &Participant) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO participants (name, last_status) VALUES (?, ?)")
            .bind(&participant.name)
            .bind(participant.last_status)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Duplicate {
                key: participant.name.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Participant::from))
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Participant::from).collect())
    }

    async fn touch_participant(&self, name: &str, seen_at: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE participants SET last_status = MAX(last_status, ?) WHERE name = ?",
        )
        .bind(seen_at)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_stale_participants(&self, cutoff: i64) -> Result<Vec<Participant>, StoreError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_status FROM participants WHERE last_status < ? ORDER BY name",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Participant::from).collect())
    }

    async fn remove_participant_if_stale(&self, name: &str, cutoff: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM participants WHERE name = ? AND last_status < ?")
            .bind(name)
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO messages (sender, recipient, text, kind, time)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.from)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .bind(&message.time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_messages(&self, query: &MessageQuery) -> Result<Vec<Message>, StoreError> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = query
            .limit
            .and_then(|l| i64::try_from(l).ok())
            .unwrap_or(-1);
        let user = query.visible_to.as_deref();

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT sender, recipient, text, kind, time
            FROM messages
            WHERE ? IS NULL
               OR recipient = ? OR sender = ?
               OR recipient = ? OR sender = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(user)
        .bind(user)
        .bind(user)
        .bind(BROADCAST)
        .bind(BROADCAST)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Message::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
