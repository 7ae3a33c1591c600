/**
 * Presence Tracker
 *
 * Keeps the set of participants in the room and their last-seen times.
 *
 * # Operations
 *
 * - `join` - enter the room, writing an "entrou na sala..." status message
 * - `heartbeat` - refresh `last_status`
 * - `reap` - remove everyone silent for longer than a threshold, writing one
 *   "sai da sala..." status message per removed participant
 *
 * # Reap vs. heartbeat
 *
 * `reap` scans for stale participants and then deletes each one with a
 * conditional delete on `last_status`. A heartbeat that commits after the
 * scan but before the delete keeps the participant in the room, and no
 * departure message is written for it.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::backend::error::BackendError;
use crate::backend::presence::clock::Clock;
use crate::backend::store::{ChatStore, StoreError};
use crate::shared::message::{JOIN_TEXT, LEAVE_TEXT};
use crate::shared::validation::require_non_empty;
use crate::shared::{Message, Participant};

/// Tracks who is in the room
///
/// Cheap to clone; clones share the same store and clock.
#[derive(Clone)]
pub struct PresenceTracker {
    store: Arc<dyn ChatStore>,
    clock: Arc<dyn Clock>,
}

impl PresenceTracker {
    pub fn new(store: Arc<dyn ChatStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Enter the room as `name`
    ///
    /// # Errors
    ///
    /// * `SharedError` - `name` is empty after trimming
    /// * `Conflict` - a participant with this name is already present
    pub async fn join(&self, name: &str) -> Result<Participant, BackendError> {
        let name = require_non_empty("name", name)?;

        if self.store.find_participant(&name).await?.is_some() {
            return Err(BackendError::conflict(name));
        }

        let now = self.clock.now();
        let participant = Participant::new(name.clone(), now.timestamp_millis());
        match self.store.insert_participant(&participant).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => return Err(BackendError::conflict(name)),
            Err(e) => return Err(e.into()),
        }

        self.store
            .insert_message(&Message::status(name.clone(), JOIN_TEXT, now))
            .await?;

        tracing::info!("{} joined the room", name);
        Ok(participant)
    }

    /// Mark `name` as still active
    ///
    /// # Errors
    ///
    /// * `NotFound` - no participant with this name is present
    pub async fn heartbeat(&self, name: &str) -> Result<(), BackendError> {
        let name = name.trim();
        let touched = self
            .store
            .touch_participant(name, self.clock.now_millis())
            .await?;

        if !touched {
            return Err(BackendError::not_found(name));
        }

        tracing::trace!("Heartbeat from {}", name);
        Ok(())
    }

    /// Remove participants whose `last_status` is older than `now - threshold`
    ///
    /// Returns the names removed with their departure message written. When a
    /// departure write fails the participant row is put back unchanged, so it
    /// is still stale on the next pass and gets retried; the rest of the pass
    /// carries on.
    pub async fn reap(&self, threshold: Duration) -> Result<Vec<String>, BackendError> {
        let now = self.clock.now();
        let threshold_ms = i64::try_from(threshold.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.timestamp_millis().saturating_sub(threshold_ms);

        let stale = self.store.find_stale_participants(cutoff).await?;
        let mut removed = Vec::with_capacity(stale.len());

        for participant in stale {
            if !self
                .store
                .remove_participant_if_stale(&participant.name, cutoff)
                .await?
            {
                tracing::debug!(
                    "{} was refreshed before removal, keeping it",
                    participant.name
                );
                continue;
            }

            let departure = Message::status(participant.name.clone(), LEAVE_TEXT, now);
            if let Err(e) = self.store.insert_message(&departure).await {
                tracing::error!(
                    "Failed to write departure for {}: {}",
                    participant.name,
                    e
                );
                self.restore(&participant).await;
                continue;
            }

            tracing::info!("{} left the room (inactive)", participant.name);
            removed.push(participant.name);
        }

        Ok(removed)
    }

    /// Put back a participant whose departure could not be written
    async fn restore(&self, participant: &Participant) {
        match self.store.insert_participant(participant).await {
            Ok(()) => tracing::warn!("{} kept in the room until the next reap", participant.name),
            Err(StoreError::Duplicate { .. }) => {
                tracing::debug!("{} rejoined before it could be restored", participant.name)
            }
            Err(e) => tracing::error!("Failed to restore {}: {}", participant.name, e),
        }
    }

    /// Everyone currently in the room
    pub async fn list_participants(&self) -> Result<Vec<Participant>, BackendError> {
        Ok(self.store.list_participants().await?)
    }

    /// Whether `name` is currently in the room
    pub async fn is_present(&self, name: &str) -> Result<bool, BackendError> {
        Ok(self.store.find_participant(name).await?.is_some())
    }
}
