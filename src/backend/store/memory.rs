use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ChatStore, MessageQuery, StoreError};
use crate::shared::{Message, Participant};

/// In-process store used when no database is configured
///
/// Messages are kept in insertion order; reads walk the log backwards.
#[derive(Debug, Default)]
pub struct MemoryStore {
    participants: RwLock<BTreeMap<String, Participant>>,
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn insert_participant(&self, participant: &Participant) -> Result<(), StoreError> {
        let mut participants = self.participants.write().await;
        if participants.contains_key(&participant.name) {
            return Err(StoreError::Duplicate {
                key: participant.name.clone(),
            });
        }
        participants.insert(participant.name.clone(), participant.clone());
        Ok(())
    }

    async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        Ok(self.participants.read().await.get(name).cloned())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        Ok(self.participants.read().await.values().cloned().collect())
    }

    async fn touch_participant(&self, name: &str, seen_at: i64) -> Result<bool, StoreError> {
        match self.participants.write().await.get_mut(name) {
            Some(participant) => {
                participant.last_status = participant.last_status.max(seen_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_stale_participants(&self, cutoff: i64) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .participants
            .read()
            .await
            .values()
            .filter(|p| p.is_stale(cutoff))
            .cloned()
            .collect())
    }

    async fn remove_participant_if_stale(&self, name: &str, cutoff: i64) -> Result<bool, StoreError> {
        let mut participants = self.participants.write().await;
        let stale = participants
            .get(name)
            .map(|p| p.is_stale(cutoff))
            .unwrap_or(false);
        if stale {
            participants.remove(name);
        }
        Ok(stale)
    }

    async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn find_messages(&self, query: &MessageQuery) -> Result<Vec<Message>, StoreError> {
        let messages = self.messages.read().await;
        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(messages
            .iter()
            .rev()
            .filter(|m| match &query.visible_to {
                Some(user) => m.is_visible_to(user),
                None => true,
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
