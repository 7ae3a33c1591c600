//! Message board
//!
//! Reads and writes the room's message log on behalf of participants.
//! Every call goes straight to the store; nothing is cached here.

use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::presence::clock::Clock;
use crate::backend::store::{ChatStore, MessageQuery};
use crate::shared::validation::{check_limit, require_non_empty};
use crate::shared::{Message, MessageKind, SendMessageRequest};

#[derive(Clone)]
pub struct MessageBoard {
    store: Arc<dyn ChatStore>,
    clock: Arc<dyn Clock>,
}

impl MessageBoard {
    pub fn new(store: Arc<dyn ChatStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Messages `user` may see, newest first
    ///
    /// A message is visible when it is addressed to `user`, sent by `user`,
    /// or addressed to / authored as "Todos". `limit`, when given, must be a
    /// positive integer.
    pub async fn list_visible(
        &self,
        user: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, BackendError> {
        let user = require_non_empty("user", user)?;
        let limit = limit.map(check_limit).transpose()?;

        let messages = self
            .store
            .find_messages(&MessageQuery::visible_to(user).with_limit(limit))
            .await?;

        Ok(messages)
    }

    /// Post a message from `from`
    ///
    /// # Errors
    ///
    /// * `SharedError` - `to` or `text` empty, or `type` is not
    ///   `message`/`private_message`
    /// * `UnknownSender` - `from` is not in the room
    ///
    /// Nothing is stored when an error is returned.
    pub async fn send(
        &self,
        from: &str,
        request: SendMessageRequest,
    ) -> Result<Message, BackendError> {
        let from = require_non_empty("user", from)?;
        let to = require_non_empty("to", &request.to)?;
        let text = require_non_empty("text", &request.text)?;
        let kind: MessageKind = request.kind.trim().parse()?;
        if !kind.is_user_sendable() {
            return Err(BackendError::validation(
                "type",
                "must be 'message' or 'private_message'",
            ));
        }

        if self.store.find_participant(&from).await?.is_none() {
            return Err(BackendError::unknown_sender(from));
        }

        let message = Message::new(from, to, text, kind, self.clock.now());
        self.store.insert_message(&message).await?;

        tracing::debug!("{} -> {} ({})", message.from, message.to, message.kind);
        Ok(message)
    }
}
