use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::chat::protocol::ChatMessage;
use crate::store::{LocalStore, StoreError, keys};

/// Conversation history plus the per-browser user id, persisted in the
/// local store.
///
/// Init reads both keys (generating the id on first use). Teardown is
/// [`ChatSession::clear`], which drops the stored history but keeps the id.
#[derive(Debug)]
pub struct ChatSession {
    store: LocalStore,
    user_id: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn load(store: LocalStore) -> Result<Self, StoreError> {
        let user_id = match store.get_raw(keys::CHAT_USER_ID) {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                let id = generate_user_id();
                store.set_raw(keys::CHAT_USER_ID, id.clone())?;
                debug!("Generated chat user id {id}");
                id
            }
        };

        let messages = match store.get::<Vec<ChatMessage>>(keys::CHAT_MESSAGES) {
            Ok(Some(saved)) if !saved.is_empty() => saved,
            Ok(_) => vec![ChatMessage::greeting()],
            Err(e) => {
                warn!("Discarding unreadable chat history: {e}");
                vec![ChatMessage::greeting()]
            }
        };

        Ok(Self {
            store,
            user_id,
            messages,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a message and persist the history once it holds more than
    /// the greeting.
    pub fn push(&mut self, message: ChatMessage) -> Result<(), StoreError> {
        self.messages.push(message);
        if self.messages.len() > 1 {
            self.store.set(keys::CHAT_MESSAGES, &self.messages)?;
        }
        Ok(())
    }

    /// Back to the greeting only; the stored history is removed.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.messages = vec![ChatMessage::greeting()];
        self.store.remove(keys::CHAT_MESSAGES)
    }
}

/// `user-<unix millis>-<9 random chars>`.
fn generate_user_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("user-{}-{}", Utc::now().timestamp_millis(), &random[..9])
}
