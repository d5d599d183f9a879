use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::chat::protocol::{ChatMessage, ChatReply, ChatRequest, EMPTY_REPLY, OFFLINE_REPLY};
use crate::chat::session::ChatSession;
use crate::error::{BackendError, ClientError, Result};

/// Delivers one chat message and returns the bot's answer.
pub trait ChatTransport {
    fn send(&self, request: &ChatRequest) -> impl Future<Output = Result<ChatReply>> + Send;
}

/// Posts to the external chat webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

impl ChatTransport for WebhookClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Backend(BackendError::from_body(
                status.as_u16(),
                &body,
            )));
        }
        Ok(response.json::<ChatReply>().await?)
    }
}

/// What happened to a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing sent.
    Empty,
    /// Another message is still waiting for its reply; nothing sent.
    Busy,
    /// The webhook answered (possibly with the empty-reply message).
    Replied(ChatMessage),
    /// The webhook failed; the offline message was appended instead.
    Fallback(ChatMessage),
}

/// Clears the in-flight flag on every exit path.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Floating chat: one outstanding request at a time, history persisted
/// through the injected [`ChatSession`].
pub struct ChatWidget<T> {
    transport: T,
    session: Mutex<ChatSession>,
    in_flight: AtomicBool,
    open: AtomicBool,
}

impl<T: ChatTransport> ChatWidget<T> {
    pub fn new(transport: T, session: ChatSession) -> Self {
        Self {
            transport,
            session: Mutex::new(session),
            in_flight: AtomicBool::new(false),
            open: AtomicBool::new(false),
        }
    }

    fn session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Flip the panel open/closed; returns the new state.
    pub fn toggle(&self) -> bool {
        !self.open.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.session().messages().to_vec()
    }

    pub fn user_id(&self) -> String {
        self.session().user_id().to_string()
    }

    fn record(&self, message: ChatMessage) {
        if let Err(e) = self.session().push(message) {
            warn!("Chat history not persisted: {e}");
        }
    }

    /// Send `input` to the webhook and append the answer.
    ///
    /// Never fails: transport errors become the offline message.
    pub async fn send(&self, input: &str) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Empty;
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            debug!("Chat send ignored while a reply is pending");
            return SendOutcome::Busy;
        };

        self.record(ChatMessage::user(text));
        let request = ChatRequest::new(text, self.user_id());

        match self.transport.send(&request).await {
            Ok(reply) => {
                let message = ChatMessage::bot(reply.text().unwrap_or(EMPTY_REPLY));
                self.record(message.clone());
                SendOutcome::Replied(message)
            }
            Err(e) => {
                warn!("Chat webhook failed: {e}");
                let message = ChatMessage::bot(OFFLINE_REPLY);
                self.record(message.clone());
                SendOutcome::Fallback(message)
            }
        }
    }

    /// Reset to the greeting and forget the stored history.
    pub fn clear(&self) {
        if let Err(e) = self.session().clear() {
            warn!("Chat history not cleared from storage: {e}");
        }
    }
}
