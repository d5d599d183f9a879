//! Chat widget behavior with scripted transports.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use mofy_admin::chat::protocol::{ChatReply, ChatRequest, EMPTY_REPLY, GREETING, OFFLINE_REPLY};
use mofy_admin::chat::{ChatMessage, ChatSession, ChatTransport, ChatWidget, Role, SendOutcome};
use mofy_admin::error::{ClientError, Result};
use mofy_admin::store::{LocalStore, keys};

/// Answers every request with a fixed reply and counts calls.
struct Scripted {
    reply: Option<ChatReply>,
    calls: AtomicUsize,
}

impl Scripted {
    fn answering(message: Option<&str>, response: Option<&str>) -> Self {
        Self {
            reply: Some(ChatReply {
                message: message.map(str::to_string),
                response: response.map(str::to_string),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    fn offline() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ChatTransport for Scripted {
    async fn send(&self, _request: &ChatRequest) -> Result<ChatReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| ClientError::validation("connection refused"))
    }
}

/// Holds the reply until the test releases it.
struct Gated {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    calls: AtomicUsize,
}

impl ChatTransport for Gated {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(ChatReply {
            message: Some(format!("echo: {}", request.message)),
            response: None,
        })
    }
}

fn widget<T: ChatTransport>(transport: T, store: &LocalStore) -> ChatWidget<T> {
    ChatWidget::new(transport, ChatSession::load(store.clone()).unwrap())
}

#[test]
fn test_new_session_starts_with_greeting_and_user_id() {
    let store = LocalStore::in_memory();
    let session = ChatSession::load(store.clone()).unwrap();

    assert_eq!(session.messages(), [ChatMessage::greeting()]);
    assert_eq!(session.messages()[0].content, GREETING);
    assert!(session.user_id().starts_with("user-"));
    assert_eq!(session.user_id().rsplit('-').next().map(str::len), Some(9));
    assert_eq!(
        store.get_raw(keys::CHAT_USER_ID).as_deref(),
        Some(session.user_id())
    );
    // The greeting alone is not persisted.
    assert!(!store.exists(keys::CHAT_MESSAGES));
}

#[test]
fn test_user_id_survives_reload() {
    let store = LocalStore::in_memory();
    let first = ChatSession::load(store.clone()).unwrap();
    let second = ChatSession::load(store).unwrap();
    assert_eq!(first.user_id(), second.user_id());
}

#[test]
fn test_corrupt_history_falls_back_to_greeting() {
    let store = LocalStore::in_memory();
    store.set_raw(keys::CHAT_MESSAGES, "{not json").unwrap();

    let session = ChatSession::load(store).unwrap();

    assert_eq!(session.messages(), [ChatMessage::greeting()]);
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let store = LocalStore::in_memory();
    let transport = Scripted::answering(Some("hi"), None);
    let chat = widget(transport, &store);

    assert_eq!(chat.send("   ").await, SendOutcome::Empty);
    assert_eq!(chat.messages().len(), 1);
}

#[tokio::test]
async fn test_reply_prefers_message_then_response() {
    let store = LocalStore::in_memory();
    let chat = widget(Scripted::answering(Some(""), Some("Harga mulai 2.5jt")), &store);

    let outcome = chat.send("  Berapa harganya?  ").await;

    assert_eq!(
        outcome,
        SendOutcome::Replied(ChatMessage::bot("Harga mulai 2.5jt"))
    );
    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1], ChatMessage::user("Berapa harganya?"));
    assert!(!chat.is_loading());
}

#[tokio::test]
async fn test_empty_reply_uses_placeholder() {
    let store = LocalStore::in_memory();
    let chat = widget(Scripted::answering(None, None), &store);

    let outcome = chat.send("halo").await;

    assert_eq!(outcome, SendOutcome::Replied(ChatMessage::bot(EMPTY_REPLY)));
}

#[tokio::test]
async fn test_transport_failure_appends_offline_message() {
    let store = LocalStore::in_memory();
    let chat = widget(Scripted::offline(), &store);

    let outcome = chat.send("halo").await;

    assert_eq!(outcome, SendOutcome::Fallback(ChatMessage::bot(OFFLINE_REPLY)));
    let last = chat.messages().pop().unwrap();
    assert_eq!(last.role, Role::Bot);
    assert_eq!(last.content, OFFLINE_REPLY);
    assert!(!chat.is_loading());
}

#[tokio::test]
async fn test_second_send_while_waiting_is_busy() {
    let store = LocalStore::in_memory();
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let chat = Arc::new(widget(
        Gated {
            entered: entered.clone(),
            release: release.clone(),
            calls: AtomicUsize::new(0),
        },
        &store,
    ));

    let first = tokio::spawn({
        let chat = chat.clone();
        async move { chat.send("pertama").await }
    });
    entered.notified().await;

    assert!(chat.is_loading());
    assert_eq!(chat.send("kedua").await, SendOutcome::Busy);

    release.notify_one();
    let outcome = first.await.unwrap();

    assert_eq!(
        outcome,
        SendOutcome::Replied(ChatMessage::bot("echo: pertama"))
    );
    assert!(!chat.is_loading());
    let contents: Vec<String> = chat.messages().into_iter().map(|m| m.content).collect();
    assert_eq!(contents, [GREETING, "pertama", "echo: pertama"]);
}

#[tokio::test]
async fn test_history_persists_and_clear_resets() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let chat = widget(Scripted::answering(Some("Siap!"), None), &store);
    chat.send("Bisa bikin toko online?").await;
    let user_id = chat.user_id();
    drop(chat);

    // A fresh process reading the same file sees the conversation.
    let reopened = LocalStore::open(dir.path()).unwrap();
    let session = ChatSession::load(reopened.clone()).unwrap();
    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.user_id(), user_id);

    let chat = ChatWidget::new(Scripted::answering(None, None), session);
    chat.clear();

    assert_eq!(chat.messages(), [ChatMessage::greeting()]);
    assert!(!reopened.exists(keys::CHAT_MESSAGES));
    assert_eq!(chat.user_id(), user_id);
}

#[test]
fn test_toggle_flips_open_state() {
    let chat = widget(Scripted::offline(), &LocalStore::in_memory());
    assert!(!chat.is_open());
    assert!(chat.toggle());
    assert!(chat.is_open());
    assert!(!chat.toggle());
}

#[test]
fn test_request_serializes_camel_case() {
    let request = ChatRequest::new("halo", "user-1-abc");
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["message"], "halo");
    assert_eq!(value["userId"], "user-1-abc");
    assert!(value["timestamp"].is_string());
}
