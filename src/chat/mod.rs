pub mod protocol;
pub mod session;
pub mod widget;

pub use protocol::{ChatMessage, Role};
pub use session::ChatSession;
pub use widget::{ChatTransport, ChatWidget, SendOutcome, WebhookClient};
