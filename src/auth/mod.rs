pub mod jwt;
pub mod session;

pub use session::AuthSession;
