pub mod api;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod portfolio;
pub mod store;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{ClientError, Result};
