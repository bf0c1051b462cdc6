//! Telegram bot integration and handlers

pub mod bot;
pub mod cache;
pub mod downloads;
pub mod handlers;
pub mod menu;
pub mod messages;
pub mod sink;

pub use teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use cache::{SessionCache, SessionToken};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use sink::{ChatSink, TelegramSink};
