//! Command handler implementations (/start, /help)

use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode};

use super::types::HandlerError;
use crate::telegram::messages;
use crate::telegram::Bot;

/// Handle /start command
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, messages::WELCOME)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Handle /help command
pub(super) async fn handle_help_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, messages::HELP)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
