//! Menu button presses

use teloxide::prelude::*;
use teloxide::types::CallbackQuery;

use super::types::{HandlerDeps, HandlerError};
use crate::core::error::AppResult;
use crate::download::request::DownloadRequest;
use crate::telegram::downloads::{download_playlist, download_single};
use crate::telegram::menu::MenuAction;
use crate::telegram::messages;
use crate::telegram::sink::{ChatSink, TelegramSink};
use crate::telegram::Bot;

/// Handle a callback query from the download menu
pub(super) async fn handle_menu_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> Result<(), HandlerError> {
    bot.answer_callback_query(q.id.clone()).await?;

    // Buttons on messages older than 48h arrive without the message
    let Some(message) = q.message.as_ref() else {
        log::debug!("Callback from {} without an accessible message", q.from.id);
        return Ok(());
    };
    let sink = TelegramSink::new(bot.clone(), message.chat().id, message.id());

    log::info!("Menu selection in chat {}", message.chat().id);
    handle_menu_selection(&sink, &deps, q.data.as_deref()).await?;
    Ok(())
}

/// What a menu selection led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Payload could not be parsed
    Invalid,
    /// Token is not in the session cache
    Expired,
    /// Single download ran; `true` when the file reached the chat
    Single(bool),
    /// Playlist fan-out ran and delivered this many files
    Playlist(usize),
}

/// Parses a callback payload, resolves its session and runs the chosen flow.
pub async fn handle_menu_selection<S>(sink: &S, deps: &HandlerDeps, data: Option<&str>) -> AppResult<SelectionOutcome>
where
    S: ChatSink + ?Sized,
{
    let Some(action) = data.and_then(MenuAction::parse) else {
        log::warn!("Invalid callback payload: {:?}", data);
        sink.set_status(messages::INVALID_SELECTION).await?;
        return Ok(SelectionOutcome::Invalid);
    };

    let Some(url) = deps.sessions.resolve(action.token()) else {
        log::info!("Session {} is not known", action.token());
        sink.set_status(messages::SESSION_EXPIRED).await?;
        return Ok(SelectionOutcome::Expired);
    };

    log::info!("Selected {:?} for {}", action, url);

    let outcome = match action {
        MenuAction::Single { kind, quality, .. } => {
            let request = DownloadRequest::new(url, kind, quality, false);
            SelectionOutcome::Single(download_single(deps.downloader.as_ref(), sink, request).await)
        }
        MenuAction::Playlist { kind, .. } => {
            let outcome = download_playlist(deps.downloader.as_ref(), sink, &url, kind).await;
            SelectionOutcome::Playlist(outcome.delivered)
        }
    };
    Ok(outcome)
}
