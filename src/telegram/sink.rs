//! Where download flows report to.
//!
//! A flow owns one status message that it keeps editing, may post standalone
//! notices, and delivers files. [`TelegramSink`] does this through the Bot
//! API; tests record the calls instead.

use crate::core::error::AppResult;
use crate::download::executor::DownloadedFile;
use crate::download::request::MediaKind;
use crate::telegram::messages;
use crate::telegram::Bot;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};
use teloxide::{ApiError, RequestError};

#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Replaces the text of the status message.
    async fn set_status(&self, text: &str) -> AppResult<()>;

    /// Posts a separate message to the chat.
    async fn notify(&self, text: &str) -> AppResult<()>;

    /// Uploads a downloaded file as audio or video.
    async fn send_file(&self, file: &DownloadedFile, kind: MediaKind) -> AppResult<()>;
}

/// [`ChatSink`] bound to one chat and one status message
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
    status_message: MessageId,
}

impl TelegramSink {
    pub fn new(bot: Bot, chat_id: ChatId, status_message: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            status_message,
        }
    }
}

#[async_trait]
impl ChatSink for TelegramSink {
    async fn set_status(&self, text: &str) -> AppResult<()> {
        match self
            .bot
            .edit_message_text(self.chat_id, self.status_message, text)
            .await
        {
            Ok(_) => Ok(()),
            // Same text twice in a row
            Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn notify(&self, text: &str) -> AppResult<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_file(&self, file: &DownloadedFile, kind: MediaKind) -> AppResult<()> {
        let input = InputFile::file(file.path().to_path_buf());
        match kind {
            MediaKind::Audio => {
                self.bot
                    .send_audio(self.chat_id, input)
                    .title(file.title())
                    .caption(messages::AUDIO_CAPTION)
                    .await?;
            }
            MediaKind::Video => {
                self.bot
                    .send_video(self.chat_id, input)
                    .caption(messages::VIDEO_CAPTION)
                    .supports_streaming(true)
                    .await?;
            }
        }
        log::info!("Sent {} to chat {}", file.file_name(), self.chat_id);
        Ok(())
    }
}
