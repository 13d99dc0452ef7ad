//! Telegram adapter (teloxide).
//!
//! `TelegramMessenger` delivers front-end replies over the Bot API; `router`
//! and `handlers` carry Telegram updates the other way.

use std::future::IntoFuture;

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    RequestError,
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use mailcheck_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::InlineKeyboard},
    Result,
};

/// Flood-control waits honoured per request before the call fails.
const FLOOD_RETRIES: usize = 1;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// `sendMessage` in HTML mode, optionally with buttons under it.
    async fn send(
        &self,
        chat_id: ChatId,
        html: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageRef> {
        let chat = teloxide::types::ChatId(chat_id.0);
        let sent = call_with_flood_retry("sendMessage", || {
            let req = self
                .bot
                .send_message(chat, html.to_string())
                .parse_mode(ParseMode::Html);
            match markup.clone() {
                Some(markup) => req.reply_markup(markup),
                None => req,
            }
        })
        .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(sent.id.0),
        })
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.send(chat_id, html, None).await
    }

    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<()> {
        let chat = teloxide::types::ChatId(msg.chat_id.0);
        let id = teloxide::types::MessageId(msg.message_id.0);
        call_with_flood_retry("editMessageText", || {
            self.bot
                .edit_message_text(chat, id, html.to_string())
                .parse_mode(ParseMode::Html)
        })
        .await?;
        Ok(())
    }

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef> {
        self.send(chat_id, html, Some(keyboard_markup(keyboard)))
            .await
    }

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        call_with_flood_retry("answerCallbackQuery", || {
            let req = self.bot.answer_callback_query(callback_id.to_string());
            match text {
                Some(text) => req.text(text.to_string()),
                None => req,
            }
        })
        .await?;
        Ok(())
    }
}

/// One callback button per row, in menu order.
fn keyboard_markup(keyboard: InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        keyboard
            .buttons
            .into_iter()
            .map(|b| vec![InlineKeyboardButton::callback(b.label, b.callback_data)]),
    )
}

/// Runs a Bot API request, waiting out a 429 `RetryAfter` at most
/// `FLOOD_RETRIES` times.
async fn call_with_flood_retry<T, R>(
    method: &'static str,
    mut request: impl FnMut() -> R,
) -> Result<T>
where
    R: IntoFuture<Output = std::result::Result<T, RequestError>>,
    R::IntoFuture: Send,
{
    let mut waits = 0usize;
    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(RequestError::RetryAfter(wait)) if waits < FLOOD_RETRIES => {
                waits += 1;
                tracing::warn!(method, wait = ?wait, "telegram flood control, retrying");
                sleep(wait).await;
            }
            Err(e) => return Err(port_error(method, e)),
        }
    }
}

fn port_error(method: &str, e: RequestError) -> Error {
    Error::External(format!("telegram {method} failed: {e}"))
}
