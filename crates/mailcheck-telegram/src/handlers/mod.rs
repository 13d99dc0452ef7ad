//! Telegram update handlers.
//!
//! Each handler turns a teloxide update into an `Interaction` and hands it to
//! the front end. Failures are logged here and never returned to the
//! dispatcher: every per-message error already ended in a rendered reply, or
//! the reply itself could not be delivered.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use mailcheck_core::domain::{ChatId, Interaction, UserId};

use crate::router::AppState;

mod callback;
mod commands;
mod text;

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(q, state).await
}

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(ix) = interaction_from_message(&msg) else {
        return Ok(());
    };

    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(&ix, text, state).await;
        }
    }

    // Non-text messages go through the same gate; a caption may carry emails.
    let text = msg.text().or(msg.caption()).unwrap_or("");
    text::handle_text(&ix, text, state).await
}

fn interaction_from_message(msg: &Message) -> Option<Interaction> {
    let user = msg.from()?;
    Some(Interaction::message(
        UserId(user.id.0 as i64),
        ChatId(msg.chat.id.0),
    ))
}

pub(crate) fn log_failure(what: &str, ix: &Interaction, result: mailcheck_core::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(
            user = ix.user_id.0,
            chat = ix.chat_id().0,
            error = %e,
            "{what} failed"
        );
    }
}
