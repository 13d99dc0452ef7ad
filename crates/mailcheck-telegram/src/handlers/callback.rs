use std::sync::Arc;

use teloxide::prelude::*;

use mailcheck_core::{
    domain::{ChatId, Interaction, MessageId, MessageRef, UserId},
    frontend::Action,
};

use crate::handlers::log_failure;
use crate::router::AppState;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    let data = q.data.clone().unwrap_or_default();
    let action = Action::from_callback_data(&data);

    // Always answer so the client stops its spinner.
    let answer = if action.is_some() {
        None
    } else {
        Some("Unknown action")
    };
    if let Err(e) = state.messenger.answer_callback_query(&q.id, answer).await {
        tracing::warn!(error = %e, "failed to answer callback query");
    }

    let (Some(action), Some(msg)) = (action, q.message.as_ref()) else {
        return Ok(());
    };

    let ix = Interaction::button(
        UserId(q.from.id.0 as i64),
        MessageRef {
            chat_id: ChatId(msg.chat.id.0),
            message_id: MessageId(msg.id.0),
        },
    );

    let result = state.frontend.dispatch(&ix, action).await;
    log_failure(&format!("button {data}"), &ix, result);
    Ok(())
}
