use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use mailcheck_core::{
    config::Config, frontend::FrontEnd, messaging::port::MessagingPort, ports::CheckService,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub frontend: Arc<FrontEnd>,
    pub messenger: Arc<dyn MessagingPort>,
}

/// Dispatcher queue key: updates of one chat (messages and button presses)
/// are handled one at a time, different chats run in parallel.
pub fn chat_key(update: &Update) -> Option<teloxide::types::ChatId> {
    update.chat().map(|chat| chat.id)
}

/// Long-poll Telegram until the process is interrupted (Ctrl-C).
pub async fn run_polling(cfg: Arc<Config>, service: Arc<dyn CheckService>) -> anyhow::Result<()> {
    let token = cfg
        .telegram_bot_token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("TELEGRAM_BOT_TOKEN is not configured"))?;
    let bot = Bot::new(token);

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot started"),
        Err(e) => tracing::warn!(error = %e, "getMe failed; continuing"),
    }
    tracing::info!(service_url = %cfg.service_url, "forwarding checks");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let frontend = Arc::new(FrontEnd::new(
        service,
        messenger.clone(),
        cfg.telegram_safe_limit,
    ));

    let state = Arc::new(AppState {
        frontend,
        messenger,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .distribution_function(chat_key)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("bot stopped");
    Ok(())
}
