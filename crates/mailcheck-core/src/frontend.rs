//! Conversational front end: menu, session gate, batch submission, rendering.
//!
//! Handlers take an `Interaction` and reply through `MessagingPort`, so they
//! never depend on the chat transport's own update types.

use std::sync::Arc;

use crate::{
    domain::{Interaction, ReplyTarget},
    emails::extract_emails,
    errors::Error,
    formatting::{render_error, render_results, split_lines},
    messaging::{port::MessagingPort, types::InlineKeyboard},
    ports::CheckService,
    session::SessionStore,
    Result,
};

pub mod replies {
    pub const MENU: &str = "🎉 Hello! I'm your email verification bot.\n\n\
Use the buttons below to get started 👇";

    pub const PROMPT: &str = "📨 Please send the email(s) you want to check.";

    pub const CANCELLED: &str = "❌ Email check canceled.";

    pub const HELP: &str = "ℹ️ <b>How to use this bot:</b>\n\n\
1. Tap '✅ Start Email Check' (or send /check) to begin.\n\
2. Send a list of email addresses (comma or newline-separated).\n\
3. The bot will check if they're flagged or active.\n\n\
Tap '❌ Cancel' (/cancel) to cancel.\n\
Tap '📡 Status' (/status) to check backend health.";

    pub const NOT_STARTED: &str = "❗ Please press '✅ Start Email Check' first.";

    pub const NO_VALID_EMAILS: &str = "⚠ Please send valid email addresses.";

    pub const BACKEND_UP: &str = "✅ Backend is up and running!";
    pub const BACKEND_ERROR: &str = "⚠ Backend returned an error.";
    pub const BACKEND_UNREACHABLE: &str = "❌ Could not reach backend.";

    pub const UNKNOWN_COMMAND: &str = "🤔 Unknown command. Send /start to see what I can do.";

    pub fn checking(count: usize) -> String {
        let noun = if count == 1 { "email" } else { "emails" };
        format!("🔍 Checking {count} {noun}...")
    }
}

/// Menu entries and commands the front end understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    BeginCheck,
    Help,
    Cancel,
    Status,
}

impl Action {
    /// `/start`, `/check`, `/help`, `/cancel`, `/status` (name without slash).
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Action::Start),
            "check" => Some(Action::BeginCheck),
            "help" => Some(Action::Help),
            "cancel" => Some(Action::Cancel),
            "status" => Some(Action::Status),
            _ => None,
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "check" => Some(Action::BeginCheck),
            "help" => Some(Action::Help),
            "cancel" => Some(Action::Cancel),
            "status" => Some(Action::Status),
            _ => None,
        }
    }
}

pub fn menu_keyboard() -> InlineKeyboard {
    InlineKeyboard::one_per_row([
        ("✅ Start Email Check", "check"),
        ("ℹ️ Help", "help"),
        ("❌ Cancel", "cancel"),
        ("📡 Status", "status"),
    ])
}

pub struct FrontEnd {
    sessions: SessionStore,
    service: Arc<dyn CheckService>,
    messenger: Arc<dyn MessagingPort>,
    message_limit: usize,
}

impl FrontEnd {
    pub fn new(
        service: Arc<dyn CheckService>,
        messenger: Arc<dyn MessagingPort>,
        message_limit: usize,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            service,
            messenger,
            message_limit,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn dispatch(&self, ix: &Interaction, action: Action) -> Result<()> {
        match action {
            Action::Start => self.on_start(ix).await,
            Action::BeginCheck => self.on_begin_check(ix).await,
            Action::Help => self.on_help(ix).await,
            Action::Cancel => self.on_cancel(ix).await,
            Action::Status => self.on_status_query(ix).await,
        }
    }

    pub async fn on_start(&self, ix: &Interaction) -> Result<()> {
        self.messenger
            .send_inline_keyboard(ix.chat_id(), replies::MENU, menu_keyboard())
            .await?;
        Ok(())
    }

    pub async fn on_begin_check(&self, ix: &Interaction) -> Result<()> {
        self.sessions.begin(ix.user_id).await;
        self.reply(ix, replies::PROMPT).await
    }

    pub async fn on_cancel(&self, ix: &Interaction) -> Result<()> {
        self.sessions.clear(ix.user_id).await;
        self.reply(ix, replies::CANCELLED).await
    }

    pub async fn on_help(&self, ix: &Interaction) -> Result<()> {
        self.reply(ix, replies::HELP).await
    }

    pub async fn on_status_query(&self, ix: &Interaction) -> Result<()> {
        let msg = match self.service.status().await {
            Ok(()) => replies::BACKEND_UP,
            Err(e @ (Error::Status { .. } | Error::Unauthorized)) => {
                tracing::warn!(error = %e, "service status probe failed");
                replies::BACKEND_ERROR
            }
            Err(e) => {
                tracing::warn!(error = %e, "service unreachable");
                replies::BACKEND_UNREACHABLE
            }
        };
        self.reply(ix, msg).await
    }

    pub async fn on_unknown_command(&self, ix: &Interaction) -> Result<()> {
        self.reply(ix, replies::UNKNOWN_COMMAND).await
    }

    /// Free text: a batch submission if the user started a check.
    pub async fn on_text(&self, ix: &Interaction, text: &str) -> Result<()> {
        let user = ix.user_id;
        if !self.sessions.is_awaiting(user).await {
            return self.reply(ix, replies::NOT_STARTED).await;
        }

        let emails = extract_emails(text);
        if emails.is_empty() {
            return self.reply(ix, replies::NO_VALID_EMAILS).await;
        }

        if let Err(e) = self
            .messenger
            .send_html(ix.chat_id(), &replies::checking(emails.len()))
            .await
        {
            tracing::warn!(error = %e, "failed to send progress notice");
        }

        tracing::info!(user = user.0, count = emails.len(), "submitting batch");
        let outcome = self.service.check(&emails).await;
        // One attempt consumes the session, whatever happened.
        self.sessions.finish(user).await;

        let body = match outcome {
            Ok(results) => render_results(results.iter()),
            Err(e) => {
                tracing::error!(user = user.0, error = %e, "batch check failed");
                render_error(&e)
            }
        };
        self.reply(ix, &body).await
    }

    async fn reply(&self, ix: &Interaction, html: &str) -> Result<()> {
        let chunks = split_lines(html, self.message_limit);
        let mut chunks = chunks.iter();
        let Some(first) = chunks.next() else {
            return Ok(());
        };

        match ix.target {
            ReplyTarget::NewMessage(chat_id) => {
                self.messenger.send_html(chat_id, first).await?;
            }
            ReplyTarget::EditMessage(msg) => {
                self.messenger.edit_html(msg, first).await?;
            }
        }
        for chunk in chunks {
            self.messenger.send_html(ix.chat_id(), chunk).await?;
        }
        Ok(())
    }
}
