/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Where a handler's answer goes.
///
/// Button presses edit the menu message in place; commands and free text get
/// a fresh message in the chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyTarget {
    NewMessage(ChatId),
    EditMessage(MessageRef),
}

impl ReplyTarget {
    pub fn chat_id(&self) -> ChatId {
        match self {
            ReplyTarget::NewMessage(chat_id) => *chat_id,
            ReplyTarget::EditMessage(msg) => msg.chat_id,
        }
    }
}

/// One transport event reduced to what the front end needs: who asked, and
/// where the reply should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interaction {
    pub user_id: UserId,
    pub target: ReplyTarget,
}

impl Interaction {
    pub fn message(user_id: UserId, chat_id: ChatId) -> Self {
        Self {
            user_id,
            target: ReplyTarget::NewMessage(chat_id),
        }
    }

    pub fn button(user_id: UserId, message: MessageRef) -> Self {
        Self {
            user_id,
            target: ReplyTarget::EditMessage(message),
        }
    }

    pub fn chat_id(&self) -> ChatId {
        self.target.chat_id()
    }
}
