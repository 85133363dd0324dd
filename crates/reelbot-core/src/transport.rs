//! The chat-transport seam.
//!
//! The controller talks to the chat backend only through [`ChatTransport`],
//! so the Telegram adapter (or a test mock) can be swapped in behind it.

use async_trait::async_trait;

use crate::callback::CallbackAction;
use crate::error::Result;

/// Identifies a chat user across events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Identifies a chat (conversation) on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatRef(pub i64);

/// Identifies one delivered message, for edits, deletes and replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: ChatRef,
    pub id: i32,
}

/// Opaque handle for acknowledging a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRef(pub String);

/// One inline button: a visible label and the action it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub action: CallbackAction,
}

impl Control {
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Keyboard attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// Inline buttons under the message, row by row.
    Inline(Vec<Vec<Control>>),
    /// The persistent reply menu (one label per row).
    Menu(Vec<String>),
}

/// Operations the controller needs from the chat backend.
///
/// `text` is HTML-styled; implementations must send it in HTML parse mode.
/// Errors are reported as [`crate::BotError::Transport`]; the controller
/// treats a failed delete as "message already gone" and falls back to an
/// edit-in-place.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a new message into a chat.
    async fn send(
        &self,
        chat: ChatRef,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef>;

    /// Sends a message as a reply to an existing one.
    async fn reply(
        &self,
        to: MessageRef,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef>;

    /// Replaces the text (and inline keyboard) of an existing message.
    async fn edit_text(
        &self,
        message: MessageRef,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef>;

    /// Replaces only the inline keyboard of an existing message.
    async fn edit_markup(&self, message: MessageRef, markup: ReplyMarkup) -> Result<()>;

    /// Deletes a message. Fails when the message no longer exists.
    async fn delete(&self, message: MessageRef) -> Result<()>;

    /// Acknowledges a button press so the client stops its spinner.
    async fn answer_callback(&self, callback: &CallbackRef) -> Result<()>;
}
