//! Telegram adapter for the chat-transport seam.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    MessageId, ParseMode, ReplyParameters,
};

use reelbot_core::{
    BotError, CallbackRef, ChatRef, ChatTransport, Control, MessageRef, ReplyMarkup, Result,
};

/// Delivers the controller's messages through the Bot API, always in HTML
/// parse mode.
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn chat_id(chat: ChatRef) -> ChatId {
    ChatId(chat.0)
}

fn message_ref(message: &Message) -> MessageRef {
    MessageRef {
        chat: ChatRef(message.chat.id.0),
        id: message.id.0,
    }
}

fn inline_keyboard(rows: Vec<Vec<Control>>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.into_iter().map(|row| {
        row.into_iter()
            .map(|control| {
                InlineKeyboardButton::callback(control.label, control.action.encode())
            })
            .collect::<Vec<_>>()
    }))
}

fn reply_markup(markup: ReplyMarkup) -> teloxide::types::ReplyMarkup {
    match markup {
        ReplyMarkup::Inline(rows) => {
            teloxide::types::ReplyMarkup::InlineKeyboard(inline_keyboard(rows))
        }
        ReplyMarkup::Menu(labels) => {
            let mut keyboard = KeyboardMarkup::new(
                labels
                    .into_iter()
                    .map(|label| vec![KeyboardButton::new(label)]),
            );
            keyboard.resize_keyboard = true;
            keyboard.one_time_keyboard = true;
            teloxide::types::ReplyMarkup::Keyboard(keyboard)
        }
    }
}

fn transport_err(err: teloxide::RequestError) -> BotError {
    BotError::transport(err.to_string())
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(
        &self,
        chat: ChatRef,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef> {
        let mut request = self
            .bot
            .send_message(chat_id(chat), text)
            .parse_mode(ParseMode::Html);
        if let Some(markup) = markup {
            request = request.reply_markup(reply_markup(markup));
        }
        let message = request.await.map_err(transport_err)?;
        Ok(message_ref(&message))
    }

    async fn reply(
        &self,
        to: MessageRef,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef> {
        let mut request = self
            .bot
            .send_message(chat_id(to.chat), text)
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(MessageId(to.id)));
        if let Some(markup) = markup {
            request = request.reply_markup(reply_markup(markup));
        }
        let message = request.await.map_err(transport_err)?;
        Ok(message_ref(&message))
    }

    async fn edit_text(
        &self,
        message: MessageRef,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<MessageRef> {
        let mut request = self
            .bot
            .edit_message_text(chat_id(message.chat), MessageId(message.id), text)
            .parse_mode(ParseMode::Html);
        // Edited messages can only carry inline keyboards.
        if let Some(ReplyMarkup::Inline(rows)) = markup {
            request = request.reply_markup(inline_keyboard(rows));
        }
        let edited = request.await.map_err(transport_err)?;
        Ok(message_ref(&edited))
    }

    async fn edit_markup(&self, message: MessageRef, markup: ReplyMarkup) -> Result<()> {
        let ReplyMarkup::Inline(rows) = markup else {
            return Err(BotError::transport("only inline keyboards can be edited"));
        };
        self.bot
            .edit_message_reply_markup(chat_id(message.chat), MessageId(message.id))
            .reply_markup(inline_keyboard(rows))
            .await
            .map_err(transport_err)?;
        Ok(())
    }

    async fn delete(&self, message: MessageRef) -> Result<()> {
        self.bot
            .delete_message(chat_id(message.chat), MessageId(message.id))
            .await
            .map_err(transport_err)?;
        Ok(())
    }

    async fn answer_callback(&self, callback: &CallbackRef) -> Result<()> {
        self.bot
            .answer_callback_query(callback.0.clone())
            .await
            .map_err(transport_err)?;
        Ok(())
    }
}
