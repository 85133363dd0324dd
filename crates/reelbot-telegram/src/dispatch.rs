//! Update dispatching: maps Telegram updates onto controller events.

use std::sync::Arc;

use teloxide::prelude::*;

use reelbot_core::{
    CallbackAction, CallbackRef, ChatRef, ConversationController, IncomingCallback,
    IncomingMessage, MessageRef, UserId,
};

/// Runs the long-polling dispatcher until the process is stopped.
pub async fn run(bot: Bot, controller: Arc<ConversationController>) {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let controller = controller.clone();
            move |msg: Message| {
                let controller = controller.clone();
                async move {
                    if let Some(event) = incoming_message(&msg) {
                        controller.handle_message(event).await;
                    }
                    respond(())
                }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let controller = controller.clone();
            move |query: CallbackQuery| {
                let controller = controller.clone();
                async move {
                    if let Some(event) = incoming_callback(&query) {
                        controller.handle_callback(event).await;
                    }
                    respond(())
                }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Maps a Telegram message onto a controller event.
///
/// Messages without a sender (channel posts) or without text are not for
/// this bot and map to nothing.
fn incoming_message(msg: &Message) -> Option<IncomingMessage> {
    let user = msg.from.as_ref()?;
    let text = msg.text()?;
    let chat = ChatRef(msg.chat.id.0);
    Some(IncomingMessage {
        chat,
        user: UserId(user.id.0 as i64),
        message: MessageRef {
            chat,
            id: msg.id.0,
        },
        text: text.to_string(),
    })
}

/// Maps a callback query onto a controller event, parsing the payload at
/// this boundary. Queries whose originating message is gone are dropped.
fn incoming_callback(query: &CallbackQuery) -> Option<IncomingCallback> {
    let message = query.message.as_ref()?;
    Some(IncomingCallback {
        user: UserId(query.from.id.0 as i64),
        message: MessageRef {
            chat: ChatRef(message.chat().id.0),
            id: message.id().0,
        },
        callback: CallbackRef(query.id.clone()),
        action: query.data.as_deref().and_then(CallbackAction::parse),
    })
}
