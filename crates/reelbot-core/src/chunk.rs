//! Splitting formatted text into transport-sized chunks.

use crate::transport::ReplyMarkup;

/// Telegram's hard per-message character limit.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// One transport-sized fragment of a formatted message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatChunk {
    /// At most [`MAX_MESSAGE_LEN`] characters.
    pub text: String,
    /// Present only on the last chunk of a message.
    pub controls: Option<ReplyMarkup>,
}

/// Splits `text` into chunks of at most [`MAX_MESSAGE_LEN`] characters.
///
/// Cuts fall on fixed character boundaries (Unicode scalar values), never
/// inside a code point; no word-aware reflowing happens here. `controls`
/// ride on the final chunk only. An empty `text` without controls produces
/// no chunks.
pub fn chunk_message(text: &str, controls: Option<ReplyMarkup>) -> Vec<ChatChunk> {
    let mut texts: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut len = 0usize;
    for ch in text.chars() {
        if len == MAX_MESSAGE_LEN {
            texts.push(std::mem::take(&mut current));
            len = 0;
        }
        current.push(ch);
        len += 1;
    }
    if !current.is_empty() {
        texts.push(current);
    }

    let mut chunks: Vec<ChatChunk> = texts
        .into_iter()
        .map(|text| ChatChunk {
            text,
            controls: None,
        })
        .collect();
    if let Some(controls) = controls {
        match chunks.last_mut() {
            Some(last) => last.controls = Some(controls),
            None => chunks.push(ChatChunk {
                text: String::new(),
                controls: Some(controls),
            }),
        }
    }
    chunks
}
