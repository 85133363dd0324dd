//! HTML markup helpers for Telegram-styled messages.
//!
//! The transport sends every message in HTML parse mode, so styling is a
//! matter of wrapping text in tags and escaping user-controlled values.

/// Escapes the characters Telegram's HTML parser treats specially.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn bold(text: &str) -> String {
    format!("<b>{text}</b>")
}

pub fn italic(text: &str) -> String {
    format!("<i>{text}</i>")
}

pub fn code(text: &str) -> String {
    format!("<code>{text}</code>")
}

/// An inline link with an escaped label.
pub fn link(text: &str, url: &str) -> String {
    format!("<a href=\"{url}\">{}</a>", escape(text))
}

/// An invisible link anchored to a zero-width space.
///
/// Telegram resolves it into the message's preview image without showing
/// any link text, which is how the cover image rides along with a detail
/// block.
pub fn hidden_link(url: &str) -> String {
    format!("<a href=\"{url}\">&#8203;</a>")
}
