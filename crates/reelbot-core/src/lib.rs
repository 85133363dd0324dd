//! Core domain logic for Reelbot.
//!
//! Everything here is transport- and network-free: formatters, the message
//! chunker, per-user session state, the callback action vocabulary and the
//! conversation controller. Network-facing collaborators plug in through
//! the traits in [`collaborators`] and [`transport`].

pub mod callback;
pub mod chunk;
pub mod collaborators;
pub mod controller;
pub mod error;
pub mod format;
pub mod genres;
pub mod listing;
pub mod markup;
pub mod model;
pub mod session;
pub mod transport;

// Re-export common error type
pub use error::{BotError, Result};

pub use callback::CallbackAction;
pub use chunk::{ChatChunk, MAX_MESSAGE_LEN, chunk_message};
pub use controller::{ConversationController, IncomingCallback, IncomingMessage};
pub use model::{CastEntry, MovieDetail, MovieSummary, VideoResult};
pub use session::{SessionState, SessionStore};
pub use transport::{
    CallbackRef, ChatRef, ChatTransport, Control, MessageRef, ReplyMarkup, UserId,
};
