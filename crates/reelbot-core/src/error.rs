//! Error types for the reelbot application.

use thiserror::Error;

/// A shared error type for the whole bot.
///
/// External collaborators (metadata lookup, listing scrape, video search,
/// chat transport) convert their failures into these variants at the call
/// boundary; nothing below the controller panics or bubbles raw errors.
#[derive(Error, Debug)]
pub enum BotError {
    /// An external lookup collaborator failed (network, bad status, bad body).
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// A scraped page or payload could not be parsed.
    #[error("Parse error: {what}: {message}")]
    Parse {
        what: &'static str,
        message: String,
    },

    /// The chat transport rejected an operation.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Creates a Lookup error
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    /// Creates a Parse error
    pub fn parse(what: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            what,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a Lookup or Parse error, i.e. an external-service
    /// failure that should surface as a "try again" message.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::Parse { .. })
    }
}

/// A type alias for `Result<T, BotError>`.
pub type Result<T> = std::result::Result<T, BotError>;
