//! Per-user conversation state.
//!
//! The bot tracks exactly one flag per user: whether the next free-text
//! message should be treated as a movie-title query. The map is owned by
//! the controller and passed by handle, not held in global state.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::transport::UserId;

/// Represents the current interaction mode for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No interaction sequence in progress.
    #[default]
    Idle,
    /// The user pressed "Find a movie" and the next message is a title query.
    AwaitingTitle,
}

/// In-memory session map, keyed by user id.
///
/// Entries are created on first interaction and live for the process
/// lifetime. A single user's events arrive in delivery order, so the
/// read-then-write sequence per user never races with itself.
#[derive(Default)]
pub struct SessionStore {
    states: RwLock<HashMap<UserId, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's current state, defaulting to `Idle`.
    pub async fn state(&self, user: UserId) -> SessionState {
        self.states
            .read()
            .await
            .get(&user)
            .copied()
            .unwrap_or_default()
    }

    pub async fn set(&self, user: UserId, state: SessionState) {
        self.states.write().await.insert(user, state);
    }

    /// Resets the user to `Idle`; every terminal action ends up here.
    pub async fn reset(&self, user: UserId) {
        self.set(user, SessionState::Idle).await;
    }
}
