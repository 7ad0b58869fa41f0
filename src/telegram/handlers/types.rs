//! Handler types, dependencies, and authorization helpers

use std::sync::Arc;

use teloxide::types::{Message, UserId};

use crate::core::Config;
use crate::session::SessionStore;
use crate::telegram::publish::QuestionPublisher;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fixed reply for any event from a non-authorized identity.
pub(super) const NOT_AUTHORIZED: &str = "Sorry, you are not authorized to use this bot.";

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub publisher: Arc<dyn QuestionPublisher>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        config: Arc<Config>,
        sessions: Arc<SessionStore>,
        publisher: Arc<dyn QuestionPublisher>,
    ) -> Self {
        Self {
            config,
            sessions,
            publisher,
        }
    }
}

/// Returns the sender's id when it matches the configured operator.
/// Messages without a sender (channel posts) never authorize.
pub(super) fn authorized_sender(config: &Config, msg: &Message) -> Option<UserId> {
    msg.from
        .as_ref()
        .map(|user| user.id)
        .filter(|id| *id == config.authorized_user)
}
