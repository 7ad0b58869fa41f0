use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use teloxide::types::{ChatId, UserId};

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Immutable runtime configuration, built once at startup and passed by
/// reference into the handlers. Never read from the environment after
/// `from_env` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The single user permitted to operate the bot. Everyone else gets a
    /// fixed denial message.
    pub authorized_user: UserId,
    /// The group chat that receives every published photo and poll.
    pub target_chat: ChatId,
}

impl Config {
    /// Builds the configuration from ALLOWED_USER_ID and GROUP_CHAT_ID.
    ///
    /// # Errors
    /// Returns an error when either variable is missing or not numeric.
    pub fn from_env() -> anyhow::Result<Self> {
        let authorized_user = env::var("ALLOWED_USER_ID")
            .map_err(|_| anyhow::anyhow!("ALLOWED_USER_ID environment variable not set"))
            .and_then(|raw| {
                parse_user_id(&raw).ok_or_else(|| anyhow::anyhow!("Invalid ALLOWED_USER_ID: {}", raw))
            })?;

        let target_chat = env::var("GROUP_CHAT_ID")
            .map_err(|_| anyhow::anyhow!("GROUP_CHAT_ID environment variable not set"))
            .and_then(|raw| {
                parse_chat_id(&raw).ok_or_else(|| anyhow::anyhow!("Invalid GROUP_CHAT_ID: {}", raw))
            })?;

        Ok(Self {
            authorized_user,
            target_chat,
        })
    }
}

/// Parses a Telegram user id ("5218536687").
fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.trim().parse::<u64>().ok().map(UserId)
}

/// Parses a Telegram chat id; group ids are negative ("-4671966297").
fn parse_chat_id(raw: &str) -> Option<ChatId> {
    raw.trim().parse::<i64>().ok().map(ChatId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("5218536687"), Some(UserId(5218536687)));
        assert_eq!(parse_user_id(" 42 "), Some(UserId(42)));
        assert_eq!(parse_user_id("-1"), None);
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
    }

    #[test]
    fn test_parse_chat_id_accepts_group_ids() {
        assert_eq!(parse_chat_id("-4671966297"), Some(ChatId(-4671966297)));
        assert_eq!(parse_chat_id("12345"), Some(ChatId(12345)));
        assert_eq!(parse_chat_id("@channel"), None);
    }
}
