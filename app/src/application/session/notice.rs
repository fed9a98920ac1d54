use std::time::{Duration, Instant};

use serde::Serialize;

pub const DEFAULT_AUTO_CLOSE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient message shown to the user. Never blocks interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub auto_close: Duration,
    #[serde(skip)]
    pub raised_at: Instant,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            auto_close: DEFAULT_AUTO_CLOSE,
            raised_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.auto_close
    }
}

/// Interaction with the person in front of the screen.
#[cfg_attr(test, mockall::automock)]
pub trait UserPrompt: Send + Sync {
    /// Called once for every notice the session raises.
    fn notify(&self, notice: Notice);

    /// Yes/no question. `false` cancels the action.
    fn confirm(&self, message: &str) -> bool;
}
