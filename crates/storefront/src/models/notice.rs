//! Toast notices.
//!
//! Operations queue notices; the next page render drains them.

use std::collections::VecDeque;

use serde::Serialize;

/// Severity of a notice, also its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warn,
    Error,
}

impl NoticeLevel {
    /// CSS class suffix for the toast.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// FIFO queue of pending notices.
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    /// Queue a notice.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
        };
        tracing::debug!(level = notice.level.as_str(), message = %notice.message, "Notice queued");
        self.queue.push_back(notice);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    /// Pending notices without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order_and_empties() {
        let mut notices = Notices::default();
        notices.success("added");
        notices.warn("emptied");
        notices.error("failed");

        let drained = notices.drain();
        let levels: Vec<_> = drained.iter().map(|n| n.level).collect();
        assert_eq!(
            levels,
            vec![NoticeLevel::Success, NoticeLevel::Warn, NoticeLevel::Error]
        );
        assert_eq!(drained[0].message, "added");
        assert!(notices.is_empty());
        assert!(notices.drain().is_empty());
    }

    #[test]
    fn test_level_css_class() {
        assert_eq!(NoticeLevel::Warn.as_str(), "warn");
    }
}
