//! User-facing notices.
//!
//! Pages collect notices as they work; the UI shell drains and displays
//! them. This is the headless analog of toast messages.

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// An operation completed.
    Success,
    /// Nothing happened, by design ("no changes to save").
    Info,
    /// An operation failed.
    Error,
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Display text.
    pub message: String,
}

/// The page's notice queue.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: Vec<Notice>,
}

impl Notices {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a success notice.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    /// Queues an info notice.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    /// Queues an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.queue.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Takes all queued notices, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }

    /// Peeks at the queued notices.
    pub fn pending(&self) -> &[Notice] {
        &self.queue
    }

    /// Returns `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
