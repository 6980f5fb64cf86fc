//! Transient messages shown to the user after an action.

use flume::{Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sending half, handed to background tasks.
#[derive(Debug, Clone)]
pub struct Notifier {
    send: Sender<Notice>,
}

impl Notifier {
    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
        };
        if self.send.send(notice).is_err() {
            log::debug!("Notice dropped, queue closed");
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }
}

/// Receiving half, drained by the UI once per frame.
#[derive(Debug)]
pub struct NoticeQueue {
    send: Sender<Notice>,
    recv: Receiver<Notice>,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifier(&self) -> Notifier {
        Notifier {
            send: self.send.clone(),
        }
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.recv.try_iter().collect()
    }
}
