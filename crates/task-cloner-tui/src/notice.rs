/*
[INPUT]:  Titles and bodies from importer, editor, notifier and flow operations
[OUTPUT]: Time-limited user notices shared between the UI loop and spawned work
[POS]:    Feedback layer - toast-style notices
[UPDATE]: When notice levels or expiry rules change
*/

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

const DEFAULT_TTL: Duration = Duration::from_secs(4);
const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
    pub raised_at: Instant,
}

#[derive(Debug)]
pub struct NoticeBoard {
    notices: VecDeque<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            ttl,
        }
    }

    fn push(&mut self, notice: Notice) {
        if self.notices.len() >= HISTORY_CAPACITY {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// Notices younger than the TTL, oldest first.
    pub fn active(&self, now: Instant) -> Vec<Notice> {
        self.notices
            .iter()
            .filter(|notice| now.saturating_duration_since(notice.raised_at) < self.ttl)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<Notice> {
        self.notices.iter().cloned().collect()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// Cloneable handle; every raise is also logged.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    board: Arc<Mutex<NoticeBoard>>,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(NoticeBoard::new(ttl))),
        }
    }

    pub fn success(&self, title: impl Into<String>, body: impl Into<String>) {
        self.raise(NoticeLevel::Success, title.into(), body.into());
    }

    pub fn info(&self, title: impl Into<String>, body: impl Into<String>) {
        self.raise(NoticeLevel::Info, title.into(), body.into());
    }

    pub fn error(&self, title: impl Into<String>, body: impl Into<String>) {
        self.raise(NoticeLevel::Error, title.into(), body.into());
    }

    fn raise(&self, level: NoticeLevel, title: String, body: String) {
        match level {
            NoticeLevel::Error => warn!(title = %title, body = %body, "notice"),
            _ => info!(title = %title, body = %body, "notice"),
        }
        let notice = Notice {
            level,
            title,
            body,
            raised_at: Instant::now(),
        };
        self.board.lock().expect("notice board lock").push(notice);
    }

    pub fn active(&self) -> Vec<Notice> {
        self.board
            .lock()
            .expect("notice board lock")
            .active(Instant::now())
    }

    /// Every notice still retained, expired or not.
    pub fn history(&self) -> Vec<Notice> {
        self.board.lock().expect("notice board lock").all()
    }

    pub fn latest(&self) -> Option<Notice> {
        self.board
            .lock()
            .expect("notice board lock")
            .notices
            .back()
            .cloned()
    }

    pub fn titles(&self) -> Vec<String> {
        self.history().into_iter().map(|notice| notice.title).collect()
    }
}
