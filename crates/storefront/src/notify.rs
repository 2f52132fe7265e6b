//! User-facing notices ("toasts") emitted by the cart manager.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A short localized message for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receives notices from the cart manager.
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for Rc<RefCell<N>> {
    fn notify(&mut self, notice: &Notice) {
        self.borrow_mut().notify(notice);
    }
}

/// Notifier that writes notices to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => {
                tracing::info!(title = %notice.title, "{}", notice.message);
            }
            NoticeLevel::Warning => {
                tracing::warn!(title = %notice.title, "{}", notice.message);
            }
            NoticeLevel::Error => {
                tracing::error!(title = %notice.title, "{}", notice.message);
            }
        }
    }
}

/// Notifier that keeps every notice, newest last.
#[derive(Debug, Default, Clone)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return everything collected so far.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
