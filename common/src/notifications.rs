//! Toast, confirmation and alert popup models.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Toasts kept on screen at once; the oldest is dropped first.
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
    Secondary,
    Contrast,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Secondary => "secondary",
            Severity::Contrast => "contrast",
        }
    }
}

/// What a caller asks the toast service to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
    /// `None` uses the configured default life.
    pub life: Option<Duration>,
    /// Sticky toasts stay until dismissed.
    pub sticky: bool,
}

impl ToastRequest {
    pub fn new(severity: Severity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: None,
            life: None,
            sticky: false,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn life(mut self, life: Duration) -> Self {
        self.life = Some(life);
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub summary: String,
    pub detail: Option<String>,
    /// `None` for sticky toasts.
    pub life: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    default_life: Duration,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new(default_life: Duration) -> Self {
        Self {
            next_id: 1,
            default_life,
            toasts: VecDeque::new(),
        }
    }

    /// Queues a toast and returns it; the caller schedules its expiry.
    pub fn push(&mut self, request: ToastRequest) -> Toast {
        let toast = Toast {
            id: self.next_id,
            severity: request.severity,
            summary: request.summary,
            detail: request.detail,
            life: if request.sticky {
                None
            } else {
                Some(request.life.unwrap_or(self.default_life))
            },
        };
        self.next_id += 1;
        self.toasts.push_back(toast.clone());
        while self.toasts.len() > MAX_VISIBLE_TOASTS {
            self.toasts.pop_front();
        }
        toast
    }

    /// Removes a toast; returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// A confirmation the user has to accept or reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub header: String,
    pub message: String,
    pub accept_label: String,
    pub reject_label: String,
    pub severity: Severity,
}

impl ConfirmRequest {
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
            accept_label: "Yes".to_string(),
            reject_label: "No".to_string(),
            severity: Severity::Info,
        }
    }

    pub fn labels(mut self, accept: impl Into<String>, reject: impl Into<String>) -> Self {
        self.accept_label = accept.into();
        self.reject_label = reject.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Accepted,
    Rejected,
}

/// FIFO of pending dialogs; only the front one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogQueue<T> {
    pending: VecDeque<T>,
}

impl<T> Default for DialogQueue<T> {
    fn default() -> Self {
        Self { pending: VecDeque::new() }
    }
}

impl<T> DialogQueue<T> {
    pub fn push(&mut self, dialog: T) {
        self.pending.push_back(dialog);
    }

    pub fn front(&self) -> Option<&T> {
        self.pending.front()
    }

    /// Removes the visible dialog so the next one can be shown.
    pub fn settle(&mut self) -> Option<T> {
        self.pending.pop_front()
    }

}

/// Single-slot alert popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPopup {
    pub title: String,
    pub text: String,
    pub severity: Severity,
    pub confirm_label: String,
}

impl AlertPopup {
    pub fn new(severity: Severity, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            severity,
            confirm_label: "OK".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertSlot {
    current: Option<AlertPopup>,
}

impl AlertSlot {
    /// Shows `popup`, returning the one it replaced.
    pub fn fire(&mut self, popup: AlertPopup) -> Option<AlertPopup> {
        self.current.replace(popup)
    }

    pub fn close(&mut self) -> Option<AlertPopup> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&AlertPopup> {
        self.current.as_ref()
    }
}
