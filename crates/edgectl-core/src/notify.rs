// ── User-facing notifications ──
//
// Every view operation reports back through an `Outcome`: zero or more
// toasts plus an optional navigation. Front ends decide how to show
// them (toast stack in the TUI, stderr line in the CLI).

use crate::error::CoreError;
use crate::route::Route;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// What a view operation wants the front end to do next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notifications: Vec<Notification>,
    pub redirect: Option<Route>,
    /// Set when the operation failed, so scripted callers can exit non-zero.
    pub failed: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notify(notification: Notification) -> Self {
        Self {
            notifications: vec![notification],
            ..Self::default()
        }
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::notify(Notification::success(msg))
    }

    /// Failure outcome. An expired session produces no toast, only a
    /// redirect to login: the 401 interceptor already ended the session.
    pub fn failure(err: &CoreError, message: Option<&str>) -> Self {
        if err.is_session_expired() {
            return Self {
                notifications: Vec::new(),
                redirect: Some(Route::Login),
                failed: true,
            };
        }

        let text = message.map_or_else(|| err.user_message(), str::to_owned);
        Self {
            notifications: vec![Notification::error(text)],
            redirect: None,
            failed: true,
        }
    }

    pub fn with_redirect(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    pub fn is_ok(&self) -> bool {
        !self.failed
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| n.is_error())
    }

    /// Fold another outcome into this one, keeping the later redirect.
    pub fn merge(mut self, other: Outcome) -> Self {
        self.notifications.extend(other.notifications);
        self.redirect = other.redirect.or(self.redirect);
        self.failed |= other.failed;
        self
    }
}
