//! Application-wide status: loading flag, top-level error and toast.

use std::time::{Duration, Instant};

/// How long a toast stays on screen unless dismissed.
///
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Specifying the different kinds of notification.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message shown as a toast.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

/// Status shared by every view.
///
#[derive(Debug, Default)]
pub struct AppStatus {
    is_loading: bool,
    error: Option<String>,
    toast: Option<Notification>,
}

impl AppStatus {
    pub fn new() -> Self {
        AppStatus::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) -> &mut Self {
        self.is_loading = loading;
        self
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) -> &mut Self {
        self.error = error;
        self
    }

    /// Returns the visible toast, if any.
    ///
    pub fn toast(&self) -> Option<&Notification> {
        self.toast.as_ref()
    }

    pub fn show_toast(&mut self, message: String, kind: NotificationKind) -> &mut Self {
        self.toast = Some(Notification {
            message,
            kind,
            shown_at: Instant::now(),
        });
        self
    }

    pub fn hide_toast(&mut self) -> &mut Self {
        self.toast = None;
        self
    }

    /// Hide the toast once it has been visible for the given duration.
    /// Returns true if a toast was hidden.
    ///
    pub fn expire_toast(&mut self, now: Instant, duration: Duration) -> bool {
        let expired = self
            .toast
            .as_ref()
            .map_or(false, |toast| now.duration_since(toast.shown_at) >= duration);
        if expired {
            self.toast = None;
        }
        expired
    }

    /// Clear the loading flag, the error and the toast.
    ///
    pub fn reset_state(&mut self) -> &mut Self {
        *self = AppStatus::default();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_show_and_hide() {
        let mut status = AppStatus::new();
        assert!(status.toast().is_none());

        status.show_toast("Saved".to_string(), NotificationKind::Success);
        let toast = status.toast().unwrap();
        assert_eq!(toast.message, "Saved");
        assert_eq!(toast.kind, NotificationKind::Success);

        status.hide_toast();
        assert!(status.toast().is_none());
    }

    #[test]
    fn test_expire_toast() {
        let mut status = AppStatus::new();
        status.show_toast("Oops".to_string(), NotificationKind::Error);
        let shown_at = status.toast().unwrap().shown_at;

        assert!(!status.expire_toast(shown_at + Duration::from_secs(1), TOAST_DURATION));
        assert!(status.toast().is_some());
        assert!(status.expire_toast(shown_at + TOAST_DURATION, TOAST_DURATION));
        assert!(status.toast().is_none());
        assert!(!status.expire_toast(shown_at + TOAST_DURATION, TOAST_DURATION));
    }

    #[test]
    fn test_reset_state() {
        let mut status = AppStatus::new();
        status
            .set_loading(true)
            .set_error(Some("boom".to_string()))
            .show_toast("boom".to_string(), NotificationKind::Error);

        status.reset_state();

        assert!(!status.is_loading());
        assert_eq!(status.error(), None);
        assert!(status.toast().is_none());
    }
}
