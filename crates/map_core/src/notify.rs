//! User-visible notifications.
//!
//! Widgets talk to a [`NotificationCenter`], which forwards to the page's
//! notifier when one is registered and otherwise falls back to a blocking
//! alert dialog.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

/// The page's notification collaborator (toasts, banners, ...).
pub trait Notifier {
    fn show(&mut self, notification: &Notification);
}

/// Last-resort modal dialog.
pub trait AlertDialog {
    fn alert(&mut self, message: &str);
}

/// Fallback dialog for headless hosts: writes the message to the log.
#[derive(Debug, Default)]
pub struct LogAlert;

impl AlertDialog for LogAlert {
    fn alert(&mut self, message: &str) {
        tracing::info!("alert: {message}");
    }
}

pub struct NotificationCenter {
    notifier: Option<Box<dyn Notifier>>,
    fallback: Box<dyn AlertDialog>,
}

impl NotificationCenter {
    pub fn new(fallback: Box<dyn AlertDialog>) -> Self {
        Self {
            notifier: None,
            fallback,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    pub fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let notification = Notification {
            message: message.into(),
            level,
        };
        match self.notifier.as_mut() {
            Some(notifier) => notifier.show(&notification),
            None => self.fallback.alert(&notification.message),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Success);
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Box::new(LogAlert))
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("has_notifier", &self.notifier.is_some())
            .finish()
    }
}
