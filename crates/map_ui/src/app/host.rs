//! egui-side collaborators handed to the widgets at mount time.
//!
//! Widgets call these synchronously from inside event handlers, before the
//! frame that shows the result is painted, so each one just queues and the
//! shell drains the queues while drawing.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use map_core::navigation::Navigator;
use map_core::notify::{AlertDialog, Notification, Notifier};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Rc<RefCell<VecDeque<Toast>>>,
}

impl ToastQueue {
    /// Drop expired toasts and return the ones still visible, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.toasts.borrow_mut();
        toasts.retain(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_TTL);
        toasts.iter().cloned().collect()
    }
}

impl Notifier for ToastQueue {
    fn show(&mut self, notification: &Notification) {
        tracing::debug!(message = %notification.message, "toast");
        self.toasts.borrow_mut().push_back(Toast {
            notification: notification.clone(),
            shown_at: Instant::now(),
        });
    }
}

/// Modal alerts waiting to be acknowledged.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    pending: Rc<RefCell<VecDeque<String>>>,
}

impl AlertQueue {
    pub fn current(&self) -> Option<String> {
        self.pending.borrow().front().cloned()
    }

    pub fn acknowledge(&self) {
        self.pending.borrow_mut().pop_front();
    }
}

impl AlertDialog for AlertQueue {
    fn alert(&mut self, message: &str) {
        self.pending.borrow_mut().push_back(message.to_string());
    }
}

/// Collects navigation targets; the shell opens them through egui.
#[derive(Debug, Clone, Default)]
pub struct PendingNavigation {
    targets: Rc<RefCell<Vec<String>>>,
}

impl PendingNavigation {
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.targets.borrow_mut())
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&mut self, target: &str) {
        tracing::info!(to = target, "navigating");
        self.targets.borrow_mut().push(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use map_core::notify::NotificationLevel;

    use super::*;

    fn notification(message: &str) -> Notification {
        Notification {
            message: message.to_string(),
            level: NotificationLevel::Success,
        }
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let mut queue = ToastQueue::default();
        queue.show(&notification("hello"));
        let now = Instant::now();
        assert_eq!(queue.visible(now).len(), 1);
        assert!(queue.visible(now + TOAST_TTL).is_empty());
    }

    #[test]
    fn alerts_are_acknowledged_in_order() {
        let mut alerts = AlertQueue::default();
        alerts.alert("first");
        alerts.alert("second");
        assert_eq!(alerts.current().as_deref(), Some("first"));
        alerts.acknowledge();
        assert_eq!(alerts.current().as_deref(), Some("second"));
        alerts.acknowledge();
        assert!(alerts.current().is_none());
    }

    #[test]
    fn navigation_targets_are_taken_once() {
        let mut navigation = PendingNavigation::default();
        let shared = navigation.clone();
        navigation.navigate("signup.html");
        assert_eq!(shared.take(), vec!["signup.html".to_string()]);
        assert!(shared.take().is_empty());
    }
}
