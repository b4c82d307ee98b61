//! Test helpers for common widget setup and recording collaborators.
//!
//! The recorders share their log through `Rc<RefCell<..>>`, so a test can keep
//! one clone while the widget owns the other.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geo::Location;
use crate::navigation::Navigator;
use crate::notify::{AlertDialog, Notification, NotificationCenter, Notifier};

/// Seed used by tests that need a reproducible fleet.
pub const TEST_SEED: u64 = 0x5EED;

/// A location in central Lagos used across tests.
pub fn test_location() -> Location {
    Location::new(6.5244, 3.3792)
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|notification| notification.message.clone())
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.log
            .borrow()
            .last()
            .map(|notification| notification.message.clone())
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&mut self, notification: &Notification) {
        self.log.borrow_mut().push(notification.clone());
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingAlert {
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingAlert {
    pub fn messages(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl AlertDialog for RecordingAlert {
    fn alert(&mut self, message: &str) {
        self.log.borrow_mut().push(message.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn targets(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target: &str) {
        self.log.borrow_mut().push(target.to_string());
    }
}

/// A notification center whose notifier records into the returned handle.
pub fn recording_notifications() -> (NotificationCenter, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let center = NotificationCenter::new(Box::new(RecordingAlert::default()))
        .with_notifier(Box::new(notifier.clone()));
    (center, notifier)
}
