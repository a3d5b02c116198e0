//! Notifications: the structured events `Runtime.Notify` accumulates for
//! the session log, and the process-wide observer registry `Notify` and
//! `Log` fan out to.

use neo_core::UInt256;
use neo_core::UInt160;
use neo_vm::StackValue;
use std::rc::Rc;

/// A single `Runtime.Notify` event, preserved in invocation order.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Hash of the enclosing transaction or block whose execution produced
    /// this notification.
    pub script_container: UInt256,
    pub script_hash: UInt160,
    pub event_name: String,
    pub payload: StackValue,
}

/// A log line from `Runtime.Log`, kept separate from `Notification` since
/// it carries no structured payload.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub script_hash: UInt160,
    pub message: String,
}

/// A process-wide subscriber to notifications and log entries.
///
/// Invocation is synchronous, in registration order; a subscriber that
/// panics or otherwise fails must not be allowed to influence consensus,
/// so callers are expected to wrap fallible subscriber bodies in
/// `std::panic::catch_unwind` themselves — this registry only sequences
/// the calls.
pub trait Observer {
    fn on_notify(&self, notification: &Notification);
    fn on_log(&self, entry: &LogEntry);
}

/// A small add/remove registry of `Observer`s, per spec.md §9's design
/// note on notification fan-out.
#[derive(Default, Clone)]
pub struct ObserverRegistry {
    observers: Vec<(u64, Rc<dyn Observer>)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Rc<dyn Observer>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: u64) {
        self.observers.retain(|(existing, _)| *existing != id);
    }

    /// Fires `notification` to every subscriber. A subscriber whose call
    /// unwinds is caught and discarded so it cannot abort the session.
    pub fn fire_notify(&self, notification: &Notification) {
        for (_, observer) in &self.observers {
            let observer = observer.clone();
            let notification = notification.clone();
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                observer.on_notify(&notification);
            }));
        }
    }

    pub fn fire_log(&self, entry: &LogEntry) {
        for (_, observer) in &self.observers {
            let observer = observer.clone();
            let entry = entry.clone();
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                observer.on_log(&entry);
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        notifications: RefCell<Vec<String>>,
    }

    impl Observer for Recorder {
        fn on_notify(&self, notification: &Notification) {
            self.notifications
                .borrow_mut()
                .push(notification.event_name.clone());
        }
        fn on_log(&self, _entry: &LogEntry) {}
    }

    struct Panicker;
    impl Observer for Panicker {
        fn on_notify(&self, _notification: &Notification) {
            panic!("subscriber misbehaves");
        }
        fn on_log(&self, _entry: &LogEntry) {}
    }

    fn sample() -> Notification {
        Notification {
            script_container: UInt256::zero(),
            script_hash: UInt160::zero(),
            event_name: "Transfer".to_string(),
            payload: StackValue::boolean(true),
        }
    }

    #[test]
    fn delivers_to_every_subscriber() {
        let mut registry = ObserverRegistry::new();
        let recorder = Rc::new(Recorder {
            notifications: RefCell::new(vec![]),
        });
        registry.subscribe(recorder.clone());
        registry.fire_notify(&sample());
        assert_eq!(recorder.notifications.borrow().as_slice(), ["Transfer"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut registry = ObserverRegistry::new();
        let recorder = Rc::new(Recorder {
            notifications: RefCell::new(vec![]),
        });
        let id = registry.subscribe(recorder.clone());
        registry.unsubscribe(id);
        registry.fire_notify(&sample());
        assert!(recorder.notifications.borrow().is_empty());
    }

    #[test]
    fn a_panicking_subscriber_does_not_stop_the_others() {
        let mut registry = ObserverRegistry::new();
        registry.subscribe(Rc::new(Panicker));
        let recorder = Rc::new(Recorder {
            notifications: RefCell::new(vec![]),
        });
        registry.subscribe(recorder.clone());
        registry.fire_notify(&sample());
        assert_eq!(recorder.notifications.borrow().as_slice(), ["Transfer"]);
    }
}
