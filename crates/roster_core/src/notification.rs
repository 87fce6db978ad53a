//! Last-value broadcast of toast notifications.
//!
//! The channel keeps only the most recently published value. A subscriber is
//! handed that value once when it attaches and then every later publish, in
//! subscription order.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(Option<&Notification>) + Send + Sync>;

/// One queued fan-out. Targets are fixed when the value is published.
struct Delivery {
    value: Option<Notification>,
    targets: Vec<Subscriber>,
}

#[derive(Default)]
struct Inner {
    current: Option<Notification>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    pending: VecDeque<Delivery>,
    delivering: bool,
}

/// Shared publish/subscribe slot for "show this message with this severity".
///
/// Share it with `Arc`. Deliveries are queued and drained by a single caller
/// at a time, so every subscriber sees values in publish order and its last
/// value always equals [`NotificationChannel::current`]. A subscriber may
/// publish again; that value is delivered once the current round finishes.
#[derive(Default)]
pub struct NotificationChannel {
    inner: Mutex<Inner>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `subscriber` and hands it the current value.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(Option<&Notification>) + Send + Sync + 'static,
    {
        let subscriber: Subscriber = Arc::new(subscriber);
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, subscriber.clone()));
        let delivery = Delivery {
            value: inner.current.clone(),
            targets: vec![subscriber],
        };
        self.enqueue(inner, delivery);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(existing, _)| *existing != id);
        inner.subscribers.len() != before
    }

    pub fn publish(&self, message: impl Into<String>, severity: Severity) {
        self.notify(Notification::new(message, severity));
    }

    pub fn notify(&self, notification: Notification) {
        self.broadcast(Some(notification));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(message, Severity::Error);
    }

    pub fn clear(&self) {
        self.broadcast(None);
    }

    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    fn broadcast(&self, value: Option<Notification>) {
        let mut inner = self.lock();
        inner.current = value.clone();
        let targets = inner
            .subscribers
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        self.enqueue(inner, Delivery { value, targets });
    }

    /// Queues `delivery`; drains the queue unless another caller already is.
    fn enqueue(&self, mut inner: MutexGuard<'_, Inner>, delivery: Delivery) {
        inner.pending.push_back(delivery);
        if inner.delivering {
            return;
        }
        inner.delivering = true;
        drop(inner);

        let _reset = DrainReset(self);
        loop {
            let next = {
                let mut inner = self.lock();
                let next = inner.pending.pop_front();
                if next.is_none() {
                    inner.delivering = false;
                }
                next
            };
            let Some(delivery) = next else {
                return;
            };
            for target in &delivery.targets {
                target(delivery.value.as_ref());
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Subscribers never run under the lock, so the data is intact.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the drain role if a subscriber panics mid-delivery.
struct DrainReset<'a>(&'a NotificationChannel);

impl Drop for DrainReset<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inner = self.0.lock();
            inner.pending.clear();
            inner.delivering = false;
        }
    }
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("NotificationChannel")
            .field("current", &inner.current)
            .field("subscribers", &inner.subscribers.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}
