use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Notification, NotificationName, Observer, Subscribe, SubscriptionId};

struct Subscriber {
    id: SubscriptionId,
    interest: Subscribe,
    observer: Arc<dyn Observer>,
}

/// Subscriber bookkeeping shared by the bundled centers.
///
/// Subscribers are kept in registration order; [`Registry::matching`]
/// returns a snapshot so delivery happens without holding the lock and
/// observers may subscribe, unsubscribe or post re-entrantly.
#[derive(Default)]
pub(crate) struct Registry {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        // A panicking observer never runs under this lock, so the data is intact.
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn add(&self, interest: Subscribe, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId::new();
        tracing::trace!(subscription = %id, interest = %interest, "subscribed");
        self.lock().push(Subscriber {
            id,
            interest,
            observer,
        });
        id
    }

    /// Returns true if a subscription was removed.
    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        let removed = subscribers.len() != before;
        if removed {
            tracing::trace!(subscription = %id, "unsubscribed");
        }
        removed
    }

    pub(crate) fn matching(&self, name: &NotificationName) -> Vec<(SubscriptionId, Arc<dyn Observer>)> {
        self.lock()
            .iter()
            .filter(|s| s.interest.accepts(name))
            .map(|s| (s.id, s.observer.clone()))
            .collect()
    }

    /// Delivers to every matching subscriber, returning how many were called.
    pub(crate) fn deliver(&self, notification: &Notification) -> usize {
        let targets = self.matching(notification.name());
        for (_, observer) in &targets {
            observer.on_notification(notification);
        }
        targets.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn clear(&self) {
        self.lock().clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("subscribers", &self.len())
            .finish()
    }
}
