use std::{fmt, sync::Arc};

use crate::{
    Error, Notification, NotificationCenter, Observer, Result, Subscribe, SubscriptionId,
    registry::Registry,
};

/// In-process notification center with synchronous delivery.
///
/// `post` calls every matching observer on the posting thread before it
/// returns, in registration order. Wildcard subscriptions
/// ([`Subscribe::all()`]) are supported.
///
/// `LocalCenter` is a handle: clones share the same subscriptions. Create
/// one per test rather than sharing a process-wide instance.
///
/// # Example
///
/// ```rust
/// use herald::{LocalCenter, Notification, NotificationCenter, expect, matchers::equal, post_notifications};
///
/// let center = LocalCenter::new();
/// let foo = Notification::new("Foo");
///
/// expect(|| center.post(foo.clone()))
///     .to(post_notifications(equal([foo.clone()]), &center))?;
/// # Ok::<(), herald::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct LocalCenter {
    registry: Arc<Registry>,
}

impl LocalCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.registry.len()
    }

    /// Drop every subscription.
    pub fn remove_all(&self) {
        self.registry.clear();
    }
}

impl NotificationCenter for LocalCenter {
    fn subscribe(
        &self,
        interest: impl Into<Subscribe>,
        observer: Arc<dyn Observer>,
    ) -> Result<SubscriptionId> {
        Ok(self.registry.add(interest.into(), observer))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.registry.remove(id);
    }

    fn post(&self, notification: Notification) -> Result {
        if notification.name().is_empty() {
            return Err(Error::EmptyNotificationName);
        }
        let delivered = self.registry.deliver(&notification);
        tracing::trace!(name = %notification.name(), delivered, "notification posted");
        Ok(())
    }
}

impl fmt::Debug for LocalCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCenter")
            .field("subscriptions", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn collecting(center: &LocalCenter, interest: Subscribe) -> (SubscriptionId, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = center
            .subscribe(
                interest,
                Arc::new(move |n: &Notification| sink.lock().unwrap().push(n.name().to_string())),
            )
            .unwrap();
        (id, seen)
    }

    #[test]
    fn delivers_synchronously_in_post_order() {
        let center = LocalCenter::new();
        let (_, seen) = collecting(&center, Subscribe::all());

        center.post(Notification::new("Foo")).unwrap();
        center.post(Notification::new("Bar")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["Foo", "Bar"]);
    }

    #[test]
    fn named_subscription_filters() {
        let center = LocalCenter::new();
        let (_, seen) = collecting(&center, Subscribe::to("Bar"));

        center.post(Notification::new("Foo")).unwrap();
        center.post(Notification::new("Bar")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["Bar"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let center = LocalCenter::new();
        let (id, seen) = collecting(&center, Subscribe::all());
        center.unsubscribe(id);
        center.unsubscribe(id);

        center.post(Notification::new("Foo")).unwrap();

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(center.subscription_count(), 0);
    }

    #[test]
    fn rejects_empty_names() {
        let center = LocalCenter::new();
        assert_eq!(
            center.post(Notification::new("")),
            Err(Error::EmptyNotificationName)
        );
    }

    #[test]
    fn clones_share_subscriptions() {
        let center = LocalCenter::new();
        let (_, seen) = collecting(&center, Subscribe::all());
        let other = center.clone();

        other.post(Notification::new("Foo")).unwrap();

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(other.subscription_count(), 1);
        other.remove_all();
        assert_eq!(center.subscription_count(), 0);
    }

    #[test]
    fn observers_may_post_reentrantly() {
        let center = LocalCenter::new();
        let (_, seen) = collecting(&center, Subscribe::all());
        let relay = center.clone();
        center
            .subscribe(
                "Ping",
                Arc::new(move |_: &Notification| {
                    relay.post(Notification::new("Pong")).unwrap();
                }),
            )
            .unwrap();

        center.post(Notification::new("Ping")).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["Ping", "Pong"]);
    }
}
