use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
};

use tokio::{
    select,
    sync::mpsc::{self, Receiver, Sender},
};
use tokio_util::sync::CancellationToken;

use crate::{
    Config, Error, Notification, NotificationCenter, Observer, Result, Subscribe, SubscriptionId,
    registry::Registry,
};

struct Shared {
    sender: Sender<Notification>,
    registry: Arc<Registry>,
    cancel_token: CancellationToken,
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Notification center that delivers asynchronously to named subscribers only.
///
/// Models a center that crosses a boundary (another process, another
/// host): there is no wildcard mode, so observers must name every
/// notification they want, and `post` only enqueues. A dispatcher task on
/// the Tokio runtime delivers queued notifications in post order.
///
/// Because delivery happens after `post` returns, assert on this center
/// with [`Expectation::to_eventually`](crate::Expectation::to_eventually)
/// and [`post_distributed_notifications`](crate::post_distributed_notifications).
///
/// # Example
///
/// ```rust,no_run
/// use herald::{DistributedCenter, Notification, NotificationCenter, expect, matchers::equal,
///     post_distributed_notifications};
///
/// # #[tokio::main]
/// # async fn main() -> herald::Result {
/// let center = DistributedCenter::new()?;
/// let foo = Notification::new("Foo").with_payload("1");
///
/// expect(|| center.post(foo.clone()))
///     .to_eventually(post_distributed_notifications(equal([foo.clone()]), &center, ["Foo"]))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DistributedCenter {
    shared: Arc<Shared>,
}

impl DistributedCenter {
    /// Create a center with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a Tokio runtime.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Create a center whose delivery queue holds
    /// [`Config::delivery_channel_capacity`] notifications.
    pub fn with_config(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let (tx, rx) = mpsc::channel(config.delivery_channel_capacity().max(1));
        let registry = Arc::new(Registry::default());
        let cancel_token = CancellationToken::new();

        let mut dispatcher = Dispatcher {
            receiver: rx,
            registry: registry.clone(),
            cancel_token: cancel_token.clone(),
        };
        runtime.spawn(async move { dispatcher.run().await });

        Ok(Self {
            shared: Arc::new(Shared {
                sender: tx,
                registry,
                cancel_token,
            }),
        })
    }

    /// Stop the dispatcher. Notifications still queued are discarded and
    /// later posts fail with [`Error::CenterClosed`].
    pub fn shutdown(&self) {
        self.shared.cancel_token.cancel();
    }

    /// Returns true once [`shutdown`](Self::shutdown) was called.
    pub fn is_closed(&self) -> bool {
        self.shared.cancel_token.is_cancelled() || self.shared.sender.is_closed()
    }

    /// Returns the number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.shared.registry.len()
    }
}

impl NotificationCenter for DistributedCenter {
    fn subscribe(
        &self,
        interest: impl Into<Subscribe>,
        observer: Arc<dyn Observer>,
    ) -> Result<SubscriptionId> {
        let interest = interest.into();
        if interest.is_wildcard() {
            return Err(Error::WildcardUnsupported);
        }
        if self.is_closed() {
            return Err(Error::CenterClosed);
        }
        Ok(self.shared.registry.add(interest, observer))
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.shared.registry.remove(id);
    }

    fn post(&self, notification: Notification) -> Result {
        if notification.name().is_empty() {
            return Err(Error::EmptyNotificationName);
        }
        if self.shared.cancel_token.is_cancelled() {
            return Err(Error::CenterClosed);
        }
        tracing::trace!(name = %notification.name(), "notification queued");
        self.shared.sender.try_send(notification)?;
        Ok(())
    }

    fn supports_wildcard(&self) -> bool {
        false
    }
}

impl fmt::Debug for DistributedCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributedCenter")
            .field("subscriptions", &self.shared.registry.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

struct Dispatcher {
    receiver: Receiver<Notification>,
    registry: Arc<Registry>,
    cancel_token: CancellationToken,
}

impl Dispatcher {
    async fn run(&mut self) {
        loop {
            select! {
                biased;
                _ = self.cancel_token.cancelled() => break,
                Some(notification) = self.receiver.recv() => {
                    self.deliver(&notification);
                }
                else => break,
            }
        }
        self.receiver.close();
        tracing::debug!("distributed center dispatcher stopped");
    }

    fn deliver(&self, notification: &Notification) {
        let targets = self.registry.matching(notification.name());
        for (id, observer) in targets {
            let result = catch_unwind(AssertUnwindSafe(|| observer.on_notification(notification)));
            if result.is_err() {
                tracing::error!(subscription = %id, name = %notification.name(), "Observer panicked, removing");
                self.registry.remove(id);
            }
        }
        tracing::trace!(name = %notification.name(), "notification delivered");
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use super::*;

    fn collecting(center: &DistributedCenter, name: &str) -> Arc<Mutex<Vec<Notification>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        center
            .subscribe(
                name,
                Arc::new(move |n: &Notification| sink.lock().unwrap().push(n.clone())),
            )
            .unwrap();
        seen
    }

    async fn wait_for(seen: &Arc<Mutex<Vec<Notification>>>, count: usize) {
        for _ in 0..100 {
            if seen.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[test]
    fn requires_runtime() {
        assert_eq!(DistributedCenter::new().err(), Some(Error::NoRuntime));
    }

    #[tokio::test]
    async fn rejects_wildcard() {
        let center = DistributedCenter::new().unwrap();
        assert!(!center.supports_wildcard());
        let result = center.subscribe(Subscribe::all(), Arc::new(|_: &Notification| {}));
        assert_eq!(result, Err(Error::WildcardUnsupported));
    }

    #[tokio::test]
    async fn delivers_named_after_post_returns() {
        let center = DistributedCenter::new().unwrap();
        let foo = collecting(&center, "Foo");

        center.post(Notification::new("Foo").with_payload("1")).unwrap();
        center.post(Notification::new("Bar").with_payload("2")).unwrap();
        center.post(Notification::new("Foo").with_payload("3")).unwrap();
        wait_for(&foo, 2).await;

        let seen = foo.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                Notification::new("Foo").with_payload("1"),
                Notification::new("Foo").with_payload("3"),
            ]
        );
    }

    #[tokio::test]
    async fn full_queue_is_reported() {
        let config = Config::default().with_delivery_channel_capacity(1);
        let center = DistributedCenter::with_config(&config).unwrap();
        // The dispatcher cannot run before this task yields.
        center.post(Notification::new("Foo")).unwrap();
        assert_eq!(
            center.post(Notification::new("Foo")),
            Err(Error::DeliveryQueueFull)
        );
    }

    #[tokio::test]
    async fn shutdown_closes_center() {
        let center = DistributedCenter::new().unwrap();
        center.shutdown();
        assert!(center.is_closed());
        assert_eq!(center.post(Notification::new("Foo")), Err(Error::CenterClosed));
        assert_eq!(
            center.subscribe("Foo", Arc::new(|_: &Notification| {})),
            Err(Error::CenterClosed)
        );
    }

    #[tokio::test]
    async fn panicking_observer_is_removed() {
        let center = DistributedCenter::new().unwrap();
        fn boom(_: &Notification) {
            panic!("boom");
        }
        center.subscribe("Foo", Arc::new(boom)).unwrap();
        let survivor = collecting(&center, "Foo");
        assert_eq!(center.subscription_count(), 2);

        center.post(Notification::new("Foo")).unwrap();
        wait_for(&survivor, 1).await;

        assert_eq!(survivor.lock().unwrap().len(), 1);
        assert_eq!(center.subscription_count(), 1);
    }
}
