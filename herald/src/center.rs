use std::sync::Arc;

use crate::{Notification, Result, Subscribe, SubscriptionId};

/// Receives notifications delivered by a [`NotificationCenter`].
///
/// Implemented for every `Fn(&Notification) + Send + Sync`, so a closure is
/// usually all you need:
///
/// ```rust
/// # use std::sync::Arc;
/// use herald::{LocalCenter, Notification, NotificationCenter, Subscribe};
///
/// let center = LocalCenter::new();
/// let id = center.subscribe(
///     Subscribe::all(),
///     Arc::new(|n: &Notification| println!("[posted] {n}")),
/// )?;
/// center.post(Notification::new("Foo"))?;
/// center.unsubscribe(id);
/// # Ok::<(), herald::Error>(())
/// ```
///
/// Observers are called from whatever thread or task the center delivers
/// on, so they must be `Send + Sync`.
pub trait Observer: Send + Sync {
    /// Called once per delivered notification, in delivery order.
    fn on_notification(&self, notification: &Notification);
}

impl<F> Observer for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn on_notification(&self, notification: &Notification) {
        self(notification)
    }
}

/// A publish/subscribe registry keyed by notification name.
///
/// Herald never assumes a global center: recorders and matchers are always
/// handed one explicitly, so tests can substitute any implementation.
/// Centers are handles and are expected to be cheap to clone; clones refer
/// to the same subscriptions.
///
/// The crate ships two implementations:
/// - [`LocalCenter`](crate::LocalCenter) - synchronous, wildcard capable
/// - [`DistributedCenter`](crate::DistributedCenter) - asynchronous, named subscriptions only
pub trait NotificationCenter: Clone + Send + Sync + 'static {
    /// Register `observer` for the notifications selected by `interest`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WildcardUnsupported`](crate::Error::WildcardUnsupported)
    /// when `interest` is [`Subscribe::all()`] and the center has no wildcard
    /// mode, or another error if the center is no longer usable.
    fn subscribe(
        &self,
        interest: impl Into<Subscribe>,
        observer: Arc<dyn Observer>,
    ) -> Result<SubscriptionId>;

    /// Release a subscription. Unknown or already released ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Post a notification to every matching subscriber.
    fn post(&self, notification: Notification) -> Result;

    /// Returns true if [`Subscribe::all()`] is accepted.
    fn supports_wildcard(&self) -> bool {
        true
    }
}
