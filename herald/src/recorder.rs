use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Error, Notification, NotificationCenter, NotificationName, Observer, Result, Subscribe,
    SubscriptionId,
};

type Buffer = Arc<Mutex<Vec<Notification>>>;

/// Captures every notification posted to a center while it is attached.
///
/// A recorder subscribes on [`attach`](Self::attach) and appends each
/// delivered notification to its own buffer, in delivery order, with no
/// filtering or deduplication. It unsubscribes on [`detach`](Self::detach),
/// on [`finish`](Self::finish), or when dropped, so the subscription is
/// released even if the observed code returns early or panics.
///
/// # Example
///
/// ```rust
/// use herald::{LocalCenter, Notification, NotificationCenter, Recorder};
///
/// let center = LocalCenter::new();
/// let recorder = Recorder::attach(&center)?;
/// center.post(Notification::new("Foo"))?;
/// center.post(Notification::new("Bar"))?;
///
/// let recorded = recorder.finish();
/// assert_eq!(recorded, vec![Notification::new("Foo"), Notification::new("Bar")]);
/// assert_eq!(center.subscription_count(), 0);
/// # Ok::<(), herald::Error>(())
/// ```
///
/// # Warning
///
/// The buffer is unbounded. A recorder is meant to live for one test
/// evaluation, not to sit on a busy production center.
pub struct Recorder<C: NotificationCenter> {
    center: C,
    subscriptions: Vec<SubscriptionId>,
    buffer: Buffer,
    attached: bool,
}

impl<C: NotificationCenter> Recorder<C> {
    /// Attach with one wildcard subscription.
    ///
    /// # Errors
    ///
    /// Surfaces the center's error, e.g.
    /// [`Error::WildcardUnsupported`](crate::Error::WildcardUnsupported).
    pub fn attach(center: &C) -> Result<Self> {
        let mut recorder = Self::detached(center);
        let id = center.subscribe(Subscribe::all(), recorder.observer())?;
        recorder.subscriptions.push(id);
        recorder.attached = true;
        Ok(recorder)
    }

    /// Attach with one named subscription per distinct name.
    ///
    /// Use this for centers without a wildcard mode. If any subscription
    /// fails, those already taken are released before the error is returned.
    ///
    /// # Errors
    ///
    /// [`Error::NoNotificationNames`] if `names` is empty: such a recorder
    /// would observe nothing.
    pub fn attach_to<I, N>(center: &C, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<NotificationName>,
    {
        let mut recorder = Self::detached(center);
        let mut seen: Vec<NotificationName> = Vec::new();
        for name in names {
            let name = name.into();
            if seen.contains(&name) {
                continue;
            }
            // On error, dropping `recorder` releases what was subscribed so far.
            let id = center.subscribe(Subscribe::to(name.clone()), recorder.observer())?;
            recorder.subscriptions.push(id);
            seen.push(name);
        }
        if seen.is_empty() {
            return Err(Error::NoNotificationNames);
        }
        recorder.attached = true;
        Ok(recorder)
    }

    fn detached(center: &C) -> Self {
        Self {
            center: center.clone(),
            subscriptions: Vec::new(),
            buffer: Arc::new(Mutex::new(Vec::new())),
            attached: false,
        }
    }

    fn observer(&self) -> Arc<dyn Observer> {
        let buffer = self.buffer.clone();
        Arc::new(move |notification: &Notification| {
            lock(&buffer).push(notification.clone());
        })
    }

    /// Returns a snapshot of everything recorded so far.
    pub fn recorded(&self) -> Vec<Notification> {
        lock(&self.buffer).clone()
    }

    /// Returns the number of recorded notifications.
    pub fn len(&self) -> usize {
        lock(&self.buffer).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.buffer).is_empty()
    }

    /// Returns true until the recorder detaches.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Release all subscriptions. Calling it again does nothing.
    ///
    /// Notifications recorded so far stay readable.
    pub fn detach(&mut self) {
        self.attached = false;
        for id in self.subscriptions.drain(..) {
            self.center.unsubscribe(id);
        }
    }

    /// Detach and hand over the recorded notifications.
    pub fn finish(mut self) -> Vec<Notification> {
        self.detach();
        std::mem::take(&mut *lock(&self.buffer))
    }
}

fn lock(buffer: &Buffer) -> MutexGuard<'_, Vec<Notification>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<C: NotificationCenter> Drop for Recorder<C> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<C: NotificationCenter> fmt::Debug for Recorder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("subscriptions", &self.subscriptions.len())
            .field("recorded", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        panic::{AssertUnwindSafe, catch_unwind},
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{Error, LocalCenter};

    /// Center that accepts a fixed number of subscriptions, then fails.
    #[derive(Clone)]
    struct Flaky {
        inner: LocalCenter,
        budget: Arc<AtomicUsize>,
    }

    impl NotificationCenter for Flaky {
        fn subscribe(
            &self,
            interest: impl Into<Subscribe>,
            observer: Arc<dyn Observer>,
        ) -> Result<SubscriptionId> {
            if self.budget.fetch_sub(1, Ordering::SeqCst) == 0 {
                return Err(Error::CenterClosed);
            }
            self.inner.subscribe(interest, observer)
        }

        fn unsubscribe(&self, id: SubscriptionId) {
            self.inner.unsubscribe(id);
        }

        fn post(&self, notification: Notification) -> Result {
            self.inner.post(notification)
        }
    }

    #[test]
    fn records_everything_in_delivery_order() {
        let center = LocalCenter::new();
        let recorder = Recorder::attach(&center).unwrap();

        center.post(Notification::new("Foo").with_payload(1)).unwrap();
        center.post(Notification::new("Bar").with_payload(2)).unwrap();
        center.post(Notification::new("Foo").with_payload(1)).unwrap();

        assert_eq!(
            recorder.recorded(),
            vec![
                Notification::new("Foo").with_payload(1),
                Notification::new("Bar").with_payload(2),
                Notification::new("Foo").with_payload(1),
            ]
        );
        assert_eq!(recorder.len(), 3);
    }

    #[test]
    fn ignores_posts_outside_the_window() {
        let center = LocalCenter::new();
        center.post(Notification::new("Before")).unwrap();
        let mut recorder = Recorder::attach(&center).unwrap();
        center.post(Notification::new("During")).unwrap();
        recorder.detach();
        center.post(Notification::new("After")).unwrap();

        assert_eq!(recorder.recorded(), vec![Notification::new("During")]);
        assert!(!recorder.is_attached());
    }

    #[test]
    fn detach_is_idempotent() {
        let center = LocalCenter::new();
        let mut recorder = Recorder::attach(&center).unwrap();
        assert!(recorder.is_attached());
        assert_eq!(center.subscription_count(), 1);

        recorder.detach();
        recorder.detach();

        assert_eq!(center.subscription_count(), 0);
        assert!(recorder.is_empty());
    }

    #[test]
    fn drop_releases_subscription() {
        let center = LocalCenter::new();
        {
            let _recorder = Recorder::attach(&center).unwrap();
            assert_eq!(center.subscription_count(), 1);
        }
        assert_eq!(center.subscription_count(), 0);
    }

    #[test]
    fn unwind_releases_subscription() {
        let center = LocalCenter::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _recorder = Recorder::attach(&center).unwrap();
            panic!("action blew up");
        }));
        assert!(result.is_err());
        assert_eq!(center.subscription_count(), 0);
    }

    #[test]
    fn attach_to_subscribes_once_per_distinct_name() {
        let center = LocalCenter::new();
        let recorder = Recorder::attach_to(&center, ["Foo", "Bar", "Foo"]).unwrap();
        assert_eq!(center.subscription_count(), 2);

        center.post(Notification::new("Foo")).unwrap();
        center.post(Notification::new("Baz")).unwrap();
        center.post(Notification::new("Bar")).unwrap();

        assert_eq!(
            recorder.finish(),
            vec![Notification::new("Foo"), Notification::new("Bar")]
        );
        assert_eq!(center.subscription_count(), 0);
    }

    #[test]
    fn attach_to_releases_partial_subscriptions_on_error() {
        let center = Flaky {
            inner: LocalCenter::new(),
            budget: Arc::new(AtomicUsize::new(1)),
        };
        let result = Recorder::attach_to(&center, ["Foo", "Bar"]);
        assert_eq!(result.err().map(|e| e.to_string()), Some(Error::CenterClosed.to_string()));
        assert_eq!(center.inner.subscription_count(), 0);
    }

    #[test]
    fn attach_to_rejects_empty_names() {
        let center = LocalCenter::new();
        let result = Recorder::attach_to(&center, Vec::<&str>::new());
        assert_eq!(result.err().map(|e| e.to_string()), Some(Error::NoNotificationNames.to_string()));
        assert_eq!(center.subscription_count(), 0);
    }

    #[test]
    fn named_recorder_reports_attached() {
        let center = LocalCenter::new();
        let mut recorder = Recorder::attach_to(&center, ["Foo"]).unwrap();
        assert!(recorder.is_attached());
        recorder.detach();
        assert!(!recorder.is_attached());
    }

    #[test]
    fn finish_freezes_buffer() {
        let center = LocalCenter::new();
        let recorder = Recorder::attach(&center).unwrap();
        center.post(Notification::new("Foo")).unwrap();

        let recorded = recorder.finish();
        center.post(Notification::new("Bar")).unwrap();

        assert_eq!(recorded, vec![Notification::new("Foo")]);
    }
}
