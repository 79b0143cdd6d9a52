use std::{
    fmt,
    future::{Future, IntoFuture},
    marker::PhantomData,
    pin::Pin,
    time::{Duration, Instant},
};

use crate::{
    ActionResult, Config, Error, NotificationCenter, PostNotifications, Result, matchers::Matcher,
};

/// Start an expectation about what `action` posts.
///
/// The action is a closure returning `()` or a `Result` (see
/// [`ActionResult`]). It runs once per evaluation; under
/// [`to_eventually`](Expectation::to_eventually) it runs once per attempt, so
/// it must be safe to repeat.
///
/// # Example
///
/// ```rust
/// use herald::{LocalCenter, Notification, NotificationCenter, expect, matchers::{be_empty, equal},
///     post_notifications};
///
/// let center = LocalCenter::new();
/// let foo = Notification::new("Foo");
///
/// expect(|| ()).to(post_notifications(be_empty(), &center))?;
/// expect(|| center.post(foo.clone()))
///     .to(post_notifications(equal([foo.clone()]), &center))?;
///
/// let err = expect(|| ())
///     .to(post_notifications(equal([foo.clone()]), &center))
///     .unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "expected to equal <[name = Foo, payload = nil]>, got no notifications"
/// );
/// # Ok::<(), herald::Error>(())
/// ```
pub fn expect<F, R>(action: F) -> Expectation<F>
where
    F: FnMut() -> R,
    R: ActionResult,
{
    Expectation { action }
}

/// An action waiting to be checked against a notification matcher.
///
/// Created by [`expect`].
pub struct Expectation<F> {
    action: F,
}

impl<F, R> Expectation<F>
where
    F: FnMut() -> R,
    R: ActionResult,
{
    /// Run the action once and require the matcher to pass.
    ///
    /// Only notifications delivered before the action returns are seen.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] with the rendered failure message, or the
    /// evaluation error (center or action failure) unchanged.
    pub fn to<M, C>(&mut self, matcher: PostNotifications<M, C>) -> Result
    where
        M: Matcher,
        C: NotificationCenter,
    {
        self.check(matcher, Polarity::Positive)
    }

    /// Run the action once and require the matcher to fail.
    pub fn to_not<M, C>(&mut self, matcher: PostNotifications<M, C>) -> Result
    where
        M: Matcher,
        C: NotificationCenter,
    {
        self.check(matcher, Polarity::Negative)
    }

    fn check<M, C>(&mut self, matcher: PostNotifications<M, C>, polarity: Polarity) -> Result
    where
        M: Matcher,
        C: NotificationCenter,
    {
        let verdict = matcher.evaluate(&mut self.action)?;
        if verdict.passed() == polarity.wants_pass() {
            Ok(())
        } else {
            Err(Error::Mismatch(verdict.message_with(polarity.verb())))
        }
    }

    /// Retry until the matcher passes or the timeout elapses.
    ///
    /// Returns a builder; `.await` it to run. Each attempt attaches a fresh
    /// recorder, runs the action, and keeps recording for one poll interval
    /// so deferred posts can land. Defaults come from [`Config::default`]:
    /// 1s timeout, 10ms poll interval.
    ///
    /// ```ignore
    /// expect(|| spawn_post(&center))
    ///     .to_eventually(post_notifications(equal([foo]), &center))
    ///     .within(Duration::from_secs(3))
    ///     .await?;
    /// ```
    pub fn to_eventually<'a, M, C>(self, matcher: PostNotifications<M, C>) -> Eventually<'a, F, M, C>
    where
        M: Matcher,
        C: NotificationCenter,
    {
        Eventually::new(self.action, matcher, Polarity::Positive)
    }

    /// Retry until the matcher fails or the timeout elapses.
    pub fn to_eventually_not<'a, M, C>(
        self,
        matcher: PostNotifications<M, C>,
    ) -> Eventually<'a, F, M, C>
    where
        M: Matcher,
        C: NotificationCenter,
    {
        Eventually::new(self.action, matcher, Polarity::Negative)
    }
}

impl<F> fmt::Debug for Expectation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    fn wants_pass(self) -> bool {
        self == Polarity::Positive
    }

    fn verb(self) -> &'static str {
        match self {
            Polarity::Positive => "to",
            Polarity::Negative => "to not",
        }
    }

    fn eventual_verb(self) -> &'static str {
        match self {
            Polarity::Positive => "to eventually",
            Polarity::Negative => "to eventually not",
        }
    }
}

/// A polling expectation builder.
///
/// Created by [`Expectation::to_eventually`] and
/// [`Expectation::to_eventually_not`]. Awaiting it re-runs the whole
/// attach, act, detach, compare cycle until the matcher gives the wanted
/// verdict. When the timeout expires, returns [`Error::Mismatch`] built
/// from the last attempt. An attempt that errors (center or action failure)
/// stops polling at once.
///
/// The timeout is checked between attempts: an action still running when
/// it expires is allowed to finish.
pub struct Eventually<'a, F, M, C: NotificationCenter> {
    action: F,
    matcher: PostNotifications<M, C>,
    polarity: Polarity,
    timeout: Duration,
    poll_interval: Duration,
    /// Bounds how long the boxed future may borrow the action's captures.
    _borrow: PhantomData<&'a ()>,
}

impl<'a, F, R, M, C> Eventually<'a, F, M, C>
where
    F: FnMut() -> R,
    R: ActionResult,
    M: Matcher,
    C: NotificationCenter,
{
    fn new(action: F, matcher: PostNotifications<M, C>, polarity: Polarity) -> Self {
        let config = Config::default();
        Self {
            action,
            matcher,
            polarity,
            timeout: config.eventually_timeout(),
            poll_interval: config.poll_interval(),
            _borrow: PhantomData,
        }
    }

    /// Override the default 1-second timeout.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the default 10ms pause between attempts.
    pub fn poll_every(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Take timeout and poll interval from `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.timeout = config.eventually_timeout();
        self.poll_interval = config.poll_interval();
        self
    }

    async fn run(mut self) -> Result {
        // A timeout too large to represent means no deadline.
        let deadline = Instant::now().checked_add(self.timeout);
        let mut attempts: usize = 0;

        loop {
            attempts += 1;
            let window = match deadline {
                Some(deadline) => self
                    .poll_interval
                    .min(deadline.saturating_duration_since(Instant::now())),
                None => self.poll_interval,
            };
            let verdict = self
                .matcher
                .evaluate_within(&mut self.action, window)
                .await?;

            if verdict.passed() == self.polarity.wants_pass() {
                tracing::debug!(attempts, "eventual expectation met");
                return Ok(());
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                let message = verdict.message_with(self.polarity.eventual_verb());
                tracing::debug!(attempts, timeout = ?self.timeout, "eventual expectation timed out");
                return Err(Error::Mismatch(message));
            }
        }
    }
}

impl<'a, F, R, M, C> IntoFuture for Eventually<'a, F, M, C>
where
    F: FnMut() -> R + 'a,
    R: ActionResult + 'a,
    M: Matcher + 'a,
    C: NotificationCenter,
{
    type Output = Result;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<F, M: Matcher, C: NotificationCenter> fmt::Debug for Eventually<'_, F, M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eventually")
            .field("matcher", &self.matcher)
            .field("polarity", &self.polarity)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
