use std::{fmt, time::Duration};

use crate::{
    ActionResult, Notification, NotificationCenter, NotificationName, Recorder, Result, Verdict,
    matchers::Matcher,
};

/// Matches the notifications an action posts to a center.
///
/// Built by [`post_notifications`] or [`post_distributed_notifications`]
/// and usually handed to [`expect`](crate::expect). Each evaluation:
///
/// 1. attaches a fresh [`Recorder`] to the center,
/// 2. runs the action once,
/// 3. detaches the recorder and freezes what it captured,
/// 4. applies the inner [`Matcher`] to the captured sequence.
///
/// The recorder is detached on every path out of step 2, including an
/// action error or panic. Evaluations share no state: running the same
/// evaluation twice against the same center gives the same verdict.
pub struct PostNotifications<M, C: NotificationCenter> {
    matcher: M,
    center: C,
    names: Option<Vec<NotificationName>>,
}

/// Match what an action posts to `center`, using a wildcard subscription.
///
/// # Example
///
/// ```rust
/// use herald::{LocalCenter, Notification, NotificationCenter, matchers::be_empty, post_notifications};
///
/// let center = LocalCenter::new();
/// let verdict = post_notifications(be_empty(), &center).evaluate(|| ())?;
/// assert!(verdict.passed());
///
/// let verdict = post_notifications(be_empty(), &center)
///     .evaluate(|| center.post(Notification::new("Foo")))?;
/// assert_eq!(verdict.message(), "expected to be empty, got <[name = Foo, payload = nil]>");
/// # Ok::<(), herald::Error>(())
/// ```
pub fn post_notifications<M, C>(matcher: M, center: &C) -> PostNotifications<M, C>
where
    M: Matcher,
    C: NotificationCenter,
{
    PostNotifications {
        matcher,
        center: center.clone(),
        names: None,
    }
}

/// Match what an action posts to a center without wildcard support.
///
/// The recorder subscribes once per name in `names`; notifications with
/// any other name are not observed. Evaluating with no names fails with
/// [`Error::NoNotificationNames`](crate::Error::NoNotificationNames).
pub fn post_distributed_notifications<M, C, I, N>(
    matcher: M,
    center: &C,
    names: I,
) -> PostNotifications<M, C>
where
    M: Matcher,
    C: NotificationCenter,
    I: IntoIterator<Item = N>,
    N: Into<NotificationName>,
{
    PostNotifications {
        matcher,
        center: center.clone(),
        names: Some(names.into_iter().map(Into::into).collect()),
    }
}

impl<M: Matcher, C: NotificationCenter> PostNotifications<M, C> {
    fn attach(&self) -> Result<Recorder<C>> {
        match &self.names {
            None => Recorder::attach(&self.center),
            Some(names) => Recorder::attach_to(&self.center, names.iter().cloned()),
        }
    }

    /// Run `action` once inside a recording window and judge what it posted.
    ///
    /// The window closes as soon as the action returns, so only
    /// notifications delivered before then are seen.
    ///
    /// # Errors
    ///
    /// Fails without a verdict if the recorder cannot attach, or with
    /// [`Error::Action`](crate::Error::Action) if the action fails. A
    /// mismatch is not an error here: inspect [`Verdict::passed`].
    pub fn evaluate<F, R>(&self, action: F) -> Result<Verdict>
    where
        F: FnOnce() -> R,
        R: ActionResult,
    {
        let recorder = self.attach()?;
        let outcome = action().into_result();
        let recorded = recorder.finish();
        outcome?;
        Ok(self.judge(&recorded))
    }

    /// Like [`evaluate`](Self::evaluate), but keep recording for `window`
    /// after the action returns.
    ///
    /// Work the action defers (spawned tasks, asynchronous centers) lands in
    /// this evaluation's window if it is delivered before the window closes.
    pub async fn evaluate_within<F, R>(&self, action: F, window: Duration) -> Result<Verdict>
    where
        F: FnOnce() -> R,
        R: ActionResult,
    {
        let recorder = self.attach()?;
        let outcome = action().into_result();
        if outcome.is_ok() {
            tokio::time::sleep(window).await;
        }
        let recorded = recorder.finish();
        outcome?;
        Ok(self.judge(&recorded))
    }

    /// Describes what the inner matcher expects.
    pub fn description(&self) -> String {
        self.matcher.description()
    }

    fn judge(&self, recorded: &[Notification]) -> Verdict {
        let verdict = Verdict::new(
            self.matcher.matches(recorded),
            self.matcher.description(),
            recorded,
        );
        tracing::debug!(
            passed = verdict.passed(),
            expected = %verdict.expected(),
            actual = %verdict.actual(),
            "notifications evaluated"
        );
        verdict
    }
}

impl<M: Matcher, C: NotificationCenter> fmt::Debug for PostNotifications<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostNotifications")
            .field("matcher", &self.matcher.description())
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
