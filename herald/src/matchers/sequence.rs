use std::{fmt, sync::Arc};

use super::{Matcher, NotificationMatcher};
use crate::{Notification, notification::render_sequence};

/// Passes when the captured sequence equals the expected one, element by
/// element and in order. Created by [`equal`].
#[derive(Debug, Clone)]
pub struct Equal {
    expected: Vec<Notification>,
}

/// Expect exactly these notifications, in this order.
///
/// ```rust
/// use herald::{Notification, matchers::{Matcher, equal}};
///
/// let matcher = equal([Notification::new("Foo")]);
/// assert_eq!(matcher.description(), "equal <[name = Foo, payload = nil]>");
/// assert!(matcher.matches(&[Notification::new("Foo")]));
/// assert!(!matcher.matches(&[]));
/// ```
pub fn equal(expected: impl IntoIterator<Item = Notification>) -> Equal {
    Equal {
        expected: expected.into_iter().collect(),
    }
}

impl Matcher for Equal {
    fn matches(&self, actual: &[Notification]) -> bool {
        self.expected.as_slice() == actual
    }

    fn description(&self) -> String {
        format!("equal <{}>", render_sequence(&self.expected))
    }
}

/// Passes when nothing was captured. Created by [`be_empty`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BeEmpty;

/// Expect no notifications at all.
pub fn be_empty() -> BeEmpty {
    BeEmpty
}

impl Matcher for BeEmpty {
    fn matches(&self, actual: &[Notification]) -> bool {
        actual.is_empty()
    }

    fn description(&self) -> String {
        "be empty".to_string()
    }
}

/// Passes when any captured notification satisfies a
/// [`NotificationMatcher`]. Created by [`contain`].
#[derive(Debug, Clone)]
pub struct Contain {
    matcher: NotificationMatcher,
}

/// Expect at least one notification matching `matcher`.
///
/// Accepts anything that converts into a [`NotificationMatcher`]: a name
/// (`&str`, `String`, [`NotificationName`](crate::NotificationName)), a
/// full [`Notification`] (equality), or a matcher built directly.
pub fn contain(matcher: impl Into<NotificationMatcher>) -> Contain {
    Contain {
        matcher: matcher.into(),
    }
}

impl Matcher for Contain {
    fn matches(&self, actual: &[Notification]) -> bool {
        actual.iter().any(|n| self.matcher.matches(n))
    }

    fn description(&self) -> String {
        format!("contain {}", self.matcher.description())
    }
}

/// Passes when exactly `n` notifications were captured. Created by [`have_count`].
#[derive(Debug, Clone, Copy)]
pub struct HaveCount {
    count: usize,
}

/// Expect exactly `count` notifications, whatever they are.
pub fn have_count(count: usize) -> HaveCount {
    HaveCount { count }
}

impl Matcher for HaveCount {
    fn matches(&self, actual: &[Notification]) -> bool {
        actual.len() == self.count
    }

    fn description(&self) -> String {
        format!("have count <{}>", self.count)
    }
}

type SequencePredicate = Arc<dyn Fn(&[Notification]) -> bool + Send + Sync>;

/// Passes when a custom predicate holds. Created by [`satisfy`].
#[derive(Clone)]
pub struct Satisfy {
    description: String,
    predicate: SequencePredicate,
}

/// Expect the captured sequence to satisfy `predicate`.
///
/// `description` completes "expected to ..." in failure messages.
pub fn satisfy<F>(description: impl Into<String>, predicate: F) -> Satisfy
where
    F: Fn(&[Notification]) -> bool + Send + Sync + 'static,
{
    Satisfy {
        description: description.into(),
        predicate: Arc::new(predicate),
    }
}

impl Matcher for Satisfy {
    fn matches(&self, actual: &[Notification]) -> bool {
        (self.predicate)(actual)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl fmt::Debug for Satisfy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satisfy")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
