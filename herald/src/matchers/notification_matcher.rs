//! Matching a single notification.

use std::{any::Any, fmt, sync::Arc};

use crate::{Notification, NotificationName, Payload};

type MatchFn = Arc<dyn Fn(&Notification) -> bool + Send + Sync>;

/// A matcher for one notification, used by [`contain`](super::contain).
///
/// `NotificationMatcher` can match notifications by:
/// - Name
/// - Payload value
/// - Full equality with an expected notification
/// - Custom predicate
///
/// # Example
///
/// ```ignore
/// use herald::matchers::NotificationMatcher;
///
/// // Match by name
/// let matcher = NotificationMatcher::by_name("DidSave");
///
/// // Match by payload
/// let matcher = NotificationMatcher::by_payload(42_u32);
///
/// // Match by predicate
/// let matcher = NotificationMatcher::by_notification(|n| n.payload().is_none())
///     .with_description("notification without payload");
/// ```
#[derive(Clone)]
pub struct NotificationMatcher {
    matcher: MatchFn,
    description: String,
}

impl fmt::Debug for NotificationMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationMatcher")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl NotificationMatcher {
    /// Match notifications by name.
    pub fn by_name(name: impl Into<NotificationName>) -> Self {
        let name = name.into();
        Self {
            description: format!("notification named {name}"),
            matcher: Arc::new(move |n: &Notification| *n.name() == name),
        }
    }

    /// Match notifications whose payload equals `value`.
    pub fn by_payload<T>(value: T) -> Self
    where
        T: Any + PartialEq + fmt::Debug + Send + Sync,
    {
        let expected = Payload::new(value);
        Self {
            description: format!("notification with payload {expected:?}"),
            matcher: Arc::new(move |n: &Notification| n.payload() == Some(&expected)),
        }
    }

    /// Match notifications using a custom predicate.
    pub fn by_notification<F>(predicate: F) -> Self
    where
        F: Fn(&Notification) -> bool + Send + Sync + 'static,
    {
        Self {
            description: "notification matching predicate".to_string(),
            matcher: Arc::new(predicate),
        }
    }

    /// Replace the description used in failure messages.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true if the given notification matches.
    pub fn matches(&self, notification: &Notification) -> bool {
        (self.matcher)(notification)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// Allow &str to be used directly as a name matcher
impl From<&str> for NotificationMatcher {
    fn from(name: &str) -> Self {
        NotificationMatcher::by_name(name)
    }
}

impl From<String> for NotificationMatcher {
    fn from(name: String) -> Self {
        NotificationMatcher::by_name(name)
    }
}

impl From<NotificationName> for NotificationMatcher {
    fn from(name: NotificationName) -> Self {
        NotificationMatcher::by_name(name)
    }
}

// A full notification matches by equality
impl From<Notification> for NotificationMatcher {
    fn from(expected: Notification) -> Self {
        Self {
            description: format!("<{expected}>"),
            matcher: Arc::new(move |n: &Notification| *n == expected),
        }
    }
}
