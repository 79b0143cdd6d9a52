use std::{hash::Hash, sync::Arc};

/// Name of a notification, the key centers route on.
///
/// `NotificationName` is cheap to clone: clones share one allocation.
/// Equality compares the string content with a fast path for pointer
/// equality when names share the same allocation.
///
/// Names are opaque. A center rejects posting a notification whose name is
/// empty with [`Error::EmptyNotificationName`](crate::Error::EmptyNotificationName).
///
/// # Example
///
/// ```rust
/// use herald::NotificationName;
///
/// let did_save = NotificationName::new("DidSave");
/// assert_eq!(did_save, "DidSave".into());
/// assert_eq!(did_save.as_str(), "DidSave");
/// ```
#[derive(Debug, Clone, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationName(Arc<str>);

impl NotificationName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the string representation of this name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for NotificationName {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for NotificationName {}

impl std::fmt::Display for NotificationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for NotificationName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl From<&str> for NotificationName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NotificationName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&NotificationName> for NotificationName {
    fn from(name: &NotificationName) -> Self {
        name.clone()
    }
}
