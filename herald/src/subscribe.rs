use std::fmt;

use crate::NotificationName;

/// Specifies which notifications a subscription receives.
///
/// - [`Subscribe::all()`] - every notification posted to the center (wildcard)
/// - [`Subscribe::to`] - only notifications with the given name
///
/// Names convert to `Subscribe` automatically:
///
/// ```ignore
/// // These are equivalent:
/// center.subscribe("DidSave", observer)?;
/// center.subscribe(Subscribe::to("DidSave"), observer)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscribe(Interest);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Interest {
    All,
    Named(NotificationName),
}

impl Subscribe {
    /// Subscribe to every notification, whatever its name.
    ///
    /// Not every center supports this; see
    /// [`NotificationCenter::supports_wildcard`](crate::NotificationCenter::supports_wildcard).
    pub fn all() -> Self {
        Subscribe(Interest::All)
    }

    /// Subscribe to notifications with one specific name.
    pub fn to(name: impl Into<NotificationName>) -> Self {
        Subscribe(Interest::Named(name.into()))
    }

    /// Returns true for the wildcard subscription.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.0, Interest::All)
    }

    /// Returns the subscribed name, or `None` for the wildcard.
    pub fn name(&self) -> Option<&NotificationName> {
        match &self.0 {
            Interest::All => None,
            Interest::Named(name) => Some(name),
        }
    }

    /// Returns true if a notification called `name` is delivered under this subscription.
    pub fn accepts(&self, name: &NotificationName) -> bool {
        match &self.0 {
            Interest::All => true,
            Interest::Named(n) => n == name,
        }
    }
}

impl fmt::Display for Subscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Interest::All => write!(f, "*"),
            Interest::Named(name) => write!(f, "{name}"),
        }
    }
}

impl From<NotificationName> for Subscribe {
    fn from(name: NotificationName) -> Self {
        Subscribe::to(name)
    }
}

impl From<&NotificationName> for Subscribe {
    fn from(name: &NotificationName) -> Self {
        Subscribe::to(name.clone())
    }
}

impl From<&str> for Subscribe {
    fn from(name: &str) -> Self {
        Subscribe::to(name)
    }
}
