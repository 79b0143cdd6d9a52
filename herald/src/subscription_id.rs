use std::{fmt, hash};
use uuid::Uuid;

/// Handle returned by [`NotificationCenter::subscribe`](crate::NotificationCenter::subscribe).
///
/// Pass it back to [`unsubscribe`](crate::NotificationCenter::unsubscribe)
/// to release the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, hash::Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptionId(u128);

impl SubscriptionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_u128())
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl From<u128> for SubscriptionId {
    fn from(value: u128) -> Self {
        SubscriptionId(value)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_u128(self.0))
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        SubscriptionId::new()
    }
}
