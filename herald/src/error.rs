use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;

/// The single error type for all herald operations.
///
/// Every fallible herald API returns `herald::Result<T>` (alias for
/// `Result<T, herald::Error>`). Failures from the observed action, from the
/// notification center and from assertion mismatches all surface through
/// this enum so a test only needs to handle one error type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The recorded notifications did not satisfy the matcher.
    ///
    /// Carries the fully rendered failure message, e.g.
    /// `expected to equal <[name = Foo, payload = nil]>, got no notifications`.
    #[error("{0}")]
    Mismatch(String),

    /// The action under observation returned an error.
    #[error("Action failed: {0}")]
    Action(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("Notification center does not support wildcard subscriptions")]
    WildcardUnsupported,

    #[error("Notification center is closed")]
    CenterClosed,

    #[error("Notification center delivery queue is full")]
    DeliveryQueueFull,

    #[error("Notification name must not be empty")]
    EmptyNotificationName,

    /// A named recording was requested without any names to observe.
    #[error("At least one notification name is required")]
    NoNotificationNames,

    #[error("No Tokio runtime available to drive the notification center")]
    NoRuntime,
}

impl Error {
    pub fn action(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Action(Arc::new(e))
    }

    /// Returns the rendered failure message if this is a [`Error::Mismatch`].
    pub fn mismatch_message(&self) -> Option<&str> {
        match self {
            Error::Mismatch(message) => Some(message),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mismatch(a), Self::Mismatch(b)) => a == b,
            (Self::Action(a), Self::Action(b)) => Arc::ptr_eq(a, b),
            (Self::WildcardUnsupported, Self::WildcardUnsupported) => true,
            (Self::CenterClosed, Self::CenterClosed) => true,
            (Self::DeliveryQueueFull, Self::DeliveryQueueFull) => true,
            (Self::EmptyNotificationName, Self::EmptyNotificationName) => true,
            (Self::NoNotificationNames, Self::NoNotificationNames) => true,
            (Self::NoRuntime, Self::NoRuntime) => true,
            _ => false,
        }
    }
}

impl Eq for Error {}

impl<T> From<TrySendError<T>> for Error {
    fn from(e: TrySendError<T>) -> Self {
        match e {
            TrySendError::Full(_) => Error::DeliveryQueueFull,
            TrySendError::Closed(_) => Error::CenterClosed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_displays_message_verbatim() {
        let err = Error::Mismatch("expected to be empty, got <[name = Foo, payload = nil]>".into());
        assert_eq!(
            err.to_string(),
            "expected to be empty, got <[name = Foo, payload = nil]>"
        );
        assert_eq!(
            err.mismatch_message(),
            Some("expected to be empty, got <[name = Foo, payload = nil]>")
        );
        assert_eq!(Error::CenterClosed.mismatch_message(), None);
    }

    #[test]
    fn action_error_keeps_source() {
        let io = std::io::Error::other("disk on fire");
        let err = Error::action(io);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk on fire"));
    }

    #[test]
    fn try_send_errors_map_to_center_errors() {
        let full: Error = TrySendError::Full(1u8).into();
        let closed: Error = TrySendError::Closed(1u8).into();
        assert_eq!(full, Error::DeliveryQueueFull);
        assert_eq!(closed, Error::CenterClosed);
    }
}
