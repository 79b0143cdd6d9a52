use std::{any::Any, fmt};

use crate::{NotificationName, Payload};

/// A named occurrence with an optional payload, posted to a
/// [`NotificationCenter`](crate::NotificationCenter).
///
/// Notifications are immutable values. Two notifications are equal when
/// their names are equal and their payloads are equal (see [`Payload`] for
/// payload equality).
///
/// `Display` renders the form used in failure messages:
///
/// ```rust
/// use herald::Notification;
///
/// let plain = Notification::new("Foo");
/// assert_eq!(plain.to_string(), "name = Foo, payload = nil");
///
/// let counted = Notification::new("Foo").with_payload(1);
/// assert_eq!(counted.to_string(), "name = Foo, payload = 1");
/// ```
#[derive(Clone, PartialEq)]
pub struct Notification {
    name: NotificationName,
    payload: Option<Payload>,
}

impl Notification {
    /// Create a notification without a payload.
    pub fn new(name: impl Into<NotificationName>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Attach a payload value.
    pub fn with_payload<T>(mut self, value: T) -> Self
    where
        T: Any + PartialEq + fmt::Debug + Send + Sync,
    {
        self.payload = Some(Payload::new(value));
        self
    }

    /// Attach an already shared payload, keeping its allocation.
    pub fn with_shared_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[inline]
    pub fn name(&self) -> &NotificationName {
        &self.name
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Shorthand for `self.payload().and_then(|p| p.downcast_ref::<T>())`.
    #[inline]
    pub fn payload_as<T: Any>(&self) -> Option<&T> {
        self.payload.as_ref().and_then(|p| p.downcast_ref::<T>())
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("name", &self.name.as_str())
            .field("payload", &self.payload)
            .finish()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name = {}, payload = ", self.name)?;
        match &self.payload {
            Some(payload) => write!(f, "{payload:?}"),
            None => write!(f, "nil"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Notification {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Notification", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field(
            "payload",
            &self.payload.as_ref().map(|p| format!("{p:?}")),
        )?;
        state.end()
    }
}

/// Renders a sequence as `[a, b, c]` using each notification's `Display`.
pub(crate) fn render_sequence(notifications: &[Notification]) -> String {
    let items: Vec<String> = notifications.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
