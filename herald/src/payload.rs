use std::{any::Any, fmt, sync::Arc};

/// Object-safe view of a payload value.
trait PayloadValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn PayloadValue) -> bool;
}

impl<T> PayloadValue for T
where
    T: Any + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn PayloadValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Optional value attached to a [`Notification`](crate::Notification).
///
/// A payload can hold any `PartialEq + Debug + Send + Sync + 'static`
/// value. Herald never looks inside it: two payloads are equal when they
/// share the same allocation, or when both hold the same concrete type and
/// that type's `PartialEq` says they are equal. Values of different types
/// are never equal.
///
/// Cloning a payload is cheap (one `Arc` increment).
///
/// # Example
///
/// ```rust
/// use herald::Payload;
///
/// let a = Payload::new(1_i64);
/// assert_eq!(a, Payload::new(1_i64));
/// assert_ne!(a, Payload::new(1_u8));
/// assert_eq!(a.downcast_ref::<i64>(), Some(&1));
/// ```
#[derive(Clone)]
pub struct Payload(Arc<dyn PayloadValue>);

impl Payload {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + PartialEq + fmt::Debug + Send + Sync,
    {
        Self(Arc::new(value))
    }

    /// Returns the payload value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Returns true if the payload holds a value of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Returns true if both payloads share the same allocation.
    pub fn ptr_eq(&self, other: &Payload) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
