use crate::{Notification, Observer};

/// An observer that logs every notification to the `tracing` crate.
///
/// Log levels:
/// - `trace` - notification name only (high volume)
/// - `debug` - name and payload
///
/// The label tells apart several centers traced in the same test.
///
/// # Example
///
/// ```ignore
/// use herald::monitors::Tracer;
///
/// center.subscribe(Subscribe::all(), Arc::new(Tracer::new("sync")))?;
/// ```
#[derive(Debug, Clone)]
pub struct Tracer {
    label: String,
}

impl Tracer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new("center")
    }
}

impl Observer for Tracer {
    fn on_notification(&self, notification: &Notification) {
        tracing::trace!(
            center = %self.label,
            name = %notification.name(),
            "notification posted"
        );
        tracing::debug!(
            center = %self.label,
            name = %notification.name(),
            payload = ?notification.payload(),
            "notification delivered"
        );
    }
}
