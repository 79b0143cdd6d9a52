use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::Mutex,
};

use crate::{Notification, Observer};

/// An observer that writes notifications to a file in JSON Lines format.
///
/// Each delivered notification becomes one JSON object on its own line,
/// `{"name":"Foo","payload":"42"}`, with the payload rendered through its
/// `Debug` form (`null` when absent). Lines are flushed immediately for
/// reliability (not optimized for high-throughput).
///
/// # Example
///
/// ```ignore
/// let transcript = Transcript::new("notifications.jsonl")?;
/// center.subscribe(Subscribe::all(), Arc::new(transcript))?;
/// ```
#[derive(Debug)]
pub struct Transcript {
    writer: Mutex<BufWriter<File>>,
}

impl Transcript {
    /// Create a transcript that writes to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] if the file cannot be created.
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl Observer for Transcript {
    fn on_notification(&self, notification: &Notification) {
        let Ok(mut writer) = self.writer.lock() else {
            tracing::warn!("Transcript writer poisoned");
            return;
        };
        if let Err(e) = serde_json::to_writer(&mut *writer, notification) {
            tracing::warn!("Transcript failed to serialize notification: {}", e);
        }
        if let Err(e) = writer.write_all(b"\n").and_then(|()| writer.flush()) {
            tracing::warn!("Transcript failed to write notification: {}", e);
        }
    }
}
