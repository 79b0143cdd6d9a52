//! Ready-to-use observers.
//!
//! These plug into any [`NotificationCenter`](crate::NotificationCenter)
//! alongside recorders, which is handy when a matcher fails and you want to
//! see everything the center saw.
//!
//! # Available Observers
//!
//! - [`Tracer`] - Logs each notification via the `tracing` crate
//! - [`Transcript`] - Writes notifications to a JSON Lines file (requires `recorder` feature)
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use herald::{LocalCenter, NotificationCenter, Subscribe, monitors::Tracer};
//!
//! let center = LocalCenter::new();
//! center.subscribe(Subscribe::all(), Arc::new(Tracer::new("ui")))?;
//! # Ok::<(), herald::Error>(())
//! ```

mod tracer;
pub use tracer::Tracer;

#[cfg(feature = "recorder")]
mod transcript;

#[cfg(feature = "recorder")]
#[cfg_attr(docsrs, doc(cfg(feature = "recorder")))]
pub use transcript::Transcript;
