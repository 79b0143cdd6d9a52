#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Herald
//!
//! Assert which notifications an action posts to a notification center.
//!
//! Herald wraps an action in a recording window: a [`Recorder`] subscribes
//! to the center, the action runs, the recorder detaches, and a matcher
//! judges the captured sequence. Failures read like
//! `expected to equal <[name = Foo, payload = nil]>, got no notifications`.
//!
//! ## Quick Start
//!
//! ```rust
//! use herald::{
//!     LocalCenter, Notification, NotificationCenter, expect, matchers::equal, post_notifications,
//! };
//!
//! let center = LocalCenter::new();
//! let saved = Notification::new("DidSave").with_payload(42);
//!
//! expect(|| center.post(saved.clone()))
//!     .to(post_notifications(equal([saved.clone()]), &center))?;
//! # Ok::<(), herald::Error>(())
//! ```
//!
//! ## Eventual Evaluation
//!
//! When delivery is deferred (spawned tasks, an asynchronous center), use
//! [`Expectation::to_eventually`]. Each attempt re-runs the action with a
//! fresh recorder and keeps recording for one poll interval:
//!
//! ```rust,ignore
//! expect(|| center.post(saved.clone()))
//!     .to_eventually(post_distributed_notifications(equal([saved.clone()]), &center, ["DidSave"]))
//!     .within(Duration::from_secs(2))
//!     .await?;
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Notification`] | A posted message: a [`NotificationName`] plus an optional [`Payload`] |
//! | [`NotificationCenter`] | Trait for publish/subscribe registries |
//! | [`LocalCenter`] | Synchronous center with wildcard subscriptions |
//! | [`DistributedCenter`] | Asynchronous center, named subscriptions only |
//! | [`Recorder`] | Captures notifications while attached |
//! | [`PostNotifications`] | Matcher over what an action posts |
//! | [`Verdict`] | Outcome of one evaluation |
//! | [`Config`] | Timeouts and channel sizes |
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for names, ids, config and notifications
//! - **`recorder`** - Built-in [`monitors::Transcript`] observer writing JSON Lines files (enables `serde`)

mod action;
mod center;
mod config;
mod distributed_center;
mod error;
mod expectation;
mod local_center;
mod notification;
mod notification_name;
mod payload;
mod post_notifications;
mod recorder;
mod registry;
mod subscribe;
mod subscription_id;
mod verdict;

pub mod matchers;
pub mod monitors;

pub use action::ActionResult;
pub use center::{NotificationCenter, Observer};
pub use config::Config;
pub use distributed_center::DistributedCenter;
pub use error::Error;
pub use expectation::{Eventually, Expectation, expect};
pub use local_center::LocalCenter;
pub use notification::Notification;
pub use notification_name::NotificationName;
pub use payload::Payload;
pub use post_notifications::{
    PostNotifications, post_distributed_notifications, post_notifications,
};
pub use recorder::Recorder;
pub use subscribe::Subscribe;
pub use subscription_id::SubscriptionId;
pub use verdict::Verdict;

/// Convenience alias for `Result<T, herald::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
