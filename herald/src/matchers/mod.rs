//! Matchers applied to the notifications captured during one evaluation.
//!
//! A [`Matcher`] judges the whole captured sequence; the constructors in
//! this module cover the common cases:
//!
//! | Constructor | Passes when |
//! |-------------|-------------|
//! | [`equal`] | the sequence equals the expected notifications, in order |
//! | [`be_empty`] | nothing was posted |
//! | [`contain`] | some notification satisfies a [`NotificationMatcher`] |
//! | [`have_count`] | exactly `n` notifications were posted |
//! | [`satisfy`] | a custom predicate holds |
//!
//! # Example
//!
//! ```ignore
//! use herald::matchers::{contain, equal, NotificationMatcher};
//!
//! expect(action).to(post_notifications(equal([saved.clone()]), &center))?;
//! expect(action).to(post_notifications(contain("DidSave"), &center))?;
//! expect(action).to(post_notifications(
//!     contain(NotificationMatcher::by_payload(42_u32)),
//!     &center,
//! ))?;
//! ```

mod notification_matcher;
mod sequence;

pub use notification_matcher::NotificationMatcher;
pub use sequence::{BeEmpty, Contain, Equal, HaveCount, Satisfy, be_empty, contain, equal, have_count, satisfy};

use crate::Notification;

/// A predicate over the captured notification sequence.
///
/// The description completes the sentence "expected to ...", e.g.
/// `equal <[name = Foo, payload = nil]>` or `be empty`.
pub trait Matcher {
    /// Returns true if `actual` satisfies the matcher.
    fn matches(&self, actual: &[Notification]) -> bool;

    /// Describes what the matcher expects, for failure messages.
    fn description(&self) -> String;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn matches(&self, actual: &[Notification]) -> bool {
        (**self).matches(actual)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn matches(&self, actual: &[Notification]) -> bool {
        (**self).matches(actual)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}
