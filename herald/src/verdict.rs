use std::fmt;

use crate::{Notification, notification::render_sequence};

/// Outcome of one evaluation of a notification matcher.
///
/// Keeps both halves of the failure message so callers can phrase it for
/// positive, negated and eventual expectations alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Verdict {
    passed: bool,
    expected: String,
    actual: String,
}

impl Verdict {
    pub(crate) fn new(passed: bool, expected: String, recorded: &[Notification]) -> Self {
        Self {
            passed,
            expected,
            actual: describe_recorded(recorded),
        }
    }

    /// Returns true if the inner matcher accepted the recorded notifications.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The inner matcher's description, e.g. `equal <[name = Foo, payload = nil]>`.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// What was recorded: `<[...]>`, or `no notifications` when nothing was.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// The failure message for a positive expectation:
    /// `expected to <expected>, got <actual>`.
    pub fn message(&self) -> String {
        self.message_with("to")
    }

    pub(crate) fn message_with(&self, verb: &str) -> String {
        format!("expected {verb} {}, got {}", self.expected, self.actual)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "passed" } else { "failed" };
        write!(f, "{status}: {}", self.message())
    }
}

/// An empty capture reads "no notifications" rather than `<[]>`.
fn describe_recorded(recorded: &[Notification]) -> String {
    if recorded.is_empty() {
        "no notifications".to_string()
    } else {
        format!("<{}>", render_sequence(recorded))
    }
}
