use std::time::Duration;

/// Timing and capacity settings for eventual evaluation and centers.
///
/// Use the builder pattern to customize, or use [`Default`] for the
/// defaults used by [`Expectation::to_eventually`](crate::Expectation::to_eventually).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use herald::Config;
///
/// let config = Config::default()
///     .with_eventually_timeout(Duration::from_secs(3))   // wait longer
///     .with_poll_interval(Duration::from_millis(25))     // poll less often
///     .with_delivery_channel_capacity(1024);             // deeper distributed queue
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// How long eventual evaluation keeps retrying before reporting a mismatch.
    /// Default: 1s
    pub eventually_timeout: Duration,

    /// Pause between eventual attempts. Each attempt keeps its recorder
    /// attached for this long after the action returns.
    /// Default: 10ms
    pub poll_interval: Duration,

    /// Capacity of the [`DistributedCenter`](crate::DistributedCenter) delivery queue.
    /// Posting to a full queue fails with [`Error::DeliveryQueueFull`](crate::Error::DeliveryQueueFull).
    /// Default: 256
    pub delivery_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            eventually_timeout: Duration::from_secs(1),
            poll_interval: Duration::from_millis(10),
            delivery_channel_capacity: 256,
        }
    }
}

impl Config {
    /// Set the eventual evaluation timeout.
    pub fn with_eventually_timeout(mut self, timeout: Duration) -> Self {
        self.eventually_timeout = timeout;
        self
    }

    /// Returns the eventual evaluation timeout.
    pub fn eventually_timeout(&self) -> Duration {
        self.eventually_timeout
    }

    /// Set the pause between eventual attempts.
    ///
    /// Trade-offs:
    /// - Short intervals (1-5ms): faster passes, more action re-runs
    /// - Long intervals (50ms+): fewer re-runs, slower feedback
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the pause between eventual attempts.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Set the distributed center delivery queue capacity.
    pub fn with_delivery_channel_capacity(mut self, capacity: usize) -> Self {
        self.delivery_channel_capacity = capacity;
        self
    }

    /// Returns the distributed center delivery queue capacity.
    pub fn delivery_channel_capacity(&self) -> usize {
        self.delivery_channel_capacity
    }
}
