use std::time::Duration;

/// Status codes retried by default: throttling plus transient upstream
/// failures.
pub const DEFAULT_RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry behavior for one logical request.
///
/// The configuration is snapshotted when an operation starts; changing a
/// client's options mid-flight never affects requests already running.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Retries permitted after the initial attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Backoff before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any wait, including server-provided hints.
    pub max_delay: Duration,
    /// Growth factor between consecutive backoffs. Values below `1.0` are
    /// treated as `1.0`.
    pub backoff_multiplier: f64,
    /// Status codes eligible for retry. Anything else fails immediately.
    pub retryable_status_codes: Vec<u16>,
    /// Whether connect, timeout and other transport failures are retried.
    pub retry_on_network_error: bool,
    /// Randomize each backoff into `[delay / 2, delay]` to spread out
    /// clients that fail in lockstep.
    pub use_jitter: bool,
    /// Honor the `Retry-After` response header instead of computed backoff.
    pub respect_retry_after: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            retryable_status_codes: DEFAULT_RETRYABLE_STATUS_CODES.to_vec(),
            retry_on_network_error: true,
            use_jitter: true,
            respect_retry_after: true,
        }
    }
}

impl RetryConfig {
    /// Configuration that performs exactly one attempt.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Sets the number of retries allowed after the initial attempt.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff used before the first retry.
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Sets the ceiling applied to every computed or hinted wait.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Sets the growth factor between consecutive backoffs.
    pub fn with_backoff_multiplier(mut self, backoff_multiplier: f64) -> Self {
        self.backoff_multiplier = backoff_multiplier;
        self
    }

    /// Replaces the status codes eligible for retry.
    pub fn with_retryable_status_codes(mut self, codes: impl Into<Vec<u16>>) -> Self {
        self.retryable_status_codes = codes.into();
        self
    }

    /// Controls whether transport failures are retried.
    pub fn with_retry_on_network_error(mut self, retry: bool) -> Self {
        self.retry_on_network_error = retry;
        self
    }

    /// Enables or disables backoff randomization.
    pub fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Controls whether `Retry-After` response hints are honored.
    pub fn with_respect_retry_after(mut self, respect: bool) -> Self {
        self.respect_retry_after = respect;
        self
    }

    pub(crate) fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }
}
