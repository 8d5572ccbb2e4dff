use std::time::Duration;

use chrono::{DateTime, Utc};

use super::config::RetryConfig;

/// Exponential backoff for the retry following `attempt` (zero-based).
///
/// The raw delay is `initial_delay * multiplier^attempt`, capped at
/// `max_delay`. With jitter enabled the capped value is scaled by a random
/// factor in `[0.5, 1.0]`, so the result stays within
/// `[capped / 2, capped]`.
pub(crate) fn compute_backoff(attempt: u32, config: &RetryConfig) -> Duration {
    let factor = config.backoff_multiplier.max(1.0).powf(f64::from(attempt));
    let raw = config.initial_delay.as_secs_f64() * factor;
    // Large attempt counts overflow f64 to infinity; the cap absorbs that.
    let capped = Duration::try_from_secs_f64(raw)
        .unwrap_or(config.max_delay)
        .min(config.max_delay);
    if config.use_jitter {
        capped.mul_f64(0.5 + 0.5 * rand::random::<f64>())
    } else {
        capped
    }
}

/// Parses a `Retry-After` header value into a wait duration.
///
/// Both forms from RFC 9110 are accepted: a non-negative integer number of
/// seconds, or an HTTP-date. A date in the past yields a zero wait.
/// Unparseable values yield `None` and the caller falls back to computed
/// backoff.
pub(crate) fn parse_retry_hint(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let date = DateTime::parse_from_rfc2822(value).ok()?;
    let remaining = date.with_timezone(&Utc).signed_duration_since(now);
    Some(remaining.to_std().unwrap_or(Duration::ZERO))
}

/// Selects the wait before the retry following `attempt`.
///
/// A server hint wins over computed backoff when `respect_retry_after` is
/// set, is never jittered, and is still clamped to `max_delay`.
pub(crate) fn resolve_delay(
    attempt: u32,
    config: &RetryConfig,
    hint: Option<Duration>,
) -> Duration {
    if config.respect_retry_after {
        if let Some(hint) = hint {
            return hint.min(config.max_delay);
        }
    }
    compute_backoff(attempt, config)
}
