use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;

use crate::error::DocMillError;

use super::config::RetryConfig;

/// One failed attempt, as seen by the retry layer.
///
/// This is the whole failure surface of the send primitive: either the
/// server answered with a non-success status, or no usable response came
/// back at all.
#[derive(Debug)]
pub(crate) enum AttemptFailure {
    /// Response received with a non-success status.
    Http {
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
    },
    /// Connect, DNS, timeout or body-read failure; no response to inspect.
    Network(reqwest::Error),
}

impl AttemptFailure {
    /// Raw `Retry-After` value, when present on an HTTP failure.
    pub(crate) fn retry_after_header(&self) -> Option<&str> {
        match self {
            AttemptFailure::Http { headers, .. } => {
                headers.get(RETRY_AFTER).and_then(|value| value.to_str().ok())
            }
            AttemptFailure::Network(_) => None,
        }
    }

    /// Converts the failure into the error surfaced to callers, unchanged
    /// by the retry layer.
    pub(crate) fn into_error(self) -> DocMillError {
        match self {
            AttemptFailure::Http { status, body, .. } => DocMillError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            },
            AttemptFailure::Network(err) => DocMillError::Transport(err),
        }
    }
}

/// What the executor should do after a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RetryDecision {
    /// Another attempt is permitted.
    Retry,
    /// The failure is retryable but the budget is spent.
    Exhausted,
    /// The failure is not retryable; propagate it as-is.
    Fatal,
}

/// Classifies a failure after zero-based attempt `attempt`.
///
/// Retryability of the failure kind is checked before the budget, so a
/// non-retryable status is [`RetryDecision::Fatal`] even once the budget
/// is spent.
pub(crate) fn decide(
    failure: &AttemptFailure,
    attempt: u32,
    config: &RetryConfig,
) -> RetryDecision {
    let retryable = match failure {
        AttemptFailure::Http { status, .. } => config.is_retryable_status(status.as_u16()),
        AttemptFailure::Network(_) => config.retry_on_network_error,
    };
    if !retryable {
        return RetryDecision::Fatal;
    }
    if attempt >= config.max_retries {
        return RetryDecision::Exhausted;
    }
    RetryDecision::Retry
}
