//! Retry engine: failure classification, backoff and the attempt loop.
//!
//! The decision of *whether* to retry (classification against the
//! configured status set and budget) is kept separate from *how long* to
//! wait (exponential backoff, jitter and `Retry-After` hints), so the
//! request loop stays a thin orchestration layer over both.

mod backoff;
mod classify;
mod config;
mod executor;

pub use config::{RetryConfig, DEFAULT_RETRYABLE_STATUS_CODES};

pub(crate) use classify::AttemptFailure;
pub(crate) use executor::RequestExecutor;
