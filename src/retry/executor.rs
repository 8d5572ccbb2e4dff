use std::future::Future;
use std::time::Duration;

use chrono::Utc;

use crate::error::DocMillError;

use super::backoff;
use super::classify::{self, AttemptFailure, RetryDecision};
use super::config::RetryConfig;

/// Suspension point between attempts.
///
/// Production code uses [`TokioSleep`]; tests inject a recording
/// implementation so delays are asserted without real waiting.
pub(crate) trait Sleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Sleep`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TokioSleep;

impl Sleep for TokioSleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Drives the attempt loop for one logical request.
///
/// An executor is created per operation call and dropped with it; the
/// configuration is never shared or mutated once the loop starts.
pub(crate) struct RequestExecutor<S = TokioSleep> {
    config: RetryConfig,
    sleeper: S,
}

impl RequestExecutor<TokioSleep> {
    pub(crate) fn new(config: RetryConfig) -> Self {
        Self::with_sleeper(config, TokioSleep)
    }
}

impl<S: Sleep> RequestExecutor<S> {
    pub(crate) fn with_sleeper(config: RetryConfig, sleeper: S) -> Self {
        Self { config, sleeper }
    }

    /// Runs `send` until it succeeds, a failure is classified fatal, or the
    /// retry budget is exhausted.
    ///
    /// Attempts are strictly sequential. The only state carried across them
    /// is the attempt counter and the `Retry-After` hint from the most
    /// recent HTTP failure; an HTTP failure without the header clears the
    /// hint, a network failure leaves it in place.
    pub(crate) async fn run<T, F, Fut>(&self, mut send: F) -> Result<T, DocMillError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptFailure>>,
    {
        let mut attempt: u32 = 0;
        let mut hint: Option<Duration> = None;

        loop {
            let failure = match send().await {
                Ok(response) => return Ok(response),
                Err(failure) => failure,
            };

            match classify::decide(&failure, attempt, &self.config) {
                RetryDecision::Fatal => return Err(failure.into_error()),
                RetryDecision::Exhausted => {
                    let attempts = attempt + 1;
                    #[cfg(feature = "tracing")]
                    tracing::debug!("giving up after {} attempts", attempts);
                    return Err(DocMillError::RetryExhausted {
                        attempts,
                        source: Box::new(failure.into_error()),
                    });
                }
                RetryDecision::Retry => {
                    if matches!(failure, AttemptFailure::Http { .. }) {
                        hint = failure
                            .retry_after_header()
                            .and_then(|value| backoff::parse_retry_hint(value, Utc::now()));
                    }
                    let delay = backoff::resolve_delay(attempt, &self.config, hint);
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        "attempt {} failed, retrying in {} ms",
                        attempt + 1,
                        delay.as_millis()
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use reqwest::header::{HeaderMap, RETRY_AFTER};
    use reqwest::StatusCode;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSleep {
        delays: Rc<RefCell<Vec<Duration>>>,
    }

    impl RecordingSleep {
        fn recorded(&self) -> Vec<Duration> {
            self.delays.borrow().clone()
        }
    }

    impl Sleep for RecordingSleep {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
            self.delays.borrow_mut().push(duration);
            std::future::ready(())
        }
    }

    fn fast_config() -> RetryConfig {
        RetryConfig::default()
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0)
            .with_max_delay(Duration::from_secs(60))
            .with_jitter(false)
    }

    fn http(status: u16) -> AttemptFailure {
        AttemptFailure::Http {
            status: StatusCode::from_u16(status).expect("valid status code"),
            headers: HeaderMap::new(),
            body: b"failure body".to_vec(),
        }
    }

    fn http_with_hint(status: u16, value: &str) -> AttemptFailure {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, value.parse().expect("valid header value"));
        AttemptFailure::Http {
            status: StatusCode::from_u16(status).expect("valid status code"),
            headers,
            body: Vec::new(),
        }
    }

    async fn network() -> AttemptFailure {
        let err = reqwest::Client::new()
            .get("not-a-url")
            .send()
            .await
            .expect_err("relative url must fail");
        AttemptFailure::Network(err)
    }

    async fn run_script(
        config: RetryConfig,
        script: Vec<Result<&'static str, AttemptFailure>>,
    ) -> (Result<&'static str, DocMillError>, Vec<Duration>, u32) {
        let sleeper = RecordingSleep::default();
        let executor = RequestExecutor::with_sleeper(config, sleeper.clone());
        let script = RefCell::new(VecDeque::from(script));
        let sends = Cell::new(0u32);
        let result = executor
            .run(|| {
                sends.set(sends.get() + 1);
                let next = script.borrow_mut().pop_front().expect("script exhausted");
                async move { next }
            })
            .await;
        (result, sleeper.recorded(), sends.get())
    }

    #[tokio::test]
    async fn success_on_first_attempt_sends_once() {
        let (result, delays, sends) = run_script(fast_config(), vec![Ok("done")]).await;
        assert_eq!(result.expect("should succeed"), "done");
        assert!(delays.is_empty());
        assert_eq!(sends, 1);
    }

    #[tokio::test]
    async fn rate_limited_attempt_is_retried_once() {
        let (result, delays, sends) =
            run_script(fast_config().with_max_retries(2), vec![Err(http(429)), Ok("done")]).await;
        assert_eq!(result.expect("should succeed"), "done");
        assert_eq!(delays, vec![Duration::from_millis(100)]);
        assert_eq!(sends, 2);
    }

    #[tokio::test]
    async fn waits_follow_exponential_backoff() {
        let script = vec![Err(http(503)), Err(http(503)), Err(http(503)), Ok("done")];
        let (result, delays, sends) =
            run_script(fast_config().with_max_retries(3), script).await;
        assert!(result.is_ok());
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
            ]
        );
        assert_eq!(sends, 4);
    }

    #[tokio::test]
    async fn exhausted_budget_wraps_last_failure() {
        let script = vec![
            Err(http(503)),
            Err(http(503)),
            Err(http(503)),
            Err(http(502)),
        ];
        let (result, delays, sends) =
            run_script(fast_config().with_max_retries(3), script).await;
        match result.expect_err("budget must run out") {
            DocMillError::RetryExhausted { attempts, source } => {
                assert_eq!(attempts, 4);
                // The final 502, not the 503 the run started with.
                assert!(matches!(*source, DocMillError::Http { status: 502, .. }));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(delays.len(), 3);
        assert_eq!(sends, 4);
    }

    #[tokio::test]
    async fn fatal_status_returns_immediately() {
        let (result, delays, sends) =
            run_script(fast_config().with_max_retries(5), vec![Err(http(404))]).await;
        match result.expect_err("client error must be fatal") {
            DocMillError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "failure body");
            }
            other => panic!("expected http error, got {other:?}"),
        }
        assert!(delays.is_empty());
        assert_eq!(sends, 1);
    }

    #[tokio::test]
    async fn zero_budget_performs_single_attempt_without_sleeping() {
        let (result, delays, sends) =
            run_script(fast_config().with_max_retries(0), vec![Err(http(500))]).await;
        match result.expect_err("no retries allowed") {
            DocMillError::RetryExhausted { attempts, .. } => assert_eq!(attempts, 1),
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert!(delays.is_empty());
        assert_eq!(sends, 1);
    }

    #[tokio::test]
    async fn network_failure_is_retried_then_succeeds() {
        let script = vec![Err(network().await), Ok("done")];
        let (result, delays, sends) =
            run_script(fast_config().with_max_retries(2), script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::from_millis(100)]);
        assert_eq!(sends, 2);
    }

    #[tokio::test]
    async fn network_failure_propagates_when_retries_disabled() {
        let config = fast_config()
            .with_max_retries(3)
            .with_retry_on_network_error(false);
        let (result, delays, sends) = run_script(config, vec![Err(network().await)]).await;
        assert!(matches!(
            result.expect_err("must not retry"),
            DocMillError::Transport(_)
        ));
        assert!(delays.is_empty());
        assert_eq!(sends, 1);
    }

    #[tokio::test]
    async fn retry_after_seconds_overrides_backoff() {
        let script = vec![Err(http_with_hint(429, "5")), Ok("done")];
        let (result, delays, _) =
            run_script(fast_config().with_max_retries(2), script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::from_secs(5)]);
    }

    #[tokio::test]
    async fn retry_after_is_clamped_to_max_delay() {
        let config = fast_config()
            .with_max_retries(2)
            .with_max_delay(Duration::from_secs(5));
        let script = vec![Err(http_with_hint(429, "60")), Ok("done")];
        let (result, delays, _) = run_script(config, script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::from_secs(5)]);
    }

    #[tokio::test]
    async fn retry_after_date_in_the_past_retries_immediately() {
        let script = vec![
            Err(http_with_hint(429, "Wed, 21 Oct 2015 07:28:00 GMT")),
            Ok("done"),
        ];
        let (result, delays, _) =
            run_script(fast_config().with_max_retries(2), script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::ZERO]);
    }

    #[tokio::test]
    async fn invalid_retry_after_falls_back_to_backoff() {
        let script = vec![Err(http_with_hint(429, "soon")), Ok("done")];
        let (result, delays, _) =
            run_script(fast_config().with_max_retries(2), script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::from_millis(100)]);
    }

    #[tokio::test]
    async fn retry_after_is_ignored_when_disabled() {
        let config = fast_config()
            .with_max_retries(2)
            .with_respect_retry_after(false);
        let script = vec![Err(http_with_hint(429, "60")), Ok("done")];
        let (result, delays, _) = run_script(config, script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::from_millis(100)]);
    }

    #[tokio::test]
    async fn last_http_hint_carries_over_network_failures() {
        let script = vec![
            Err(http_with_hint(429, "2")),
            Err(network().await),
            Ok("done"),
        ];
        let (result, delays, _) =
            run_script(fast_config().with_max_retries(3), script).await;
        assert!(result.is_ok());
        assert_eq!(delays, vec![Duration::from_secs(2), Duration::from_secs(2)]);
    }

    #[tokio::test]
    async fn hint_clears_when_next_http_failure_lacks_header() {
        let script = vec![Err(http_with_hint(429, "2")), Err(http(429)), Ok("done")];
        let (result, delays, _) =
            run_script(fast_config().with_max_retries(3), script).await;
        assert!(result.is_ok());
        // Second wait reverts to backoff for attempt 1.
        assert_eq!(
            delays,
            vec![Duration::from_secs(2), Duration::from_millis(200)]
        );
    }
}
