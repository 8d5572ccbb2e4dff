/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum DocMillError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Retry budget spent without a successful attempt.
    #[error("retries exhausted after {attempts} attempts: {source}")]
    RetryExhausted {
        /// Total attempts performed, including the first.
        attempts: u32,
        /// Failure observed on the final attempt.
        source: Box<DocMillError>,
    },
    /// Request rejected client-side before anything was sent.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Response decoding or protocol-shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
}
