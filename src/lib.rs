//! `docmill-http` is an async HTTP client for the DocMill document assembly API.
//!
//! The crate wraps the `/v1` endpoints with ergonomic methods:
//! - [`DocMillClient::upload_asset`]
//! - [`DocMillClient::build`]
//! - [`DocMillClient::document`]
//! - [`DocMillClient::download`]
//! - [`DocMillClient::delete_document`]
//!
//! Every operation runs through a configurable retry engine
//! ([`RetryConfig`]) with exponential backoff, optional jitter and
//! `Retry-After` support.

mod builder;
mod client;
mod decode;
mod error;
mod options;
mod retry;
mod types;
mod wire;

pub use builder::{Align, DocumentBuilder, FieldKind, FormField, Image, Paragraph, Part, PathShape};
pub use client::{workspace_to_api_url, DocMillClient};
pub use error::DocMillError;
pub use options::ClientOptions;
pub use retry::{RetryConfig, DEFAULT_RETRYABLE_STATUS_CODES};
pub use types::{AssetInfo, DocumentInfo};

pub type Result<T> = std::result::Result<T, DocMillError>;
