//! HTTP-specific error types for the IDCloudHost API SDK.
//!
//! # Error Handling
//!
//! Failures are split by when they happen:
//!
//! - [`InvalidHttpRequestError`]: the request was rejected before any I/O
//!   (missing context, malformed method token, unparseable URL)
//! - [`HttpError`]: unified error returned by [`Client::form_request`](crate::Client::form_request),
//!   wrapping precondition failures, transport failures and cancellation
//! - [`HttpResponseError`]: a non-2xx response, raised by resource clients
//!   since the core does not interpret status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use idcloudhost_api::{HttpError, RequestConfig, RequestContext};
//!
//! let ctx = RequestContext::new();
//! match client.form_request(Some(&ctx), RequestConfig::new("GET", "/v1/storage/disks")).await {
//!     Ok(response) => println!("{} bytes", response.body.len()),
//!     Err(HttpError::InvalidRequest(e)) => println!("rejected before sending: {e}"),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//!     Err(HttpError::Cancelled | HttpError::DeadlineExceeded) => println!("gave up"),
//! }
//! ```

use thiserror::Error;

/// Error returned when a resource endpoint answers with a non-2xx status.
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, decoded lossily as UTF-8.
    pub message: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// No cancellation context was supplied.
    #[error("A request context is required for every API call.")]
    MissingContext,

    /// The HTTP method is not a valid RFC 7230 method token.
    #[error("Invalid Http method {method:?}.")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },

    /// The base URL and path do not form a valid request URL.
    #[error("Invalid request URL {url:?}.")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
    },
}

/// Unified error type for [`Client::form_request`](crate::Client::form_request).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed. No I/O was performed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, connection or body-read error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request context was cancelled.
    #[error("Request cancelled")]
    Cancelled,

    /// The request context's deadline passed.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl HttpError {
    /// Returns `true` if the request was rejected before any network I/O.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
