//! HTTP client types for IDCloudHost API communication.
//!
//! This module provides the request/execution core shared by every resource
//! client.
//!
//! # Overview
//!
//! - [`Client`]: holds base URL, API key and transport; exposes [`Client::form_request`]
//! - [`RequestConfig`]: one logical API call (method, path, query, form body)
//! - [`Params`]: ordered multi-map used for query strings and form bodies
//! - [`RequestContext`]: mandatory cancellation context for every call
//! - [`HttpResponse`]: status, headers and raw body of a completed call
//! - [`HttpError`]: precondition, transport and cancellation failures
//!
//! # Example
//!
//! ```rust,ignore
//! use idcloudhost_api::{Client, HttpMethod, RequestConfig, RequestContext};
//!
//! let client = Client::new();
//! let ctx = RequestContext::new();
//!
//! let cfg = RequestConfig::builder(HttpMethod::Post, "/v1/storage/disks")
//!     .form_param("size_gb", "20")
//!     .build();
//!
//! let response = client.form_request(Some(&ctx), cfg).await?;
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Each call is a single round trip; callers own retry policy.

mod context;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use context::RequestContext;
pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{Client, API_KEY_HEADER, SDK_VERSION};
pub use http_request::{
    validate_method, HttpMethod, Params, RequestConfig, RequestConfigBuilder, FORM_CONTENT_TYPE,
};
pub use http_response::HttpResponse;
