//! # IDCloudHost API Rust SDK
//!
//! A Rust SDK for the IDCloudHost REST API, providing a thin form-encoded
//! request executor and typed resource clients.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Configuration via [`ClientConfig`], read from `IDCLOUDHOST_API_KEY` or built explicitly
//! - A single execution primitive, [`Client::form_request`], that sends one
//!   form-encoded request under a caller-supplied [`RequestContext`]
//! - Typed resource clients such as [`BlockStorageClient`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idcloudhost_api::{Client, RequestContext};
//! use std::time::Duration;
//!
//! // Reads IDCLOUDHOST_API_KEY once, now
//! let client = Client::new();
//! let ctx = RequestContext::with_timeout(Duration::from_secs(30));
//!
//! for disk in client.block_storage().list_disks(&ctx).await? {
//!     println!("{} {:?}", disk.uuid, disk.size_gb);
//! }
//! ```
//!
//! ## Explicit Configuration
//!
//! ```rust
//! use idcloudhost_api::{ApiKey, BaseUrl, Client, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("your-api-key"))
//!     .base_url(BaseUrl::new("https://api.idcloudhost.com").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build();
//!
//! let mut client = Client::from_config(config);
//! client.set_api_key("rotated-key");
//! assert_eq!(client.api_key(), "rotated-key");
//! ```
//!
//! ## Raw Requests
//!
//! ```rust,ignore
//! use idcloudhost_api::{HttpMethod, RequestConfig, RequestContext};
//!
//! let cfg = RequestConfig::builder(HttpMethod::Get, "/v1/storage/disks")
//!     .query_param("name", "data")
//!     .build();
//!
//! let response = client.form_request(Some(&ctx), cfg).await?;
//! println!("{} {}", response.code, response.text());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the environment is read only at construction
//! - **One round trip per call**: no retries, pagination or rate limiting
//! - **Caller-owned cancellation**: the [`RequestContext`] is the only timeout
//! - **Thread-safe**: [`Client`] is `Send + Sync` and shared by reference

pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

pub use config::{ApiKey, BaseUrl, ClientConfig, ClientConfigBuilder, API_KEY_ENV_VAR, DEFAULT_BASE_URL};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Client, HttpError, HttpMethod, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    Params, RequestConfig, RequestConfigBuilder, RequestContext,
};

// Re-export resource types
pub use resources::{BlockStorageClient, CreateDiskConfig, Disk, ImageType, ResourceError};
