//! HTTP client for IDCloudHost API communication.
//!
//! This module provides the [`Client`] type and its single execution
//! primitive, [`Client::form_request`].

use std::collections::HashMap;

use reqwest::header::CONTENT_TYPE;

use crate::clients::context::RequestContext;
use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{validate_method, RequestConfig, FORM_CONTENT_TYPE};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiKey, BaseUrl, ClientConfig};
use crate::resources::BlockStorageClient;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "apikey";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the IDCloudHost API.
///
/// The client holds the base URL, the API key and a `reqwest` transport.
/// It is typically created once and shared by reference with every resource
/// client. Apart from [`set_api_key`](Self::set_api_key) nothing mutates it
/// after construction.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`. Calling [`set_api_key`](Self::set_api_key)
/// requires `&mut self`, so it cannot race with in-flight requests.
///
/// # Example
///
/// ```rust,ignore
/// use idcloudhost_api::{Client, RequestConfig, RequestContext};
///
/// let client = Client::new();
/// let ctx = RequestContext::new();
///
/// let response = client
///     .form_request(Some(&ctx), RequestConfig::new("GET", "/v1/storage/disks"))
///     .await?;
/// println!("{}", response.text());
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    /// Base URL (e.g., `https://api.idcloudhost.com`).
    base_url: BaseUrl,
    /// Key sent in the `apikey` header, possibly empty.
    api_key: ApiKey,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client using the API key from `IDCLOUDHOST_API_KEY` and the
    /// default base URL.
    ///
    /// The environment variable is read once, now. An unset variable yields
    /// an empty key.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen if the TLS backend fails to initialize.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created, as
    /// [`Client::new`] does.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client from an explicit configuration and transport.
    ///
    /// Use this to supply a `reqwest::Client` with custom TLS, proxy or
    /// timeout settings.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}IDCloudHost API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            http,
            base_url: config.base_url().clone(),
            api_key: config.api_key().clone(),
            default_headers,
        }
    }

    /// Replaces the API key in place and returns the same client.
    ///
    /// This mutates `self`; clones made earlier keep their old key.
    pub fn set_api_key(&mut self, key: impl Into<ApiKey>) -> &mut Self {
        self.api_key = key.into();
        self
    }

    /// Consuming variant of [`set_api_key`](Self::set_api_key) for chaining
    /// after construction.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Returns the API key sent in the `apikey` header.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.as_ref()
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    /// Returns the headers sent with every request, besides `apikey`.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns a block storage client borrowing this client.
    #[must_use]
    pub const fn block_storage(&self) -> BlockStorageClient<'_> {
        BlockStorageClient::new(self)
    }

    /// Executes one API call.
    ///
    /// The form data in `cfg`, if any, is sent as an
    /// `application/x-www-form-urlencoded` body. The `apikey` header is always
    /// set, even when the key is empty. The full body is returned whatever the
    /// status code. The call is never retried.
    ///
    /// The request runs until it completes or `ctx` is cancelled or expires,
    /// whichever happens first.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - `ctx` is `None` (`InvalidRequest(MissingContext)`, no I/O)
    /// - `cfg.method` is not a valid method token (`InvalidRequest(InvalidMethod)`, no I/O)
    /// - the base URL and path do not parse as a URL (`InvalidRequest(InvalidUrl)`, no I/O)
    /// - the context is cancelled (`Cancelled`) or its deadline passes (`DeadlineExceeded`)
    /// - the transport fails or the body cannot be read (`Network`)
    pub async fn form_request(
        &self,
        ctx: Option<&RequestContext>,
        cfg: RequestConfig,
    ) -> Result<HttpResponse, HttpError> {
        let ctx = ctx.ok_or(InvalidHttpRequestError::MissingContext)?;

        let url = cfg.url(self.base_url.as_ref());

        validate_method(&cfg.method)?;
        let method = reqwest::Method::from_bytes(cfg.method.as_bytes()).map_err(|_| {
            InvalidHttpRequestError::InvalidMethod {
                method: cfg.method.clone(),
            }
        })?;
        let parsed_url = reqwest::Url::parse(&url)
            .map_err(|_| InvalidHttpRequestError::InvalidUrl { url: url.clone() })?;

        ctx.check()?;

        let mut req_builder = self.http.request(method, parsed_url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.header(API_KEY_HEADER, self.api_key.as_ref());
        if !cfg.data.is_empty() {
            req_builder = req_builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(cfg.data.encode());
        }

        tracing::debug!(method = %cfg.method, path = %cfg.path, "Sending IDCloudHost API request");

        let exchange = async {
            let res = req_builder.send().await?;
            let code = res.status().as_u16();
            let headers = HttpResponse::collect_headers(res.headers());
            let body = res.bytes().await?.to_vec();
            Ok::<_, reqwest::Error>(HttpResponse::new(code, headers, body))
        };

        tokio::select! {
            biased;
            err = ctx.done() => {
                tracing::warn!(method = %cfg.method, path = %cfg.path, error = %err, "IDCloudHost API request aborted");
                Err(err)
            }
            result = exchange => match result {
                Ok(response) => {
                    tracing::debug!(method = %cfg.method, path = %cfg.path, status = response.code, "Received IDCloudHost API response");
                    Ok(response)
                }
                Err(e) => {
                    tracing::warn!(method = %cfg.method, path = %cfg.path, error = %e, "IDCloudHost API request failed");
                    Err(HttpError::Network(e))
                }
            },
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
