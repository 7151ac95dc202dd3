//! Configuration types for the IDCloudHost API SDK.
//!
//! # Overview
//!
//! - [`ClientConfig`]: API key, base URL and user agent settings for a [`Client`](crate::Client)
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiKey`]: The API key sent in the `apikey` header, masked in debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! The environment is read only by [`ClientConfig::from_env`]. A config that
//! has been built is a plain value and never consults the environment again.
//!
//! # Example
//!
//! ```rust
//! use idcloudhost_api::{ApiKey, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("my-api-key"))
//!     .base_url(BaseUrl::new("https://api.idcloudhost.com").unwrap())
//!     .build();
//!
//! assert_eq!(config.api_key().as_ref(), "my-api-key");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

/// Environment variable holding the default API key.
pub const API_KEY_ENV_VAR: &str = "IDCLOUDHOST_API_KEY";

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.idcloudhost.com";

/// Configuration for an IDCloudHost API client.
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Creates a configuration using the API key from [`API_KEY_ENV_VAR`].
    ///
    /// The variable is read once, at call time. An unset or non-unicode
    /// variable yields an empty key. The base URL is [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV_VAR).unwrap_or_default();
        Self::builder().api_key(ApiKey::new(api_key)).build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `api_key`: empty
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], filling in defaults for unset fields.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.unwrap_or_default(),
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
