//! Newtype wrappers for configuration values.
//!
//! [`BaseUrl`] validates its contents on construction. [`ApiKey`] accepts any
//! value, including the empty string, since the provider rejects bad keys
//! itself and an unset environment variable yields an empty key.

use super::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use std::fmt;

/// An IDCloudHost API key.
///
/// The `Debug` implementation masks the value so the key never ends up in
/// logs, displaying `ApiKey(*****)` instead.
///
/// # Example
///
/// ```rust
/// use idcloudhost_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key");
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new API key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns `true` if no key has been provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// A validated API base URL.
///
/// The URL must use the `http` or `https` scheme and contain a host. The
/// value is stored exactly as given (after trimming whitespace); no trailing
/// slash normalization is applied.
///
/// # Example
///
/// ```rust
/// use idcloudhost_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.idcloudhost.com").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.idcloudhost.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is not `http` or
    /// `https`, or if the host is missing or contains characters that cannot
    /// appear in a host name.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        let host = &url[host_start..host_end];
        if host.is_empty() || !host.chars().all(is_host_char) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

// Letters (including internationalized ones), digits, `-`, `.` and `_`.
fn is_host_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '.' | '_')
}

impl Default for BaseUrl {
    fn default() -> Self {
        // DEFAULT_BASE_URL is "https://" followed by a bare host.
        let scheme_end = "https".len();
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            scheme_end,
            host_start: scheme_end + 3,
            host_end: DEFAULT_BASE_URL.len(),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
