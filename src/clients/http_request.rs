//! Request description types for the IDCloudHost API SDK.
//!
//! This module provides [`RequestConfig`], the value object describing one
//! logical API call, together with [`Params`] (the ordered multi-map used for
//! query strings and form bodies) and [`HttpMethod`].

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Well-known HTTP methods used by the IDCloudHost API.
///
/// [`RequestConfig::method`] is a plain string so that any RFC 7230 method
/// token can be sent; this enum converts into it for the common cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method token as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Content type of form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Checks `method` against the RFC 7230 `token` grammar (`1*tchar`).
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::InvalidMethod`] if `method` is empty or
/// contains a character outside `tchar`.
pub fn validate_method(method: &str) -> Result<(), InvalidHttpRequestError> {
    let is_tchar = |b: u8| {
        b.is_ascii_alphanumeric()
            || matches!(
                b,
                b'!' | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
    };

    if method.is_empty() || !method.bytes().all(is_tchar) {
        return Err(InvalidHttpRequestError::InvalidMethod {
            method: method.to_string(),
        });
    }
    Ok(())
}

/// Ordered multi-map of string keys to string values.
///
/// Used for both query parameters and form bodies. A key may appear more than
/// once; [`encode`](Self::encode) emits pairs in insertion order.
///
/// # Example
///
/// ```rust
/// use idcloudhost_api::Params;
///
/// let mut params = Params::new();
/// params.add("name", "my disk");
/// params.add("size_gb", 20.to_string());
/// assert_eq!(params.encode(), "name=my%20disk&size_gb=20");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a value for `key`, keeping any existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Replaces all values for `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.0.retain(|(k, _)| *k != key);
        self.0.push((key, value.into()));
        self
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `key`, in insertion order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the pairs as `k=v` joined by `&`, percent-escaping keys and values.
    #[must_use]
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Description of one API call before it is executed.
///
/// Constructed fresh per call and consumed by
/// [`Client::form_request`](crate::Client::form_request). The method is not
/// validated until the request is executed.
///
/// # Example
///
/// ```rust
/// use idcloudhost_api::{HttpMethod, RequestConfig};
///
/// let cfg = RequestConfig::builder(HttpMethod::Get, "/v1/storage/disks")
///     .query_param("name", "test")
///     .build();
///
/// assert_eq!(
///     cfg.url("https://api.idcloudhost.com"),
///     "https://api.idcloudhost.com/v1/storage/disks?name=test"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// The HTTP method token.
    pub method: String,
    /// The path relative to the base URL. Leading slashes are ignored.
    pub path: String,
    /// Query parameters to append to the URL.
    pub query: Params,
    /// Form fields sent as an `application/x-www-form-urlencoded` body.
    pub data: Params,
}

impl RequestConfig {
    /// Creates a request with no query parameters and no body.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: Params::new(),
            data: Params::new(),
        }
    }

    /// Creates a new builder for constructing a `RequestConfig`.
    #[must_use]
    pub fn builder(method: impl Into<String>, path: impl Into<String>) -> RequestConfigBuilder {
        RequestConfigBuilder {
            config: Self::new(method, path),
        }
    }

    /// Builds the absolute URL for this request against `base_url`.
    ///
    /// All leading `/` characters are stripped from the path and exactly one
    /// `/` is placed between the base URL and the path. The encoded query is
    /// appended when present.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let path = self.path.trim_start_matches('/');
        let mut url = format!("{base_url}/{path}");
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query.encode());
        }
        url
    }
}

/// Builder for constructing [`RequestConfig`] instances.
#[derive(Debug)]
pub struct RequestConfigBuilder {
    config: RequestConfig,
}

impl RequestConfigBuilder {
    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Params) -> Self {
        self.config.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.query.add(key, value);
        self
    }

    /// Sets all form fields at once.
    #[must_use]
    pub fn data(mut self, data: Params) -> Self {
        self.config.data = data;
        self
    }

    /// Adds a single form field.
    #[must_use]
    pub fn form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.data.add(key, value);
        self
    }

    /// Returns the finished [`RequestConfig`].
    #[must_use]
    pub fn build(self) -> RequestConfig {
        self.config
    }
}
