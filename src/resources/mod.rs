//! Typed resource clients for the IDCloudHost API.
//!
//! Each resource client borrows a [`Client`](crate::Client), builds a
//! [`RequestConfig`](crate::RequestConfig) per operation, executes it with
//! [`Client::form_request`](crate::Client::form_request) and decodes the JSON
//! result. Status codes are interpreted here, not in the core client: a
//! non-2xx response becomes [`ResourceError::Response`].
//!
//! # Available resources
//!
//! - [`BlockStorageClient`]: disks and their attachment to virtual machines

mod blockstorage;

pub use blockstorage::{BlockStorageClient, CreateDiskConfig, Disk, ImageType};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, HttpResponseError};

/// Error type for resource operations.
///
/// # Example
///
/// ```rust,ignore
/// use idcloudhost_api::{ResourceError, RequestContext};
///
/// match client.block_storage().get_disk(&ctx, id).await {
///     Ok(disk) => println!("{} GB", disk.size_gb.unwrap_or_default()),
///     Err(ResourceError::Response(e)) if e.code == 404 => println!("no such disk"),
///     Err(e) => println!("failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request could not be executed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The response body is not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rejects non-2xx responses.
fn ensure_success(response: HttpResponse) -> Result<HttpResponse, ResourceError> {
    if response.is_ok() {
        return Ok(response);
    }
    tracing::debug!(status = response.code, "IDCloudHost API returned an error status");
    Err(ResourceError::Response(HttpResponseError {
        code: response.code,
        message: response.text(),
    }))
}

/// Checks the status and decodes the body as JSON.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ResourceError> {
    Ok(ensure_success(response)?.json()?)
}
