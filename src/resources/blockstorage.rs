//! Block storage resource.
//!
//! [`BlockStorageClient`] manages disks and their attachment to virtual
//! machines.
//!
//! # Example
//!
//! ```rust,ignore
//! use idcloudhost_api::{Client, CreateDiskConfig, ImageType, RequestContext};
//!
//! let client = Client::new();
//! let ctx = RequestContext::new();
//! let storage = client.block_storage();
//!
//! let disk = storage
//!     .create_disk(&ctx, &CreateDiskConfig {
//!         size_gb: 20,
//!         billing_account_id: 123,
//!         source_image_type: ImageType::OsBase,
//!         source_image: "ubuntu_20.04".to_string(),
//!     })
//!     .await?;
//!
//! storage.attach_disk_to_vm(&ctx, disk.uuid, vm_uuid).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{decode, ensure_success, ResourceError};
use crate::clients::{Client, HttpMethod, Params, RequestConfig, RequestContext};

const DISKS_PATH: &str = "/v1/storage/disks";
const ATTACH_PATH: &str = "/v1/user-resource/vm/storage/attach";
const DETACH_PATH: &str = "/v1/user-resource/vm/storage/detach";

/// Source a new disk is created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageType {
    /// A provider operating system base image.
    OsBase,
    /// A custom image.
    Image,
    /// A snapshot of another disk.
    Snapshot,
    /// An existing disk.
    Disk,
    /// An empty disk.
    Empty,
}

impl ImageType {
    /// Returns the value sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OsBase => "OS_BASE",
            Self::Image => "IMAGE",
            Self::Snapshot => "SNAPSHOT",
            Self::Disk => "DISK",
            Self::Empty => "EMPTY",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block storage disk.
///
/// Only `uuid` is guaranteed; the remaining known fields are optional and
/// anything else the API returns is kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    /// Numeric identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Canonical identifier used in paths.
    pub uuid: Uuid,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Size in gigabytes.
    #[serde(default, alias = "size", skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<u64>,

    /// Billing account the disk is charged to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_account_id: Option<u64>,

    /// Owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// Creation timestamp, as returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp, as returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Parameters for [`BlockStorageClient::create_disk`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateDiskConfig {
    /// Size in gigabytes.
    pub size_gb: u32,
    /// Billing account to charge.
    pub billing_account_id: u64,
    /// Kind of source the disk is created from.
    pub source_image_type: ImageType,
    /// Name or identifier of the source.
    pub source_image: String,
}

impl CreateDiskConfig {
    fn to_params(&self) -> Params {
        let mut data = Params::new();
        data.add("size_gb", self.size_gb.to_string())
            .add("billing_account_id", self.billing_account_id.to_string())
            .add("source_image_type", self.source_image_type.as_str())
            .add("source_image", self.source_image.as_str());
        data
    }
}

/// Client for block storage operations.
///
/// Borrows the shared [`Client`]; create one per use with
/// [`Client::block_storage`] or [`BlockStorageClient::new`].
#[derive(Clone, Copy, Debug)]
pub struct BlockStorageClient<'a> {
    client: &'a Client,
}

impl<'a> BlockStorageClient<'a> {
    /// Creates a block storage client on top of `client`.
    #[must_use]
    pub const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all disks.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the status is not 2xx,
    /// or the body is not a JSON array of disks.
    pub async fn list_disks(&self, ctx: &RequestContext) -> Result<Vec<Disk>, ResourceError> {
        let cfg = RequestConfig::new(HttpMethod::Get, DISKS_PATH);
        decode(self.client.form_request(Some(ctx), cfg).await?)
    }

    /// Creates a disk.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the status is not 2xx,
    /// or the body is not a disk.
    pub async fn create_disk(
        &self,
        ctx: &RequestContext,
        config: &CreateDiskConfig,
    ) -> Result<Disk, ResourceError> {
        let cfg = RequestConfig::builder(HttpMethod::Post, DISKS_PATH)
            .data(config.to_params())
            .build();
        decode(self.client.form_request(Some(ctx), cfg).await?)
    }

    /// Fetches a single disk.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the status is not 2xx,
    /// or the body is not a disk.
    pub async fn get_disk(&self, ctx: &RequestContext, id: Uuid) -> Result<Disk, ResourceError> {
        let cfg = RequestConfig::new(HttpMethod::Get, disk_path(id));
        decode(self.client.form_request(Some(ctx), cfg).await?)
    }

    /// Deletes a disk. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the status is not 2xx.
    pub async fn delete_disk(&self, ctx: &RequestContext, id: Uuid) -> Result<(), ResourceError> {
        let cfg = RequestConfig::new(HttpMethod::Delete, disk_path(id));
        ensure_success(self.client.form_request(Some(ctx), cfg).await?)?;
        Ok(())
    }

    /// Moves a disk to another billing account.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the status is not 2xx,
    /// or the body is not a disk.
    pub async fn update_disk_billing_account(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        billing_account_id: u64,
    ) -> Result<Disk, ResourceError> {
        let cfg = RequestConfig::builder(HttpMethod::Patch, disk_path(id))
            .form_param("billing_account_id", billing_account_id.to_string())
            .build();
        decode(self.client.form_request(Some(ctx), cfg).await?)
    }

    /// Attaches a disk to a virtual machine and returns the API's description
    /// of the machine.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the status is not 2xx,
    /// or the body is not JSON.
    pub async fn attach_disk_to_vm(
        &self,
        ctx: &RequestContext,
        disk_id: Uuid,
        vm_id: Uuid,
    ) -> Result<serde_json::Value, ResourceError> {
        let cfg = vm_storage_request(ATTACH_PATH, disk_id, vm_id);
        decode(self.client.form_request(Some(ctx), cfg).await?)
    }

    /// Detaches a disk from a virtual machine and returns the API's
    /// description of the machine.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the status is not 2xx,
    /// or the body is not JSON.
    pub async fn detach_disk_from_vm(
        &self,
        ctx: &RequestContext,
        disk_id: Uuid,
        vm_id: Uuid,
    ) -> Result<serde_json::Value, ResourceError> {
        let cfg = vm_storage_request(DETACH_PATH, disk_id, vm_id);
        decode(self.client.form_request(Some(ctx), cfg).await?)
    }
}

fn disk_path(id: Uuid) -> String {
    format!("{DISKS_PATH}/{id}")
}

fn vm_storage_request(path: &str, disk_id: Uuid, vm_id: Uuid) -> RequestConfig {
    RequestConfig::builder(HttpMethod::Post, path)
        .form_param("uuid", vm_id.to_string())
        .form_param("storage_uuid", disk_id.to_string())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, BaseUrl, ClientConfig};
    use std::collections::HashMap;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_client(server: &MockServer) -> Client {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("secret"))
            .base_url(BaseUrl::new(server.uri()).unwrap())
            .build();
        Client::from_config(config)
    }

    fn disk_json(id: Uuid) -> serde_json::Value {
        serde_json::json!({
            "id": 42,
            "uuid": id.to_string(),
            "name": "data",
            "size": 20,
            "billing_account_id": 123,
            "created_at": "2024-01-01 00:00:00",
            "shared": false
        })
    }

    async fn received_form(server: &MockServer) -> HashMap<String, String> {
        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        body.split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (
                    urlencoding::decode(k).unwrap().into_owned(),
                    urlencoding::decode(v).unwrap().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn test_image_type_wire_values() {
        assert_eq!(ImageType::OsBase.to_string(), "OS_BASE");
        assert_eq!(
            serde_json::to_value(ImageType::Snapshot).unwrap(),
            serde_json::json!("SNAPSHOT")
        );
        let parsed: ImageType = serde_json::from_str(r#""EMPTY""#).unwrap();
        assert_eq!(parsed, ImageType::Empty);
    }

    #[test]
    fn test_disk_keeps_unknown_fields() {
        let id = Uuid::new_v4();
        let disk: Disk = serde_json::from_value(disk_json(id)).unwrap();
        assert_eq!(disk.uuid, id);
        assert_eq!(disk.id, Some(42));
        assert_eq!(disk.size_gb, Some(20));
        assert_eq!(disk.extra.get("shared"), Some(&serde_json::json!(false)));
        assert!(disk.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_list_disks() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/v1/storage/disks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([disk_json(id)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let disks = client
            .block_storage()
            .list_disks(&RequestContext::new())
            .await
            .unwrap();
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].uuid, id);
    }

    #[tokio::test]
    async fn test_create_disk_sends_form_fields() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/v1/storage/disks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(disk_json(id)))
            .expect(1)
            .mount(&server)
            .await;

        let config = CreateDiskConfig {
            size_gb: 10,
            billing_account_id: 123,
            source_image_type: ImageType::OsBase,
            source_image: "ubuntu_20.04".to_string(),
        };
        let client = mock_client(&server);
        let disk = client
            .block_storage()
            .create_disk(&RequestContext::new(), &config)
            .await
            .unwrap();
        assert_eq!(disk.uuid, id);

        let form = received_form(&server).await;
        assert_eq!(form["size_gb"], "10");
        assert_eq!(form["billing_account_id"], "123");
        assert_eq!(form["source_image_type"], "OS_BASE");
        assert_eq!(form["source_image"], "ubuntu_20.04");
    }

    #[tokio::test]
    async fn test_get_disk() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/v1/storage/disks/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(disk_json(id)))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let disk = client
            .block_storage()
            .get_disk(&RequestContext::new(), id)
            .await
            .unwrap();
        assert_eq!(disk.name.as_deref(), Some("data"));
    }

    #[tokio::test]
    async fn test_get_disk_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"not found"}"#))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let err = client
            .block_storage()
            .get_disk(&RequestContext::new(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::Response(ref e) if e.code == 404));
    }

    #[tokio::test]
    async fn test_delete_disk() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("DELETE"))
            .and(path(format!("/v1/storage/disks/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        client
            .block_storage()
            .delete_disk(&RequestContext::new(), id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_disk_billing_account() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("PATCH"))
            .and(path(format!("/v1/storage/disks/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(disk_json(id)))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        client
            .block_storage()
            .update_disk_billing_account(&RequestContext::new(), id, 123)
            .await
            .unwrap();

        let form = received_form(&server).await;
        assert_eq!(form["billing_account_id"], "123");
    }

    #[tokio::test]
    async fn test_attach_disk_to_vm() {
        let server = MockServer::start().await;
        let disk_id = Uuid::new_v4();
        let vm_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/v1/user-resource/vm/storage/attach"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"uuid": vm_id})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let vm = client
            .block_storage()
            .attach_disk_to_vm(&RequestContext::new(), disk_id, vm_id)
            .await
            .unwrap();
        assert_eq!(vm["uuid"], vm_id.to_string());

        let form = received_form(&server).await;
        assert_eq!(form["uuid"], vm_id.to_string());
        assert_eq!(form["storage_uuid"], disk_id.to_string());
    }

    #[tokio::test]
    async fn test_detach_disk_from_vm() {
        let server = MockServer::start().await;
        let disk_id = Uuid::new_v4();
        let vm_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/v1/user-resource/vm/storage/detach"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"uuid": vm_id})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        client
            .block_storage()
            .detach_disk_from_vm(&RequestContext::new(), disk_id, vm_id)
            .await
            .unwrap();

        let form = received_form(&server).await;
        assert_eq!(form["uuid"], vm_id.to_string());
        assert_eq!(form["storage_uuid"], disk_id.to_string());
    }
}
