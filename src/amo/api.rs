use async_trait::async_trait;

use crate::amo::{attachment::Attachment, error::AmoError};
use crate::types::amo::{
    Channel, CreateVersionRequest, License, UpdateVersionRequest, UploadHandle, VersionRecord,
};

/// The slice of the AMO add-ons API this tool speaks.
#[async_trait]
pub trait AddonsApi: Send + Sync {
    async fn upload_addon(
        &self,
        package: Attachment,
        channel: Channel,
    ) -> Result<UploadHandle, AmoError>;

    async fn get_upload(&self, uuid: &str) -> Result<UploadHandle, AmoError>;

    async fn upload_source(
        &self,
        addon: &str,
        version: &str,
        source: Attachment,
        license: Option<License>,
    ) -> Result<VersionRecord, AmoError>;

    async fn create_version(
        &self,
        addon: &str,
        request: &CreateVersionRequest,
    ) -> Result<VersionRecord, AmoError>;

    async fn edit_version(
        &self,
        addon: &str,
        request: &UpdateVersionRequest,
    ) -> Result<VersionRecord, AmoError>;

    async fn list_versions(&self, addon: &str) -> Result<Vec<VersionRecord>, AmoError>;

    async fn get_version(&self, addon: &str, version: &str) -> Result<VersionRecord, AmoError>;

    /// Like [`AddonsApi::get_version`], but a 404 means "no such version" instead of an error.
    async fn get_version_optional(
        &self,
        addon: &str,
        version: &str,
    ) -> Result<Option<VersionRecord>, AmoError>;
}
