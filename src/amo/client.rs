use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::amo::{
    api::AddonsApi,
    attachment::Attachment,
    error::AmoError,
    token::{Credentials, Hs256Signer, TokenSigner, mint_token},
};
use crate::types::amo::{
    Channel, CreateVersionRequest, License, UpdateVersionRequest, UploadHandle, VersionList,
    VersionRecord,
};
use crate::utils::logger::{LogLevel, Logger};

pub enum Payload {
    Empty,
    Json(Vec<u8>),
    Form(Form),
}

impl Payload {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, AmoError> {
        serde_json::to_vec(value)
            .map(Payload::Json)
            .map_err(AmoError::Encode)
    }
}

pub struct AmoClient {
    http: reqwest::Client,
    origin: String,
    credentials: Credentials,
    signer: Arc<dyn TokenSigner>,
}

impl AmoClient {
    pub fn new(credentials: Credentials, origin: impl Into<String>) -> Self {
        AmoClient {
            http: reqwest::Client::new(),
            origin: origin.into().trim_end_matches('/').to_string(),
            credentials,
            signer: Arc::new(Hs256Signer),
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn TokenSigner>) -> Self {
        self.signer = signer;
        self
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        payload: Payload,
    ) -> Result<(String, Response), AmoError> {
        let token = mint_token(self.signer.as_ref(), &self.credentials)?;
        let url = format!("{}{}", self.origin, path);

        Logger::new().log_message(LogLevel::Debug, &format!("{} {}", method, url));

        let builder = self
            .http
            .request(method.clone(), url.as_str())
            .header(AUTHORIZATION, format!("JWT {}", token));

        let builder = match payload {
            Payload::Empty => builder,
            Payload::Json(bytes) => builder.header(CONTENT_TYPE, "application/json").body(bytes),
            Payload::Form(form) => builder.multipart(form),
        };

        let response = builder.send().await?;
        Ok((url, response))
    }

    /// Sends one authenticated call and decodes the JSON answer.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<T, AmoError> {
        let (url, response) = self.send(&method, path, payload).await?;
        if response.status().as_u16() >= 400 {
            return Err(rejected(&method, url, response).await);
        }
        decode(url, response).await
    }

    /// Same as [`AmoClient::request`], except that a 404 comes back as `None`.
    pub async fn request_optional<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<Option<T>, AmoError> {
        let (url, response) = self.send(&method, path, payload).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if response.status().as_u16() >= 400 {
            return Err(rejected(&method, url, response).await);
        }
        decode(url, response).await.map(Some)
    }
}

async fn rejected(method: &Method, url: String, response: Response) -> AmoError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AmoError::Request {
        method: method.to_string(),
        url,
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    }
}

async fn decode<T: DeserializeOwned>(url: String, response: Response) -> Result<T, AmoError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| AmoError::Decode { url, source })
}

fn versions_path(addon: &str) -> String {
    format!("/api/v5/addons/addon/{}/versions/", addon)
}

fn version_path(addon: &str, version: &str) -> String {
    format!("/api/v5/addons/addon/{}/versions/{}/", addon, version)
}

#[async_trait]
impl AddonsApi for AmoClient {
    async fn upload_addon(
        &self,
        package: Attachment,
        channel: Channel,
    ) -> Result<UploadHandle, AmoError> {
        let form = Form::new()
            .part("upload", package.into_part())
            .text("channel", channel.as_str());

        self.request(Method::POST, "/api/v5/addons/upload/", Payload::Form(form))
            .await
    }

    async fn get_upload(&self, uuid: &str) -> Result<UploadHandle, AmoError> {
        let path = format!("/api/v5/addons/upload/{}", uuid);
        self.request(Method::GET, &path, Payload::Empty).await
    }

    async fn upload_source(
        &self,
        addon: &str,
        version: &str,
        source: Attachment,
        license: Option<License>,
    ) -> Result<VersionRecord, AmoError> {
        let mut form = Form::new().part("source", source.into_part());
        if let Some(license) = license {
            form = form.text("license", license.slug());
        }

        self.request(
            Method::PATCH,
            &version_path(addon, version),
            Payload::Form(form),
        )
        .await
    }

    async fn create_version(
        &self,
        addon: &str,
        request: &CreateVersionRequest,
    ) -> Result<VersionRecord, AmoError> {
        self.request(Method::POST, &versions_path(addon), Payload::json(request)?)
            .await
    }

    async fn edit_version(
        &self,
        addon: &str,
        request: &UpdateVersionRequest,
    ) -> Result<VersionRecord, AmoError> {
        self.request(Method::PATCH, &versions_path(addon), Payload::json(request)?)
            .await
    }

    async fn list_versions(&self, addon: &str) -> Result<Vec<VersionRecord>, AmoError> {
        let list: VersionList = self
            .request(Method::GET, &versions_path(addon), Payload::Empty)
            .await?;
        Ok(list.into_records())
    }

    async fn get_version(&self, addon: &str, version: &str) -> Result<VersionRecord, AmoError> {
        self.request(Method::GET, &version_path(addon, version), Payload::Empty)
            .await
    }

    async fn get_version_optional(
        &self,
        addon: &str,
        version: &str,
    ) -> Result<Option<VersionRecord>, AmoError> {
        self.request_optional(Method::GET, &version_path(addon, version), Payload::Empty)
            .await
    }
}
