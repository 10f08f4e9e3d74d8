//! Upload → wait for validation → create or reuse the version → attach sources.

pub mod clock;
pub mod poll;

use std::time::Duration;
use thiserror::Error;

use crate::action::PublishConfig;
use crate::amo::{AddonsApi, AmoError, Attachment};
use crate::types::amo::{Compatibility, CreateVersionRequest, Translated, VersionRange, VersionRecord};
use crate::utils::logger::{LogLevel, Logger};

use clock::Clock;
use poll::PollSettings;

pub const DEFAULT_LOCALE: &str = "en-US";
pub const FIREFOX_APP: &str = "firefox";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Amo(#[from] AmoError),

    #[error("timed-out waiting for addon to be processed (upload \"{uuid}\", waited {secs}s)", secs = .elapsed.as_secs())]
    Timeout { uuid: String, elapsed: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub version: String,
    pub version_id: u64,
    pub edit_url: String,
}

impl From<&VersionRecord> for PublishOutcome {
    fn from(record: &VersionRecord) -> Self {
        PublishOutcome {
            version: record.version.clone(),
            version_id: record.id,
            edit_url: record.edit_url.clone(),
        }
    }
}

pub struct Publisher<A, C> {
    api: A,
    clock: C,
    poll: PollSettings,
    logger: Logger,
}

impl<A: AddonsApi, C: Clock> Publisher<A, C> {
    pub fn new(api: A, clock: C) -> Self {
        Publisher {
            api,
            clock,
            poll: PollSettings::default(),
            logger: Logger::new(),
        }
    }

    pub async fn publish(&self, config: &PublishConfig) -> Result<PublishOutcome, PublishError> {
        let package = Attachment::open(&config.addon_path).await?;
        self.logger.log_message(
            LogLevel::Debug,
            &format!(
                "Uploading \"{}\" ({} bytes) to the {} channel",
                package.file_name(),
                package.size(),
                config.channel
            ),
        );

        let upload = self.api.upload_addon(package, config.channel).await?;
        self.logger.log_message(
            LogLevel::Info,
            &format!(
                "Addon \"{}\" has been uploaded with UUID \"{}\"",
                config.addon_path.display(),
                upload.uuid
            ),
        );

        let processed =
            poll::wait_until_processed(&self.api, &self.clock, &upload.uuid, self.poll).await?;

        // The version number is usually only known once validation has run.
        let uploaded_version = processed
            .version
            .filter(|v| !v.is_empty())
            .or(upload.version)
            .unwrap_or_default();

        let version = self
            .reconcile_version(config, &upload.uuid, &uploaded_version)
            .await?;

        if let Some(source_path) = &config.source_path {
            let source = Attachment::open(source_path).await?;
            let updated = self
                .api
                .upload_source(&config.addon_id, &version.version, source, config.license)
                .await?;
            self.logger.log_message(
                LogLevel::Info,
                &format!(
                    "Source \"{}\" has been uploaded to \"{}\"",
                    source_path.display(),
                    updated.source.unwrap_or_default()
                ),
            );
        }

        Ok(PublishOutcome::from(&version))
    }

    async fn reconcile_version(
        &self,
        config: &PublishConfig,
        upload_uuid: &str,
        uploaded_version: &str,
    ) -> Result<VersionRecord, PublishError> {
        // An empty version would address the versions collection, not a version.
        if !uploaded_version.is_empty() {
            if let Some(existing) = self
                .api
                .get_version_optional(&config.addon_id, uploaded_version)
                .await?
            {
                self.logger.log_message(
                    LogLevel::Info,
                    &format!("Version \"{}\" already exists", existing.version),
                );
                if let Some(notes) = existing
                    .release_notes
                    .as_ref()
                    .and_then(|n| n.get(DEFAULT_LOCALE))
                {
                    self.logger.log_message(
                        LogLevel::Debug,
                        &format!("Keeping its release notes: {}", notes),
                    );
                }
                return Ok(existing);
            }
        }

        let created = self
            .api
            .create_version(&config.addon_id, &create_request(config, upload_uuid))
            .await?;
        self.logger.log_message(
            LogLevel::Success,
            &format!("Version \"{}\" has been created", created.version),
        );
        Ok(created)
    }
}

pub fn create_request(config: &PublishConfig, upload_uuid: &str) -> CreateVersionRequest {
    CreateVersionRequest {
        approval_notes: config.approval_note.clone(),
        compatibility: Some(Compatibility::for_app(
            FIREFOX_APP,
            VersionRange {
                min: config.compatibility_firefox_min.clone(),
                max: config.compatibility_firefox_max.clone(),
            },
        )),
        license: config.license,
        release_notes: Some(Translated::single(
            DEFAULT_LOCALE,
            config.release_note.clone(),
        )),
        upload: Some(upload_uuid.to_string()),
        ..Default::default()
    }
}
