use clap::Args;
use std::path::PathBuf;
use thiserror::Error;

use crate::amo::Credentials;
use crate::types::amo::{Channel, License};

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Input required and not supplied: {0}")]
    Missing(&'static str),

    #[error("Invalid channel \"{0}\". Must be \"listed\" or \"unlisted\"")]
    InvalidChannel(String),

    #[error("Invalid license \"{0}\". Must be one of: {list}", list = license_list())]
    InvalidLicense(String),
}

fn license_list() -> String {
    License::ALL
        .iter()
        .map(|l| format!("{} ({})", l.slug(), l.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw action inputs. The runner exposes `with:` values as `INPUT_<NAME>`;
/// every input can also be given as a flag for local runs.
#[derive(Debug, Clone, Default, Args)]
pub struct ActionInputs {
    /// Add-on ID, GUID or slug on addons.mozilla.org
    #[arg(long = "addon-id", env = "INPUT_ADDON-ID")]
    pub addon_id: Option<String>,

    /// Path to the packaged extension (.zip or .xpi)
    #[arg(long = "addon-path", env = "INPUT_ADDON-PATH")]
    pub addon_path: Option<String>,

    /// Path to a source code archive for reviewers
    #[arg(long = "source-path", env = "INPUT_SOURCE-PATH")]
    pub source_path: Option<String>,

    /// Notes for the reviewers
    #[arg(long = "approval-note", env = "INPUT_APPROVAL-NOTE")]
    pub approval_note: Option<String>,

    /// Minimum supported Firefox version
    #[arg(long = "compatibility-firefox-min", env = "INPUT_COMPATIBILITY-FIREFOX-MIN")]
    pub compatibility_firefox_min: Option<String>,

    /// Maximum supported Firefox version
    #[arg(long = "compatibility-firefox-max", env = "INPUT_COMPATIBILITY-FIREFOX-MAX")]
    pub compatibility_firefox_max: Option<String>,

    /// License slug, e.g. MPL-2.0 or MIT
    #[arg(long = "license", env = "INPUT_LICENSE")]
    pub license: Option<String>,

    /// Release notes (en-US)
    #[arg(long = "release-note", env = "INPUT_RELEASE-NOTE")]
    pub release_note: Option<String>,

    /// Distribution channel: listed or unlisted
    #[arg(long = "channel", env = "INPUT_CHANNEL")]
    pub channel: Option<String>,

    /// JWT issuer from the AMO API credentials page
    #[arg(long = "auth-api-issuer", env = "INPUT_AUTH-API-ISSUER")]
    pub auth_api_issuer: Option<String>,

    /// JWT secret from the AMO API credentials page
    #[arg(long = "auth-api-secret", env = "INPUT_AUTH-API-SECRET", hide_env_values = true)]
    pub auth_api_secret: Option<String>,
}

/// Validated configuration for one publish run.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub addon_id: String,
    pub addon_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub approval_note: Option<String>,
    pub compatibility_firefox_min: Option<String>,
    pub compatibility_firefox_max: Option<String>,
    pub license: Option<License>,
    pub release_note: String,
    pub channel: Channel,
    pub credentials: Credentials,
}

// Runner inputs are trimmed and an empty value means "not set".
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &'static str) -> Result<String, InputError> {
    non_empty(value).ok_or(InputError::Missing(name))
}

impl TryFrom<ActionInputs> for PublishConfig {
    type Error = InputError;

    fn try_from(inputs: ActionInputs) -> Result<Self, Self::Error> {
        let channel_raw = non_empty(inputs.channel).unwrap_or_default();
        let channel: Channel = channel_raw
            .parse()
            .map_err(|_| InputError::InvalidChannel(channel_raw.clone()))?;

        let license = match non_empty(inputs.license) {
            Some(raw) => Some(
                raw.parse::<License>()
                    .map_err(|_| InputError::InvalidLicense(raw.clone()))?,
            ),
            None => None,
        };

        Ok(PublishConfig {
            addon_id: required(inputs.addon_id, "addon-id")?,
            addon_path: PathBuf::from(required(inputs.addon_path, "addon-path")?),
            source_path: non_empty(inputs.source_path).map(PathBuf::from),
            approval_note: non_empty(inputs.approval_note),
            compatibility_firefox_min: non_empty(inputs.compatibility_firefox_min),
            compatibility_firefox_max: non_empty(inputs.compatibility_firefox_max),
            license,
            release_note: non_empty(inputs.release_note).unwrap_or_default(),
            channel,
            credentials: Credentials::new(
                required(inputs.auth_api_issuer, "auth-api-issuer")?,
                required(inputs.auth_api_secret, "auth-api-secret")?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inputs() -> ActionInputs {
        ActionInputs {
            addon_id: Some("my-addon@example.com".to_string()),
            addon_path: Some("dist/addon.zip".to_string()),
            release_note: Some("First release".to_string()),
            channel: Some("listed".to_string()),
            auth_api_issuer: Some("user:1:2".to_string()),
            auth_api_secret: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_inputs() {
        let config = PublishConfig::try_from(valid_inputs()).unwrap();
        assert_eq!(config.channel, Channel::Listed);
        assert_eq!(config.license, None);
        assert_eq!(config.source_path, None);
        assert_eq!(config.addon_path, PathBuf::from("dist/addon.zip"));
    }

    #[test]
    fn rejects_unknown_channels() {
        for raw in ["public", "LISTED", "Unlisted", "listed-beta"] {
            let inputs = ActionInputs {
                channel: Some(raw.to_string()),
                ..valid_inputs()
            };
            assert_eq!(
                PublishConfig::try_from(inputs).unwrap_err(),
                InputError::InvalidChannel(raw.to_string())
            );
        }
    }

    #[test]
    fn missing_channel_is_invalid() {
        let inputs = ActionInputs {
            channel: Some("  ".to_string()),
            ..valid_inputs()
        };
        let err = PublishConfig::try_from(inputs).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Invalid channel "". Must be "listed" or "unlisted""#
        );
    }

    #[test]
    fn rejects_unknown_licenses() {
        for raw in ["Apache-2.0", "mit", "GPL-3.0"] {
            let inputs = ActionInputs {
                license: Some(raw.to_string()),
                ..valid_inputs()
            };
            let err = PublishConfig::try_from(inputs).unwrap_err();
            assert_eq!(err, InputError::InvalidLicense(raw.to_string()));
            assert!(err.to_string().contains(
                "all-rights-reserved (All Rights Reserved), MPL-2.0 (Mozilla Public License 2.0)"
            ));
            assert!(err.to_string().ends_with("BSD-2-Clause (The 2-Clause BSD License)"));
        }
    }

    #[test]
    fn channel_is_checked_before_license() {
        let inputs = ActionInputs {
            channel: Some("nope".to_string()),
            license: Some("nope".to_string()),
            ..valid_inputs()
        };
        assert!(matches!(
            PublishConfig::try_from(inputs),
            Err(InputError::InvalidChannel(_))
        ));
    }

    #[test]
    fn trims_values_and_treats_empty_as_absent() {
        let inputs = ActionInputs {
            license: Some(" MPL-2.0 ".to_string()),
            source_path: Some("".to_string()),
            approval_note: Some("".to_string()),
            compatibility_firefox_min: Some("115.0".to_string()),
            ..valid_inputs()
        };
        let config = PublishConfig::try_from(inputs).unwrap();
        assert_eq!(config.license, Some(License::Mpl20));
        assert_eq!(config.source_path, None);
        assert_eq!(config.approval_note, None);
        assert_eq!(config.compatibility_firefox_min.as_deref(), Some("115.0"));
    }

    #[test]
    fn credentials_are_required() {
        let inputs = ActionInputs {
            auth_api_secret: None,
            ..valid_inputs()
        };
        assert_eq!(
            PublishConfig::try_from(inputs).unwrap_err(),
            InputError::Missing("auth-api-secret")
        );
    }
}
