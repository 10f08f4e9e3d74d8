use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Listed,
    Unlisted,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Listed => "listed",
            Channel::Unlisted => "unlisted",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listed" => Ok(Channel::Listed),
            "unlisted" => Ok(Channel::Unlisted),
            _ => Err(()),
        }
    }
}

/// Licenses AMO accepts by slug. Anything else goes through `custom_license`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum License {
    #[serde(rename = "all-rights-reserved")]
    AllRightsReserved,
    #[serde(rename = "MPL-2.0")]
    Mpl20,
    #[serde(rename = "GPL-2.0-or-later")]
    Gpl20OrLater,
    #[serde(rename = "GPL-3.0-or-later")]
    Gpl30OrLater,
    #[serde(rename = "LGPL-2.1-or-later")]
    Lgpl21OrLater,
    #[serde(rename = "LGPL-3.0-or-later")]
    Lgpl30OrLater,
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "BSD-2-Clause")]
    Bsd2Clause,
}

impl License {
    pub const ALL: [License; 8] = [
        License::AllRightsReserved,
        License::Mpl20,
        License::Gpl20OrLater,
        License::Gpl30OrLater,
        License::Lgpl21OrLater,
        License::Lgpl30OrLater,
        License::Mit,
        License::Bsd2Clause,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            License::AllRightsReserved => "all-rights-reserved",
            License::Mpl20 => "MPL-2.0",
            License::Gpl20OrLater => "GPL-2.0-or-later",
            License::Gpl30OrLater => "GPL-3.0-or-later",
            License::Lgpl21OrLater => "LGPL-2.1-or-later",
            License::Lgpl30OrLater => "LGPL-3.0-or-later",
            License::Mit => "MIT",
            License::Bsd2Clause => "BSD-2-Clause",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            License::AllRightsReserved => "All Rights Reserved",
            License::Mpl20 => "Mozilla Public License 2.0",
            License::Gpl20OrLater => "GNU General Public License v2.0 (or later)",
            License::Gpl30OrLater => "GNU General Public License v3.0 (or later)",
            License::Lgpl21OrLater => "GNU Lesser General Public License v2.1 (or later)",
            License::Lgpl30OrLater => "GNU Lesser General Public License v3.0 (or later)",
            License::Mit => "The MIT License",
            License::Bsd2Clause => "The 2-Clause BSD License",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for License {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        License::ALL
            .iter()
            .copied()
            .find(|license| license.slug() == s)
            .ok_or(())
    }
}

/// Locale code to text. `_default` names the fallback locale's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translated(pub BTreeMap<String, String>);

impl Translated {
    pub const DEFAULT_KEY: &'static str = "_default";

    pub fn single(locale: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(locale.into(), text.into());
        Translated(map)
    }

    /// Text for `locale`, falling back to the `_default` entry.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .or_else(|| self.0.get(Self::DEFAULT_KEY))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Compatibility {
    Ranges(BTreeMap<String, VersionRange>),
    Apps(Vec<String>),
}

impl Compatibility {
    pub fn for_app(app: impl Into<String>, range: VersionRange) -> Self {
        let mut map = BTreeMap::new();
        map.insert(app.into(), range);
        Compatibility::Ranges(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLicense {
    pub name: Translated,
    pub text: Translated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateVersionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_license: Option<CustomLicense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<Translated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateVersionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_license: Option<CustomLicense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<Translated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Server-side view of an uploaded package while it goes through validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadHandle {
    pub uuid: String,
    pub channel: Channel,
    pub processed: bool,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub validation: serde_json::Value,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VersionFile {
    pub id: u64,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub is_mozilla_signed_extension: bool,
    #[serde(default)]
    pub optional_permissions: Vec<String>,
    #[serde(default)]
    pub host_permissions: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VersionLicense {
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub name: Option<Translated>,
    #[serde(default)]
    pub text: Option<Translated>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VersionRecord {
    pub id: u64,
    #[serde(default)]
    pub approval_notes: Option<String>,
    pub channel: Channel,
    #[serde(default)]
    pub compatibility: Option<Compatibility>,
    #[serde(default)]
    pub edit_url: String,
    #[serde(default)]
    pub file: Option<VersionFile>,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub license: Option<VersionLicense>,
    #[serde(default)]
    pub release_notes: Option<Translated>,
    #[serde(default)]
    pub reviewed: Option<String>,
    #[serde(default)]
    pub is_strict_compatibility_enabled: bool,
    #[serde(default)]
    pub source: Option<String>,
    pub version: String,
}

/// `list_versions` accepts either shape; AMO paginates, older fixtures do not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum VersionList {
    Page { results: Vec<VersionRecord> },
    Plain(Vec<VersionRecord>),
}

impl VersionList {
    pub fn into_records(self) -> Vec<VersionRecord> {
        match self {
            VersionList::Page { results } => results,
            VersionList::Plain(records) => records,
        }
    }
}
