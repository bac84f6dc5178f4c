use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribution records keyed by their opaque attribution id.
pub type Attributions = BTreeMap<String, PackageInfo>;

/// Attribution ids linked to each resource path. Folder paths end with `/`.
pub type ResourcesToAttributions = BTreeMap<String, Vec<String>>;

/// Attributions of one origin (manual or external) together with where they are linked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionData {
    #[serde(default)]
    pub attributions: Attributions,

    #[serde(default)]
    pub resources_to_attributions: ResourcesToAttributions,
}

/// Marker stored on attributions that need a follow-up review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowUp {
    #[serde(rename = "FOLLOW_UP")]
    FollowUp,
}

/// One attribution record as held by the application store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,

    /// Qualifiers and subpath of the PURL (`?key=value#sub/path`), stored verbatim.
    #[serde(
        default,
        rename = "packagePURLAppendix",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_purl_appendix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_confidence: Option<u8>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pre_selected: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_party: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_from_notice: Option<bool>,
}

impl PackageInfo {
    /// Package name, treating an empty string as absent.
    pub fn name(&self) -> Option<&str> {
        non_empty(self.package_name.as_deref())
    }

    pub fn namespace(&self) -> Option<&str> {
        non_empty(self.package_namespace.as_deref())
    }

    pub fn version(&self) -> Option<&str> {
        non_empty(self.package_version.as_deref())
    }

    pub fn package_type(&self) -> Option<&str> {
        non_empty(self.package_type.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A license that the notice document knows the standard text for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequentLicenseName {
    pub short_name: String,
    pub full_name: String,
}

impl FrequentLicenseName {
    pub fn new(short_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            full_name: full_name.into(),
        }
    }
}
