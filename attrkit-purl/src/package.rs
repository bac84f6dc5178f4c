//! PURL text field of an attribution record.
//!
//! The record stores type, namespace, name and version as separate fields plus the qualifier and
//! subpath suffix verbatim. These helpers keep the displayed PURL text and the record in step.

use crate::codec::{self, PackageDescriptor};
use attrkit_types::PackageInfo;
use serde::Serialize;
use tracing::debug;

/// Validity of what is currently typed into the PURL field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurlFieldState {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<PackageDescriptor>,
}

/// Outcome of typing into the PURL field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurlEdit {
    /// Text to keep displaying, valid or not.
    pub text: String,
    pub valid: bool,

    /// Record with package fields replaced, present only when the text parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_info: Option<PackageInfo>,
}

/// PURL displayed for a record.
///
/// Empty unless the record has both a package type and a package name. The stored appendix is
/// appended as-is.
pub fn purl_for_package_info(info: &PackageInfo) -> String {
    let (Some(package_type), Some(name)) = (info.package_type(), info.name()) else {
        return String::new();
    };

    let descriptor = PackageDescriptor {
        namespace: info.namespace().map(str::to_string),
        name: Some(name.to_string()),
        version: info.version().map(str::to_string),
        ..PackageDescriptor::new(package_type)
    };

    let mut purl = codec::generate(&descriptor);
    if let Some(appendix) = info.package_purl_appendix.as_deref() {
        purl.push_str(appendix);
    }
    purl
}

/// An empty field is valid (no PURL entered); anything else must parse.
pub fn evaluate_purl_field(text: &str) -> PurlFieldState {
    if text.is_empty() {
        return PurlFieldState {
            valid: true,
            descriptor: None,
        };
    }

    match codec::parse(text) {
        Ok(descriptor) => PurlFieldState {
            valid: true,
            descriptor: Some(descriptor),
        },
        Err(e) => {
            debug!(input = %text, error = %e, "purl field does not parse");
            PurlFieldState {
                valid: false,
                descriptor: None,
            }
        }
    }
}

/// Applies typed PURL text to a record.
///
/// When the text parses, the package fields of `info` are replaced by the parsed ones (absent
/// parts clear the field); otherwise the record is left for the caller to keep unchanged.
pub fn apply_purl_edit(info: &PackageInfo, text: &str) -> PurlEdit {
    let state = evaluate_purl_field(text);

    let package_info = state.descriptor.as_ref().map(|d| PackageInfo {
        package_type: Some(d.package_type.clone()),
        package_namespace: d.namespace.clone(),
        package_name: d.name.clone(),
        package_version: d.version.clone(),
        package_purl_appendix: appendix_of(d),
        ..info.clone()
    });

    PurlEdit {
        text: text.to_string(),
        valid: state.valid,
        package_info,
    }
}

/// Canonical `?qualifiers#subpath` suffix, `None` when the descriptor has neither.
pub fn appendix_of(descriptor: &PackageDescriptor) -> Option<String> {
    let appendix = codec::appendix(descriptor);
    if appendix.is_empty() {
        None
    } else {
        Some(appendix)
    }
}

/// Pre-selected records stay savable even when untouched or carrying an invalid PURL.
pub fn is_saving_disabled(was_modified: bool, purl_valid: bool, pre_selected: bool) -> bool {
    (!was_modified || !purl_valid) && !pre_selected
}
