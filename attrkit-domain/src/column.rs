//! Helpers behind the attribution column: labels, text area sizing, resolved state and the
//! checkbox/confidence updates of a temporary record.

use attrkit_types::{FollowUp, FrequentLicenseName, PackageInfo, View};
use serde::Serialize;
use std::collections::BTreeSet;

pub const PRE_SELECTED_LABEL: &str = "Attribution was pre-selected";
pub const MARKED_FOR_REPLACEMENT_LABEL: &str = "Attribution is marked for replacement";
pub const STANDARD_LICENSE_TEXT_LABEL: &str = "Standard license text implied.";
pub const INSERT_NOTICE_TEXT_HINT: &str = "Insert notice text if necessary.";
pub const LICENSE_TEXT_LABEL: &str = "License Text (to appear in attribution document)";

const TEXT_BOXES_HEIGHT: i64 = 480;
const AUDIT_VIEW_EXTRA_HEIGHT: i64 = 34;
const TEXT_ROW_HEIGHT: i64 = 19;

/// Notices shown above the attribution column.
pub fn display_texts(
    info: &PackageInfo,
    selected_attribution_id: &str,
    marked_for_replacement_id: &str,
    view: View,
) -> Vec<&'static str> {
    let mut texts = Vec::new();
    if info.pre_selected {
        texts.push(PRE_SELECTED_LABEL);
    }
    if view == View::Attribution && selected_attribution_id == marked_for_replacement_id {
        texts.push(MARKED_FOR_REPLACEMENT_LABEL);
    }
    texts
}

/// Rows the license text area may use at a given window height. Can be zero or negative for very
/// small windows; callers clamp as they see fit.
pub fn license_text_max_rows(window_height: i64, view: View) -> i64 {
    let fixed = TEXT_BOXES_HEIGHT
        + if view == View::Audit {
            AUDIT_VIEW_EXTRA_HEIGHT
        } else {
            0
        };
    (window_height - fixed).div_euclid(TEXT_ROW_HEIGHT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextFieldRows {
    pub license_text: i64,
    pub copyright: i64,
    pub comment: i64,
}

/// Heights of the three free-text fields. Showing the license text collapses the other two.
pub fn text_field_rows(
    window_height: i64,
    view: View,
    license_text_shown: bool,
    smaller_license_text_or_comment: bool,
) -> TextFieldRows {
    let reduce = if smaller_license_text_or_comment { 5 } else { 1 };
    let license_text = license_text_max_rows(window_height, view) - reduce;

    if license_text_shown {
        TextFieldRows {
            license_text,
            copyright: 1,
            comment: 1,
        }
    } else {
        TextFieldRows {
            license_text,
            copyright: 6,
            comment: (license_text - 2).max(1) - reduce,
        }
    }
}

/// Label above the license text field.
///
/// Names matching a frequent license (short or full name, case-insensitive) imply the standard
/// text, so the field is only for additional notices.
pub fn license_text_label(
    license_name: Option<&str>,
    is_editable: bool,
    frequent_licenses: &[FrequentLicenseName],
) -> String {
    let is_frequent = license_name.filter(|n| !n.is_empty()).is_some_and(|name| {
        let name = name.to_lowercase();
        frequent_licenses.iter().any(|license| {
            license.short_name.to_lowercase() == name || license.full_name.to_lowercase() == name
        })
    });

    if !is_frequent {
        return LICENSE_TEXT_LABEL.to_string();
    }
    if is_editable {
        format!("{STANDARD_LICENSE_TEXT_LABEL} {INSERT_NOTICE_TEXT_HINT}")
    } else {
        format!("{STANDARD_LICENSE_TEXT_LABEL} ")
    }
}

pub fn is_resolved(attribution_id: &str, resolved: &BTreeSet<String>) -> bool {
    !attribution_id.is_empty() && resolved.contains(attribution_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedToggle {
    /// No attribution selected.
    Ignored,
    Resolved,
    Unresolved,
}

impl ResolvedToggle {
    /// Resolved external attributions are persisted together with manual ones.
    pub fn requires_save(self) -> bool {
        !matches!(self, ResolvedToggle::Ignored)
    }
}

/// Flips the resolved state of an external attribution.
pub fn toggle_resolved(attribution_id: &str, resolved: &mut BTreeSet<String>) -> ResolvedToggle {
    if attribution_id.is_empty() {
        return ResolvedToggle::Ignored;
    }
    if resolved.remove(attribution_id) {
        ResolvedToggle::Unresolved
    } else {
        resolved.insert(attribution_id.to_string());
        ResolvedToggle::Resolved
    }
}

pub fn with_confidence(info: &PackageInfo, confidence: u8) -> PackageInfo {
    PackageInfo {
        attribution_confidence: Some(confidence),
        ..info.clone()
    }
}

pub fn with_follow_up(info: &PackageInfo, checked: bool) -> PackageInfo {
    PackageInfo {
        follow_up: checked.then_some(FollowUp::FollowUp),
        ..info.clone()
    }
}

/// Unchecking removes the flag rather than storing `false`.
pub fn with_exclude_from_notice(info: &PackageInfo, checked: bool) -> PackageInfo {
    PackageInfo {
        exclude_from_notice: checked.then_some(true),
        ..info.clone()
    }
}

pub fn with_first_party(info: &PackageInfo, checked: bool) -> PackageInfo {
    PackageInfo {
        first_party: Some(checked),
        ..info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frequent() -> Vec<FrequentLicenseName> {
        vec![
            FrequentLicenseName::new("MIT", "MIT License"),
            FrequentLicenseName::new("Apache-2.0", "Apache License 2.0"),
        ]
    }

    #[test]
    fn display_texts_for_pre_selected_and_marked() {
        let info = PackageInfo {
            pre_selected: true,
            ..Default::default()
        };
        assert_eq!(
            display_texts(&info, "a", "a", View::Attribution),
            vec![PRE_SELECTED_LABEL, MARKED_FOR_REPLACEMENT_LABEL]
        );
        assert_eq!(
            display_texts(&info, "a", "a", View::Audit),
            vec![PRE_SELECTED_LABEL]
        );
        assert!(display_texts(&PackageInfo::default(), "a", "b", View::Attribution).is_empty());
    }

    #[test]
    fn max_rows_account_for_audit_header() {
        assert_eq!(license_text_max_rows(1000, View::Attribution), 27);
        assert_eq!(license_text_max_rows(1000, View::Audit), 25);
        assert_eq!(license_text_max_rows(470, View::Attribution), -1);
    }

    #[test]
    fn rows_collapse_when_license_text_is_shown() {
        assert_eq!(
            text_field_rows(1000, View::Attribution, false, false),
            TextFieldRows {
                license_text: 26,
                copyright: 6,
                comment: 23,
            }
        );
        assert_eq!(
            text_field_rows(1000, View::Attribution, true, false),
            TextFieldRows {
                license_text: 26,
                copyright: 1,
                comment: 1,
            }
        );
        assert_eq!(
            text_field_rows(1000, View::Attribution, false, true).comment,
            15
        );
    }

    #[test]
    fn license_label_matches_frequent_names_case_insensitively() {
        assert_eq!(
            license_text_label(Some("mit license"), true, &frequent()),
            "Standard license text implied. Insert notice text if necessary."
        );
        assert_eq!(
            license_text_label(Some("APACHE-2.0"), false, &frequent()),
            "Standard license text implied. "
        );
        assert_eq!(
            license_text_label(Some("GPL-3.0"), true, &frequent()),
            LICENSE_TEXT_LABEL
        );
        assert_eq!(license_text_label(None, true, &frequent()), LICENSE_TEXT_LABEL);
    }

    #[test]
    fn toggle_resolved_flips_membership() {
        let mut resolved = BTreeSet::new();
        assert_eq!(toggle_resolved("", &mut resolved), ResolvedToggle::Ignored);
        assert!(!ResolvedToggle::Ignored.requires_save());

        assert_eq!(toggle_resolved("x", &mut resolved), ResolvedToggle::Resolved);
        assert!(is_resolved("x", &resolved));

        let toggle = toggle_resolved("x", &mut resolved);
        assert_eq!(toggle, ResolvedToggle::Unresolved);
        assert!(toggle.requires_save());
        assert!(!is_resolved("x", &resolved));
        assert!(!is_resolved("", &resolved));
    }

    #[test]
    fn checkbox_updates() {
        let base = PackageInfo {
            package_name: Some("x".to_string()),
            ..Default::default()
        };

        assert_eq!(with_follow_up(&base, true).follow_up, Some(FollowUp::FollowUp));
        assert_eq!(with_follow_up(&base, false).follow_up, None);
        assert_eq!(with_exclude_from_notice(&base, true).exclude_from_notice, Some(true));
        assert_eq!(with_exclude_from_notice(&base, false).exclude_from_notice, None);
        assert_eq!(with_first_party(&base, false).first_party, Some(false));

        let updated = with_confidence(&base, 20);
        assert_eq!(updated.attribution_confidence, Some(20));
        assert_eq!(updated.package_name.as_deref(), Some("x"));
    }
}
