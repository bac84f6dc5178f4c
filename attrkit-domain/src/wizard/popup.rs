use super::lists::{PackageAttribute, WizardPackageLists};
use super::navigator::WizardNavigator;
use attrkit_purl::purl_for_package_info;
use attrkit_types::{ButtonConfig, ButtonText, PackageInfo, TooltipPlacement};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const NEXT_TOOLTIP: &str = "Please select package namespace and name to continue";
pub const APPLY_TOOLTIP: &str = "Please select package version to apply changes";

/// Values picked from the wizard's namespace, name and version lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl WizardSelection {
    /// Selection the wizard opens with: the package fields of the attribution it was opened for.
    pub fn from_popup_attribution(popup_attribution: &PackageInfo) -> Self {
        Self {
            namespace: popup_attribution.namespace().map(str::to_string),
            name: popup_attribution.name().map(str::to_string),
            version: popup_attribution.version().map(str::to_string),
        }
    }

    /// Drops a selected version the version list no longer offers.
    pub fn reconcile(mut self, lists: &WizardPackageLists) -> Self {
        let unlisted = self
            .version
            .as_deref()
            .is_some_and(|v| !lists.contains(PackageAttribute::Version, v));
        if unlisted {
            debug!(version = ?self.version, "selected version is not listed, clearing it");
            self.version = None;
        }
        self
    }

    /// Guard of the package step.
    pub fn is_namespace_and_name_selected(&self) -> bool {
        is_set(&self.namespace) && is_set(&self.name)
    }

    /// Guard of the apply action.
    pub fn is_version_selected(&self) -> bool {
        is_set(&self.version)
    }

    /// Package fields of the selection. The type comes from the attribution the wizard was opened
    /// for, falling back to `default_type`.
    pub fn package_info(&self, popup_type: Option<&str>, default_type: &str) -> PackageInfo {
        let package_type = popup_type
            .filter(|t| !t.is_empty())
            .unwrap_or(default_type);
        PackageInfo {
            package_type: Some(package_type.to_string()),
            package_namespace: self.namespace.clone().filter(|s| !s.is_empty()),
            package_name: self.name.clone().filter(|s| !s.is_empty()),
            package_version: self.version.clone().filter(|s| !s.is_empty()),
            ..Default::default()
        }
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// PURL preview on the package step: the selection without its version.
pub fn package_step_purl(
    selection: &WizardSelection,
    popup_type: Option<&str>,
    default_type: &str,
) -> String {
    let info = PackageInfo {
        package_version: None,
        ..selection.package_info(popup_type, default_type)
    };
    purl_for_package_info(&info)
}

/// Record written back when apply is pressed: the popup attribution with its package fields
/// replaced by the selection. Unselected fields are cleared.
pub fn apply_selection(
    popup_attribution: &PackageInfo,
    selection: &WizardSelection,
    default_type: &str,
) -> PackageInfo {
    let selected = selection.package_info(popup_attribution.package_type(), default_type);
    PackageInfo {
        package_type: selected.package_type,
        package_namespace: selected.package_namespace,
        package_name: selected.package_name,
        package_version: selected.package_version,
        ..popup_attribution.clone()
    }
}

/// Buttons of the wizard popup, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardButtons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<ButtonConfig>,
    pub primary: ButtonConfig,
    pub cancel: ButtonConfig,
}

pub fn wizard_buttons(navigator: &WizardNavigator, selection: &WizardSelection) -> WizardButtons {
    let back = (!navigator.is_initial()).then(|| ButtonConfig::plain(ButtonText::Back));

    let primary = if navigator.offers_apply() {
        guarded_button(
            ButtonText::Apply,
            selection.is_version_selected(),
            APPLY_TOOLTIP,
        )
    } else {
        guarded_button(
            ButtonText::Next,
            selection.is_namespace_and_name_selected(),
            NEXT_TOOLTIP,
        )
    };

    WizardButtons {
        back,
        primary,
        cancel: ButtonConfig::plain(ButtonText::Cancel),
    }
}

fn guarded_button(button_text: ButtonText, permitted: bool, tooltip: &str) -> ButtonConfig {
    ButtonConfig {
        button_text,
        disabled: !permitted,
        is_dark: true,
        tooltip_text: (!permitted).then(|| tooltip.to_string()),
        tooltip_placement: Some(TooltipPlacement::Top),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

pub fn breadcrumbs(navigator: &WizardNavigator) -> Vec<Breadcrumb> {
    let current = navigator.current_id();
    navigator
        .steps()
        .iter()
        .map(|step| Breadcrumb {
            id: step.id.clone(),
            label: step.label.clone(),
            selected: step.id == current,
        })
        .collect()
}
