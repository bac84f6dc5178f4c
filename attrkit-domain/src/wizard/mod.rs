//! Attribution wizard: step navigation plus the derived state of the popup around it.

mod lists;
mod navigator;
mod popup;

pub use lists::{
    AttributionCounts, ManuallyAddedValues, PackageAttribute, PackageListItem, WizardPackageLists,
    attribution_counts_for_resource_and_children, package_list_items,
};
pub use navigator::{PACKAGE_STEP_ID, Transition, VERSION_STEP_ID, WizardNavigator, WizardStep};
pub use popup::{
    APPLY_TOOLTIP, Breadcrumb, NEXT_TOOLTIP, WizardButtons, WizardSelection, apply_selection,
    breadcrumbs, package_step_purl, wizard_buttons,
};
