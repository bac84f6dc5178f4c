//! Shared DTOs for the attrkit workspace.
//!
//! # Design constraints
//! - These records mirror what the application store keeps per attribution, so field names
//!   serialize in camelCase.
//! - Every field except the package type is optional; absent and empty mean the same thing.
//! - Prefer adding optional fields over changing semantics.

pub mod package;
pub mod ui;

pub use package::{
    AttributionData, Attributions, FollowUp, FrequentLicenseName, PackageInfo,
    ResourcesToAttributions,
};
pub use ui::{ButtonConfig, ButtonText, TooltipPlacement, View};

/// Package type used when neither the record nor the configuration names one.
pub const DEFAULT_PACKAGE_TYPE: &str = "generic";
