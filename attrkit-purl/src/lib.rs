//! Package URL handling.
//!
//! The codec maps a [`PackageDescriptor`] to its canonical `pkg:` string and back. It never
//! decides whether a descriptor is complete enough for downstream use; that is left to callers
//! (see [`package`] for the attribution-record integration).

mod codec;
mod encoding;
mod error;
pub mod package;

pub use codec::{PackageDescriptor, generate, normalize, parse};
pub use error::ParseError;
pub use package::{
    PurlEdit, PurlFieldState, appendix_of, apply_purl_edit, evaluate_purl_field,
    is_saving_disabled, purl_for_package_info,
};

/// Scheme every package URL starts with.
pub const SCHEME: &str = "pkg";
