//! Error types for attrkit-domain.
//!
//! Only the wizard can fail:
//! - building a navigator from an unusable step list ([`WizardConfigError`])
//! - asking it to jump to a step it does not have ([`InvalidStepError`])
//!
//! Both indicate a programming error in the caller rather than bad user input.

use thiserror::Error;

/// `jump_to` was given an id outside the configured sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{id}' is not a step of this wizard")]
pub struct InvalidStepError {
    pub id: String,
}

/// The step list handed to a navigator cannot be navigated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardConfigError {
    #[error("wizard needs at least one step")]
    NoSteps,

    #[error("wizard step id must not be empty")]
    EmptyStepId,

    #[error("duplicate wizard step id '{id}'")]
    DuplicateStep { id: String },
}
