//! Domain logic: derive what the attribution editor shows from explicit slices of store state.
//!
//! Every function here is pure. Callers pass the state they read from the application store and
//! re-run the projection on each change; nothing is cached or kept between calls.

pub mod column;
mod error;
pub mod list;
pub mod merge;
pub mod wizard;

pub use error::{InvalidStepError, WizardConfigError};
pub use merge::{MergeButtonDisplayState, MergeState, project};
pub use wizard::{Transition, WizardNavigator, WizardSelection, WizardStep};
