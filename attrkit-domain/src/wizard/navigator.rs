use crate::error::{InvalidStepError, WizardConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const PACKAGE_STEP_ID: &str = "packageNamespaceAndName";
pub const VERSION_STEP_ID: &str = "packageVersion";

/// A named step; `label` is what breadcrumbs show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStep {
    pub id: String,
    pub label: String,
}

impl WizardStep {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Moved,
    /// Already at the boundary (or at the requested step); nothing changed.
    NoOp,
    /// The caller's guard did not permit leaving the current step.
    Blocked,
}

/// Stepper over a fixed, ordered list of steps.
///
/// The first step is initial and the last is terminal; only the terminal step offers apply.
/// The current step is always a member of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardNavigator {
    steps: Vec<WizardStep>,
    current: usize,
}

impl Default for WizardNavigator {
    fn default() -> Self {
        Self::attribution_wizard()
    }
}

impl WizardNavigator {
    pub fn new(steps: Vec<WizardStep>) -> Result<Self, WizardConfigError> {
        if steps.is_empty() {
            return Err(WizardConfigError::NoSteps);
        }
        let mut seen = BTreeSet::new();
        for step in &steps {
            if step.id.is_empty() {
                return Err(WizardConfigError::EmptyStepId);
            }
            if !seen.insert(step.id.as_str()) {
                return Err(WizardConfigError::DuplicateStep {
                    id: step.id.clone(),
                });
            }
        }
        Ok(Self { steps, current: 0 })
    }

    /// Package selection followed by version selection.
    pub fn attribution_wizard() -> Self {
        Self {
            steps: vec![
                WizardStep::new(PACKAGE_STEP_ID, "package"),
                WizardStep::new(VERSION_STEP_ID, "version"),
            ],
            current: 0,
        }
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn current(&self) -> &WizardStep {
        &self.steps[self.current]
    }

    pub fn current_id(&self) -> &str {
        &self.current().id
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_initial(&self) -> bool {
        self.current == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Apply/finish is only offered on the terminal step.
    pub fn offers_apply(&self) -> bool {
        self.is_terminal()
    }

    /// Advances one step when `permitted`. Ignored on the terminal step.
    pub fn next(&mut self, permitted: bool) -> Transition {
        if self.is_terminal() {
            return Transition::NoOp;
        }
        if !permitted {
            debug!(step = %self.current_id(), "next rejected by guard");
            return Transition::Blocked;
        }
        self.current += 1;
        Transition::Moved
    }

    /// Goes back one step. Ignored on the initial step.
    pub fn back(&mut self) -> Transition {
        if self.is_initial() {
            return Transition::NoOp;
        }
        self.current -= 1;
        Transition::Moved
    }

    /// Moves straight to `id`.
    ///
    /// An unknown id is a contract violation on the caller's side. It is reported as
    /// [`InvalidStepError`] in every build profile, logged at `warn`, and the current step stays
    /// where it was.
    pub fn jump_to(&mut self, id: &str) -> Result<Transition, InvalidStepError> {
        let Some(index) = self.steps.iter().position(|s| s.id == id) else {
            warn!(step = %id, current = %self.current_id(), "jump to unknown wizard step");
            return Err(InvalidStepError { id: id.to_string() });
        };
        if index == self.current {
            return Ok(Transition::NoOp);
        }
        self.current = index;
        Ok(Transition::Moved)
    }
}
