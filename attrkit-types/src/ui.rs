use serde::{Deserialize, Serialize};

/// Top-level view the attribution column is rendered in. Serialized as the store names it
/// (`Audit`, `Attribution`, `Report`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Audit,
    Attribution,
    Report,
}

/// Label of a popup button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonText {
    Next,
    Back,
    Cancel,
    Apply,
}

impl ButtonText {
    pub fn label(self) -> &'static str {
        match self {
            ButtonText::Next => "Next",
            ButtonText::Back => "Back",
            ButtonText::Cancel => "Cancel",
            ButtonText::Apply => "Apply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipPlacement {
    Top,
    Right,
}

/// Presentation-independent description of a button.
///
/// The click handler stays with the host; `button_text` identifies the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    pub button_text: ButtonText,
    pub disabled: bool,
    pub is_dark: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_placement: Option<TooltipPlacement>,
}

impl ButtonConfig {
    /// An always-enabled, light button without tooltip.
    pub fn plain(button_text: ButtonText) -> Self {
        Self {
            button_text,
            disabled: false,
            is_dark: false,
            tooltip_text: None,
            tooltip_placement: None,
        }
    }
}
