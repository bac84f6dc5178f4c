//! Visibility of the merge buttons on an attribution card.
//!
//! A user marks one manual attribution for replacement, then picks another one to replace it
//! with. Which of the three buttons shows up, and whether "replace marked by" is clickable,
//! depends only on the ids involved and a few flags.

use serde::{Deserialize, Serialize};

/// Snapshot of everything the merge buttons depend on.
///
/// An empty `marked_for_replacement_id` means nothing is marked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeState {
    pub marked_for_replacement_id: String,
    pub target_id: String,
    pub selected_id: String,
    pub was_modified: bool,
    pub target_is_pre_selected: bool,
    pub target_is_external: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeButtonDisplayState {
    pub show_mark_for_replacement: bool,
    pub show_unmark_for_replacement: bool,
    pub show_replace_marked_by: bool,
    pub disable_replace_marked_by: bool,
}

pub fn project(state: &MergeState) -> MergeButtonDisplayState {
    let any_marked = !state.marked_for_replacement_id.is_empty();
    let target_is_marked = state.target_id == state.marked_for_replacement_id;
    // Only a present mark can involve the selection in a merge.
    let selected_involved = any_marked
        && (state.selected_id == state.marked_for_replacement_id
            || state.selected_id == state.target_id);
    let manual_target = !state.target_is_external;

    MergeButtonDisplayState {
        show_mark_for_replacement: manual_target && !target_is_marked,
        show_unmark_for_replacement: manual_target && any_marked && target_is_marked,
        show_replace_marked_by: manual_target && any_marked && !target_is_marked,
        disable_replace_marked_by: (selected_involved && state.was_modified)
            || state.target_is_pre_selected,
    }
}
