//! Card list of the manual attributions on a resource.

use attrkit_types::Attributions;
use serde::Serialize;
use std::cmp::Ordering;

pub const ADD_NEW_ATTRIBUTION_ID: &str = "ADD_NEW_ATTRIBUTION_ID";
pub const ADD_NEW_ATTRIBUTION_TEXT: &str = "Add new attribution";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionCard {
    /// Empty for the "add new" entry.
    pub attribution_id: String,
    pub card_id: String,
    pub title: String,
    pub is_selected: bool,
    pub is_pre_selected: bool,
    pub is_add_new: bool,
}

/// Cards in display order: alphabetical by package name (case-insensitive, ties broken by id,
/// unnamed first), optionally followed by the "add new attribution" entry.
///
/// `selected_attribution_id` of `Some("")` means a new attribution is being created, which
/// selects the "add new" entry.
pub fn manual_attribution_cards(
    resource_id: &str,
    attributions: &Attributions,
    selected_attribution_id: Option<&str>,
    show_add_new: bool,
) -> Vec<AttributionCard> {
    let mut ids: Vec<&String> = attributions.keys().collect();
    ids.sort_by(|a, b| compare_by_name(attributions, a, b));

    let mut cards: Vec<AttributionCard> = ids
        .into_iter()
        .map(|id| {
            let info = &attributions[id];
            AttributionCard {
                attribution_id: id.clone(),
                card_id: card_id(resource_id, id),
                title: info.name().unwrap_or_default().to_string(),
                is_selected: selected_attribution_id == Some(id.as_str()),
                is_pre_selected: info.pre_selected,
                is_add_new: false,
            }
        })
        .collect();

    if show_add_new {
        cards.push(AttributionCard {
            attribution_id: String::new(),
            card_id: card_id(resource_id, ADD_NEW_ATTRIBUTION_ID),
            title: ADD_NEW_ATTRIBUTION_TEXT.to_string(),
            is_selected: selected_attribution_id == Some(""),
            is_pre_selected: false,
            is_add_new: true,
        });
    }

    cards
}

fn card_id(resource_id: &str, attribution_id: &str) -> String {
    format!("manual-{resource_id}-{attribution_id}")
}

fn compare_by_name(attributions: &Attributions, a: &str, b: &str) -> Ordering {
    let name = |id: &str| {
        attributions
            .get(id)
            .and_then(|info| info.name())
            .unwrap_or_default()
            .to_lowercase()
    };
    name(a).cmp(&name(b)).then_with(|| a.cmp(b))
}
