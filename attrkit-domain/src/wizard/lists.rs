//! Namespace, name and version lists offered by the attribution wizard.

use super::popup::WizardSelection;
use attrkit_types::{Attributions, ResourcesToAttributions};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Number of resources each attribution is linked to.
pub type AttributionCounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAttribute {
    Namespace,
    Name,
    Version,
}

impl PackageAttribute {
    fn prefix(self) -> &'static str {
        match self {
            PackageAttribute::Namespace => "namespace",
            PackageAttribute::Name => "name",
            PackageAttribute::Version => "version",
        }
    }

    /// List item id of `text`, e.g. `namespace-@angular`.
    pub fn item_id(self, text: &str) -> String {
        format!("{}-{}", self.prefix(), text)
    }
}

/// Values entered in the wizard that no attribution carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManuallyAddedValues {
    pub namespaces: Vec<String>,
    pub names: Vec<String>,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageListItem {
    pub id: String,
    pub text: String,
    /// Resource links of the attributions carrying this value; 0 for manually added values.
    pub count: usize,
    pub manually_added: bool,
    /// Name item ids a version occurs with. Empty for namespace and name items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardPackageLists {
    pub namespaces: Vec<PackageListItem>,
    pub names: Vec<PackageListItem>,
    pub versions: Vec<PackageListItem>,
    /// Name items of the current selection. A version listing one of these in `name_ids`
    /// belongs to the selected package.
    pub highlighted_package_name_ids: Vec<String>,
}

impl WizardPackageLists {
    pub fn contains(&self, attribute: PackageAttribute, text: &str) -> bool {
        let items = match attribute {
            PackageAttribute::Namespace => &self.namespaces,
            PackageAttribute::Name => &self.names,
            PackageAttribute::Version => &self.versions,
        };
        items.iter().any(|item| item.text == text)
    }
}

/// Counts how many resources at or below `resource_id` link each attribution.
///
/// A folder id (ending in `/`) covers every resource path it prefixes. Resolved external
/// attributions are left out.
pub fn attribution_counts_for_resource_and_children(
    resource_id: &str,
    external: &ResourcesToAttributions,
    manual: &ResourcesToAttributions,
    resolved_external: &BTreeSet<String>,
) -> AttributionCounts {
    let mut counts = AttributionCounts::new();

    for (_, ids) in external
        .iter()
        .filter(|(resource, _)| in_subtree(resource_id, resource))
    {
        for id in ids.iter().filter(|id| !resolved_external.contains(*id)) {
            *counts.entry(id.clone()).or_default() += 1;
        }
    }
    for (_, ids) in manual
        .iter()
        .filter(|(resource, _)| in_subtree(resource_id, resource))
    {
        for id in ids {
            *counts.entry(id.clone()).or_default() += 1;
        }
    }

    counts
}

fn in_subtree(root: &str, resource: &str) -> bool {
    resource == root || (root.ends_with('/') && resource.starts_with(root))
}

#[derive(Default)]
struct Tally {
    count: usize,
    name_ids: BTreeSet<String>,
}

/// Builds the three wizard lists from the counted attributions plus the manually added values.
///
/// Lists are ordered by descending count, then case-insensitively by text. Manually added values
/// already carried by an attribution are listed once, as attributed.
pub fn package_list_items(
    counts: &AttributionCounts,
    attributions: &Attributions,
    manually_added: &ManuallyAddedValues,
    selection: &WizardSelection,
) -> WizardPackageLists {
    let mut namespaces: BTreeMap<String, Tally> = BTreeMap::new();
    let mut names: BTreeMap<String, Tally> = BTreeMap::new();
    let mut versions: BTreeMap<String, Tally> = BTreeMap::new();

    for (id, count) in counts {
        let Some(info) = attributions.get(id) else {
            continue;
        };
        if let Some(namespace) = info.namespace() {
            namespaces.entry(namespace.to_string()).or_default().count += count;
        }
        if let Some(name) = info.name() {
            names.entry(name.to_string()).or_default().count += count;
        }
        if let Some(version) = info.version() {
            let tally = versions.entry(version.to_string()).or_default();
            tally.count += count;
            if let Some(name) = info.name() {
                tally.name_ids.insert(PackageAttribute::Name.item_id(name));
            }
        }
    }

    let highlighted_package_name_ids = selection
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(|name| vec![PackageAttribute::Name.item_id(name)])
        .unwrap_or_default();

    WizardPackageLists {
        namespaces: list_items(
            PackageAttribute::Namespace,
            namespaces,
            &manually_added.namespaces,
        ),
        names: list_items(PackageAttribute::Name, names, &manually_added.names),
        versions: list_items(
            PackageAttribute::Version,
            versions,
            &manually_added.versions,
        ),
        highlighted_package_name_ids,
    }
}

fn list_items(
    attribute: PackageAttribute,
    attributed: BTreeMap<String, Tally>,
    manually_added: &[String],
) -> Vec<PackageListItem> {
    let mut seen: BTreeSet<String> = attributed.keys().cloned().collect();

    let mut items: Vec<PackageListItem> = attributed
        .into_iter()
        .map(|(text, tally)| PackageListItem {
            id: attribute.item_id(&text),
            text,
            count: tally.count,
            manually_added: false,
            name_ids: tally.name_ids.into_iter().collect(),
        })
        .collect();

    for text in manually_added {
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        items.push(PackageListItem {
            id: attribute.item_id(text),
            text: text.clone(),
            count: 0,
            manually_added: true,
            name_ids: Vec::new(),
        });
    }

    items.sort_by(|a, b| {
        Reverse(a.count)
            .cmp(&Reverse(b.count))
            .then_with(|| a.text.to_lowercase().cmp(&b.text.to_lowercase()))
            .then_with(|| a.text.cmp(&b.text))
    });
    items
}
