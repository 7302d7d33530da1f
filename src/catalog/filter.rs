//! Catalog filtering and sorting.

use crate::core::{normalize_text, CatalogEntry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Active catalog filters. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    #[serde(rename = "q")]
    pub query: String,
    pub modality: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub group: String,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        [&self.query, &self.modality, &self.type_label, &self.group]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.matches_query(entry)
            && matches_label(&self.modality, entry.modality.as_str())
            && matches_label(&self.type_label, entry.type_label.as_str())
            && self.matches_group(entry)
    }

    fn matches_query(&self, entry: &CatalogEntry) -> bool {
        let query = normalize_text(&self.query);
        query.is_empty() || entry.search.contains(&query)
    }

    fn matches_group(&self, entry: &CatalogEntry) -> bool {
        let wanted = normalize_text(&self.group);
        wanted.is_empty() || normalize_text(&entry.group) == wanted
    }

    /// Visible entries, in catalog order.
    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

fn matches_label(wanted: &str, actual: &str) -> bool {
    let wanted = wanted.trim();
    wanted.is_empty() || wanted.eq_ignore_ascii_case(actual)
}

/// Display ordering for the price list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Catalog (insertion) order
    #[default]
    Catalog,
    Name,
    Group,
    Price,
}

/// Stable sort of visible entries. `price_of` is only consulted for
/// [`SortKey::Price`].
pub fn sort_entries<F>(entries: &mut [&CatalogEntry], key: SortKey, descending: bool, price_of: F)
where
    F: Fn(&CatalogEntry) -> f64,
{
    let compare = |a: &&CatalogEntry, b: &&CatalogEntry| -> Ordering {
        match key {
            SortKey::Catalog => Ordering::Equal,
            SortKey::Name => a.search.cmp(&b.search),
            SortKey::Group => normalize_text(&a.group)
                .cmp(&normalize_text(&b.group))
                .then_with(|| a.search.cmp(&b.search)),
            SortKey::Price => price_of(a).total_cmp(&price_of(b)),
        }
    };

    if descending {
        if key == SortKey::Catalog {
            entries.reverse();
        } else {
            entries.sort_by(|a, b| compare(b, a));
        }
    } else {
        entries.sort_by(compare);
    }
}
