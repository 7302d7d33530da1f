use super::parser::parse_entry;
use crate::core::CatalogEntry;
use crate::rules::RuleSet;
use tracing::debug;

/// Parse every service name of the rule set, in catalog order.
///
/// The result fully replaces any previously built catalog.
pub fn build_catalog(rules: &RuleSet) -> Vec<CatalogEntry> {
    let entries: Vec<CatalogEntry> = rules
        .service_names
        .iter()
        .map(|name| parse_entry(name, rules))
        .collect();

    debug!(
        entries = entries.len(),
        ungrouped = entries.iter().filter(|e| !e.has_group()).count(),
        "Built catalog"
    );
    entries
}
