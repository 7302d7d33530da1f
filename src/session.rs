//! Pricing session: the rule set, pricing inputs, display preferences and
//! the catalog derived from them, owned together.
//!
//! Every mutation that touches the rule set rebuilds the catalog in full, so
//! [`Session::catalog`] always reflects the current `service_names`.

use crate::catalog::{build_catalog, parse_entry, sort_entries, CatalogFilter, SortKey};
use crate::core::{CatalogEntry, Error, Result, RuleSection};
use crate::pricing::affordability::{affordability, AffordScope, AffordabilityReport};
use crate::pricing::{breakdown, price_with_state, to_display_units, PriceBreakdown, PricingState};
use crate::rules::text_format::{parse_named_mapping, parse_numeric_mapping, parse_service_list};
use crate::rules::RuleSet;
use crate::storage::{Preferences, StoredState};
use tracing::{debug, warn};

/// Raw text of a rule edit, one field per editable section. Blank fields
/// leave their section untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEdits {
    pub groups: String,
    pub types: String,
    pub packs: String,
    pub months: String,
    pub services: String,
}

impl ConfigEdits {
    pub fn section(&self, section: RuleSection) -> &str {
        match section {
            RuleSection::Group => &self.groups,
            RuleSection::Type => &self.types,
            RuleSection::Pack => &self.packs,
            RuleSection::Months => &self.months,
            RuleSection::Services => &self.services,
        }
    }

    pub fn section_mut(&mut self, section: RuleSection) -> &mut String {
        match section {
            RuleSection::Group => &mut self.groups,
            RuleSection::Type => &mut self.types,
            RuleSection::Pack => &mut self.packs,
            RuleSection::Months => &mut self.months,
            RuleSection::Services => &mut self.services,
        }
    }

    pub fn is_empty(&self) -> bool {
        RuleSection::ALL
            .iter()
            .all(|section| self.section(*section).trim().is_empty())
    }

    /// Non-blank sections that contain no valid line.
    pub fn unusable_sections(&self) -> Vec<RuleSection> {
        RuleSection::ALL
            .into_iter()
            .filter(|section| {
                let text = self.section(*section);
                !text.trim().is_empty() && !has_valid_line(*section, text)
            })
            .collect()
    }
}

fn has_valid_line(section: RuleSection, text: &str) -> bool {
    match section {
        RuleSection::Group | RuleSection::Type => !parse_named_mapping(text).is_empty(),
        RuleSection::Pack | RuleSection::Months => !parse_numeric_mapping(text).is_empty(),
        RuleSection::Services => !parse_service_list(text).is_empty(),
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    rules: RuleSet,
    pricing: PricingState,
    preferences: Preferences,
    catalog: Vec<CatalogEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RuleSet::default(), PricingState::default(), Preferences::default())
    }
}

impl Session {
    pub fn new(rules: RuleSet, pricing: PricingState, preferences: Preferences) -> Self {
        let rules = rules.into_normalized();
        let catalog = build_catalog(&rules);
        Self {
            rules,
            pricing: pricing.coerced(),
            preferences,
            catalog,
        }
    }

    pub fn from_stored(state: &StoredState) -> Self {
        Self::new(state.config.clone(), state.pricing(), state.preferences())
    }

    /// Persistable snapshot of the whole session.
    pub fn snapshot(&self) -> StoredState {
        StoredState::from_parts(&self.pricing, &self.preferences, &self.rules)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn pricing(&self) -> &PricingState {
        &self.pricing
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn set_pricing(&mut self, pricing: PricingState) {
        self.pricing = pricing.coerced();
    }

    pub fn set_filters(&mut self, filters: CatalogFilter) {
        self.preferences.filters = filters;
    }

    /// Replace the whole rule set and rebuild the catalog.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules.into_normalized();
        self.rebuild();
    }

    pub fn reset_rules(&mut self) {
        self.set_rules(RuleSet::default());
    }

    fn rebuild(&mut self) {
        self.catalog = build_catalog(&self.rules);
    }

    /// Engine price of an entry under the session state.
    pub fn price(&self, entry: &CatalogEntry) -> f64 {
        price_with_state(entry, &self.pricing, &self.rules)
    }

    /// Price in whole currency units.
    pub fn price_of(&self, entry: &CatalogEntry) -> u64 {
        to_display_units(self.price(entry))
    }

    pub fn price_breakdown(&self, entry: &CatalogEntry) -> PriceBreakdown {
        breakdown(
            entry,
            self.pricing.base_price,
            self.pricing.rounding_step,
            self.pricing.global_pct,
            &self.rules,
            self.pricing.card_fee,
        )
    }

    /// Parse and price an arbitrary name, catalog or not.
    pub fn quote(&self, name: &str) -> (CatalogEntry, PriceBreakdown) {
        let entry = parse_entry(name, &self.rules);
        let breakdown = self.price_breakdown(&entry);
        (entry, breakdown)
    }

    /// Entries passing the active filter, sorted for display.
    pub fn visible_entries(&self, sort: SortKey, descending: bool) -> Vec<&CatalogEntry> {
        let mut entries = self.preferences.filters.apply(&self.catalog);
        sort_entries(&mut entries, sort, descending, |entry| self.price(entry));
        entries
    }

    /// Entries included in copies and exports: the filtered view when
    /// `show_only_visible` is set, the whole catalog otherwise.
    pub fn export_entries(&self, sort: SortKey, descending: bool) -> Vec<&CatalogEntry> {
        if self.preferences.show_only_visible {
            return self.visible_entries(sort, descending);
        }
        let mut entries: Vec<&CatalogEntry> = self.catalog.iter().collect();
        sort_entries(&mut entries, sort, descending, |entry| self.price(entry));
        entries
    }

    pub fn affordability(&self) -> AffordabilityReport {
        let settings = &self.preferences.afford;
        let in_scope = match settings.scope {
            AffordScope::Shown => self.preferences.filters.apply(&self.catalog),
            AffordScope::All => self.catalog.iter().collect(),
        };
        let priced: Vec<(&CatalogEntry, u64)> = in_scope
            .into_iter()
            .map(|entry| (entry, self.price_of(entry)))
            .collect();
        affordability(&priced, settings)
    }

    /// Apply edited rule text.
    ///
    /// Blank sections are skipped. A section with at least one valid line
    /// replaces its mapping (or the service list) entirely; invalid lines
    /// are dropped one by one. A non-blank section without any valid line
    /// keeps its current rules while the other sections still apply.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRuleText`, naming the first unusable section,
    /// when the edit has non-blank text but no section yields a single valid
    /// line. The session is not modified in that case.
    pub fn apply_config_edits(&mut self, edits: &ConfigEdits) -> Result<&RuleSet> {
        let mut next = self.rules.clone();
        let mut applied_any = false;
        let mut skipped = Vec::new();

        for section in RuleSection::ALL {
            let text = edits.section(section);
            if text.trim().is_empty() {
                continue;
            }
            let applied = match section {
                RuleSection::Group => replace_if_any(&mut next.group_factor, parse_named_mapping(text)),
                RuleSection::Type => replace_if_any(&mut next.type_factor, parse_named_mapping(text)),
                RuleSection::Pack => {
                    replace_if_any(&mut next.pack_discount, parse_numeric_mapping(text))
                }
                RuleSection::Months => {
                    replace_if_any(&mut next.months_mult, parse_numeric_mapping(text))
                }
                RuleSection::Services => {
                    let names = parse_service_list(text);
                    let any = !names.is_empty();
                    if any {
                        next.service_names = names;
                    }
                    any
                }
            };
            if applied {
                applied_any = true;
                debug!(section = section.as_str(), "Applied rule edit");
            } else {
                warn!(section = section.as_str(), "No valid lines; keeping current rules");
                skipped.push(section);
            }
        }

        if let (false, Some(&section)) = (applied_any, skipped.first()) {
            return Err(Error::InvalidRuleText { section });
        }
        if applied_any {
            self.set_rules(next);
        }
        Ok(&self.rules)
    }
}

fn replace_if_any<K: Ord, V>(
    target: &mut std::collections::BTreeMap<K, V>,
    parsed: std::collections::BTreeMap<K, V>,
) -> bool {
    if parsed.is_empty() {
        return false;
    }
    *target = parsed;
    true
}
