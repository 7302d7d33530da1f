//! Rule set: the editable pricing configuration.
//!
//! A [`RuleSet`] holds four coefficient mappings (group, type, pack size and
//! subscription length) plus the ordered service catalog. Lookups never fail:
//! a missing or non-finite coefficient reads as the neutral multiplier `1`.

mod defaults;
mod normalize;
pub mod text_format;

pub use defaults::{
    DEFAULT_GROUP_FACTORS, DEFAULT_MONTHS_MULTIPLIERS, DEFAULT_PACK_DISCOUNTS,
    DEFAULT_SERVICE_NAMES, DEFAULT_TYPE_FACTORS,
};
pub use normalize::{coerce_factor, dedupe_service_names, normalize};

use crate::core::RuleSection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Neutral multiplier used whenever a coefficient is missing or unusable.
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Soft linear multiplier per month for subscription lengths with no
/// explicit entry in `months_mult`.
pub const FALLBACK_MONTHLY_RATE: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "serde_json::Value")]
pub struct RuleSet {
    pub group_factor: BTreeMap<String, f64>,
    pub type_factor: BTreeMap<String, f64>,
    pub pack_discount: BTreeMap<u32, f64>,
    pub months_mult: BTreeMap<u32, f64>,
    pub service_names: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            group_factor: named(DEFAULT_GROUP_FACTORS),
            type_factor: named(DEFAULT_TYPE_FACTORS),
            pack_discount: DEFAULT_PACK_DISCOUNTS.iter().copied().collect(),
            months_mult: DEFAULT_MONTHS_MULTIPLIERS.iter().copied().collect(),
            service_names: DEFAULT_SERVICE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn named(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl From<serde_json::Value> for RuleSet {
    fn from(raw: serde_json::Value) -> Self {
        normalize(&raw)
    }
}

impl RuleSet {
    /// Group multiplier, `1` when the group is unknown.
    pub fn group_factor_of(&self, group: &str) -> f64 {
        resolve(self.group_factor.get(group))
    }

    /// Type multiplier, `1` when the key is unknown.
    pub fn type_factor_of(&self, type_key: &str) -> f64 {
        resolve(self.type_factor.get(type_key))
    }

    /// Whole-pack multiplier, `1` when the pack size is unlisted.
    pub fn pack_discount_of(&self, classes: u32) -> f64 {
        resolve(self.pack_discount.get(&classes))
    }

    /// Explicit multiplier for a subscription length, if one is listed.
    pub fn months_mult_of(&self, months: u32) -> Option<f64> {
        self.months_mult.get(&months).map(|v| coerce_factor(*v))
    }

    /// Subscription multiplier with the linear fallback for unlisted lengths.
    pub fn months_multiplier(&self, months: u32) -> f64 {
        self.months_mult_of(months)
            .unwrap_or(months as f64 * FALLBACK_MONTHLY_RATE)
    }

    /// Group keys ordered most specific first: longer keys before shorter
    /// ones, ties in key order.
    pub fn groups_by_specificity(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.group_factor.keys().map(String::as_str).collect();
        keys.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
        keys
    }

    /// Serialize one section in its import text format.
    pub fn export_section(&self, section: RuleSection) -> String {
        match section {
            RuleSection::Group => text_format::format_named_mapping(&self.group_factor),
            RuleSection::Type => text_format::format_named_mapping(&self.type_factor),
            RuleSection::Pack => text_format::format_numeric_mapping(&self.pack_discount),
            RuleSection::Months => text_format::format_numeric_mapping(&self.months_mult),
            RuleSection::Services => text_format::format_service_list(&self.service_names),
        }
    }
}

fn resolve(value: Option<&f64>) -> f64 {
    value.map_or(NEUTRAL_FACTOR, |v| coerce_factor(*v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_coefficients() {
        let rules = RuleSet::default();
        assert_eq!(rules.group_factor_of("Hogar Personalizado"), 1.35);
        assert_eq!(rules.group_factor_of("Musigym"), 2.50);
        assert_eq!(rules.type_factor_of("Clase de prueba"), 0.60);
        assert_eq!(rules.pack_discount_of(24), 0.90);
        assert_eq!(rules.months_mult_of(12), Some(8.30));
        assert_eq!(rules.group_factor.len(), 14);
    }

    #[test]
    fn test_missing_keys_are_neutral() {
        let rules = RuleSet::default();
        assert_eq!(rules.group_factor_of(""), 1.0);
        assert_eq!(rules.group_factor_of("Desconocido"), 1.0);
        assert_eq!(rules.type_factor_of("Nada"), 1.0);
        assert_eq!(rules.pack_discount_of(1), 1.0);
        assert_eq!(rules.months_mult_of(5), None);
    }

    #[test]
    fn test_non_finite_coefficient_is_neutral() {
        let mut rules = RuleSet::default();
        rules.group_factor.insert("Musigym".into(), f64::NAN);
        rules.pack_discount.insert(8, f64::INFINITY);
        assert_eq!(rules.group_factor_of("Musigym"), 1.0);
        assert_eq!(rules.pack_discount_of(8), 1.0);
    }

    #[test]
    fn test_months_fallback_is_linear() {
        let rules = RuleSet::default();
        assert_eq!(rules.months_multiplier(5), 5.0 * 0.95);
        assert_eq!(rules.months_multiplier(3), 2.70);
    }

    #[test]
    fn test_groups_by_specificity_puts_longer_keys_first() {
        let rules = RuleSet::default();
        let ordered = rules.groups_by_specificity();
        let pos = |k: &str| ordered.iter().position(|g| *g == k).unwrap();
        assert!(pos("Musifamiliar Sede Grupal") < pos("Sede Grupal"));
        assert!(pos("Hogar Musifamiliar Grupal") < pos("Hogar Personalizado"));
        assert_eq!(ordered.last(), Some(&"Musigym"));
    }

    #[test]
    fn test_default_catalog_has_no_duplicates() {
        let rules = RuleSet::default();
        let deduped = dedupe_service_names(rules.service_names.iter().map(String::as_str));
        assert_eq!(deduped.len(), rules.service_names.len());
        assert_eq!(rules.service_names.len(), 63);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(RuleSet::default()).unwrap();
        assert_eq!(json["groupFactor"]["Musigym"], 2.5);
        assert_eq!(json["packDiscount"]["8"], 0.97);
        assert_eq!(json["monthsMult"]["12"], 8.3);
        assert!(json["serviceNames"].is_array());
    }

    #[test]
    fn test_json_round_trip_goes_through_normalize() {
        let original = RuleSet::default();
        let text = serde_json::to_string(&original).unwrap();
        let back: RuleSet = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }
}
