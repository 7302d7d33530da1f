use super::{RuleSet, NEUTRAL_FACTOR};
use crate::core::normalize_text;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Build a rule set from arbitrary, possibly malformed, JSON.
///
/// Starts from the compiled-in defaults and replaces each top-level field
/// that has the expected shape; anything else keeps its default. Never fails.
pub fn normalize(raw: &Value) -> RuleSet {
    let defaults = RuleSet::default();
    let Some(obj) = raw.as_object() else {
        return defaults;
    };

    let rules = RuleSet {
        group_factor: obj
            .get("groupFactor")
            .and_then(Value::as_object)
            .map(named_mapping)
            .unwrap_or(defaults.group_factor),
        type_factor: obj
            .get("typeFactor")
            .and_then(Value::as_object)
            .map(named_mapping)
            .unwrap_or(defaults.type_factor),
        pack_discount: obj
            .get("packDiscount")
            .and_then(Value::as_object)
            .map(numeric_mapping)
            .unwrap_or(defaults.pack_discount),
        months_mult: obj
            .get("monthsMult")
            .and_then(Value::as_object)
            .map(numeric_mapping)
            .unwrap_or(defaults.months_mult),
        service_names: obj
            .get("serviceNames")
            .and_then(Value::as_array)
            .map(|names| dedupe_service_names(names.iter().filter_map(Value::as_str)))
            .filter(|names| !names.is_empty())
            .unwrap_or(defaults.service_names),
    };

    rules.into_normalized()
}

impl RuleSet {
    /// Coerce every coefficient to a finite number and dedupe the catalog.
    pub fn into_normalized(mut self) -> Self {
        for value in self
            .group_factor
            .values_mut()
            .chain(self.type_factor.values_mut())
            .chain(self.pack_discount.values_mut())
            .chain(self.months_mult.values_mut())
        {
            *value = coerce_factor(*value);
        }
        self.service_names = dedupe_service_names(self.service_names.iter().map(String::as_str));
        self
    }
}

/// Finite values pass through; NaN and infinities become the neutral `1`.
pub fn coerce_factor(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        NEUTRAL_FACTOR
    }
}

/// Trim, drop blanks and drop names whose normalized form was already seen.
/// First occurrence wins and order is preserved.
pub fn dedupe_service_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(normalize_text(name)))
        .map(str::to_string)
        .collect()
}

fn coerce_value(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map_or(NEUTRAL_FACTOR, coerce_factor)
}

fn named_mapping(obj: &Map<String, Value>) -> BTreeMap<String, f64> {
    obj.iter()
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_string(), coerce_value(value)))
        .collect()
}

fn numeric_mapping(obj: &Map<String, Value>) -> BTreeMap<u32, f64> {
    obj.iter()
        .filter_map(|(key, value)| {
            let size = key.trim().parse::<u32>().ok().filter(|n| *n > 0)?;
            Some((size, coerce_value(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_non_object_yields_defaults() {
        assert_eq!(normalize(&json!(null)), RuleSet::default());
        assert_eq!(normalize(&json!("rules")), RuleSet::default());
        assert_eq!(normalize(&json!([1, 2, 3])), RuleSet::default());
    }

    #[test]
    fn test_well_formed_field_replaces_default() {
        let rules = normalize(&json!({ "groupFactor": { "Musigym": 3.0 } }));
        assert_eq!(rules.group_factor.len(), 1);
        assert_eq!(rules.group_factor_of("Musigym"), 3.0);
        // untouched fields keep defaults
        assert_eq!(rules.type_factor, RuleSet::default().type_factor);
    }

    #[test]
    fn test_malformed_field_keeps_default() {
        let rules = normalize(&json!({
            "groupFactor": [1, 2],
            "packDiscount": "cheap",
            "serviceNames": { "a": 1 }
        }));
        let defaults = RuleSet::default();
        assert_eq!(rules.group_factor, defaults.group_factor);
        assert_eq!(rules.pack_discount, defaults.pack_discount);
        assert_eq!(rules.service_names, defaults.service_names);
    }

    #[test]
    fn test_non_numeric_values_fall_back_to_one() {
        let rules = normalize(&json!({
            "typeFactor": {
                "Clase de prueba": "0.5",
                "Clase individual": "mucho",
                "Paquete": null,
                "Mes": true
            }
        }));
        assert_eq!(rules.type_factor["Clase de prueba"], 0.5);
        assert_eq!(rules.type_factor["Clase individual"], 1.0);
        assert_eq!(rules.type_factor["Paquete"], 1.0);
        assert_eq!(rules.type_factor["Mes"], 1.0);
    }

    #[test]
    fn test_numeric_mapping_drops_non_integer_keys() {
        let rules = normalize(&json!({
            "packDiscount": { "4": 1.0, "8": 0.9, "ocho": 0.5, "0": 0.1, "-4": 0.2 }
        }));
        assert_eq!(rules.pack_discount.keys().copied().collect::<Vec<_>>(), vec![4, 8]);
    }

    #[test]
    fn test_service_names_trimmed_and_deduped() {
        let rules = normalize(&json!({
            "serviceNames": [
                "  Musigym 1 mes ",
                "",
                "MUSIGYM  1 MES",
                42,
                "Curso de formación 1 mes",
                "Curso de formacion 1 mes"
            ]
        }));
        assert_eq!(
            rules.service_names,
            vec!["Musigym 1 mes".to_string(), "Curso de formación 1 mes".to_string()]
        );
    }

    #[test]
    fn test_empty_service_list_keeps_default_catalog() {
        let rules = normalize(&json!({ "serviceNames": ["  ", ""] }));
        assert_eq!(rules.service_names, RuleSet::default().service_names);
    }

    #[test]
    fn test_into_normalized_replaces_non_finite() {
        let mut rules = RuleSet::default();
        rules.months_mult.insert(5, f64::NEG_INFINITY);
        let rules = rules.into_normalized();
        assert_eq!(rules.months_mult[&5], 1.0);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(names in prop::collection::vec("[ a-zA-Zé]{0,12}", 0..20)) {
            let once = normalize(&json!({ "serviceNames": names }));
            let twice = normalize(&serde_json::to_value(&once).unwrap());
            prop_assert_eq!(&once.service_names, &twice.service_names);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_coefficients_always_finite(values in prop::collection::vec(prop::num::f64::ANY, 1..8)) {
            let mapping: Map<String, Value> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("G{i}"), serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number)))
                .collect();
            let rules = normalize(&json!({ "groupFactor": mapping }));
            prop_assert!(rules.group_factor.values().all(|v| v.is_finite()));
        }
    }
}
