//! Persisted state schemas and the v1 → v2 migration.
//!
//! Two generations exist under separate keys:
//!
//! - v1 (legacy): `{ base, rounding, globalPct, filters }`
//! - v2 (current): `{ base, rounding, globalPct, ccFee, view, showOnlyVisible,
//!   compact, filters, afford, config }`
//!
//! Decoding is lenient: every field is read on its own and a missing or
//! malformed field falls back to its default without affecting the others.

use crate::catalog::CatalogFilter;
use crate::pricing::affordability::{clamp_installments, AffordScope, AffordSettings};
use crate::pricing::{coerce_pct, PricingState};
use crate::rules::{normalize, RuleSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LEGACY_STATE_KEY: &str = "tarifario.state.v1";
pub const STATE_KEY: &str = "tarifario.state.v2";

/// Price list layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "cards" => Some(Self::Cards),
            _ => None,
        }
    }
}

/// Display preferences that travel with the pricing state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    pub view: ViewMode,
    pub show_only_visible: bool,
    pub compact: bool,
    pub filters: CatalogFilter,
    pub afford: AffordSettings,
}

/// Legacy (v1) record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredStateV1 {
    pub base: f64,
    pub rounding: u64,
    pub global_pct: f64,
    pub filters: CatalogFilter,
}

/// Current (v2) record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub base: f64,
    pub rounding: u64,
    pub global_pct: f64,
    pub cc_fee: bool,
    pub view: ViewMode,
    pub show_only_visible: bool,
    pub compact: bool,
    pub filters: CatalogFilter,
    pub afford: AffordSettings,
    pub config: RuleSet,
}

impl Default for StoredState {
    fn default() -> Self {
        Self::from_parts(
            &PricingState::default(),
            &Preferences::default(),
            &RuleSet::default(),
        )
    }
}

impl StoredState {
    pub fn from_parts(pricing: &PricingState, prefs: &Preferences, rules: &RuleSet) -> Self {
        Self {
            base: pricing.base_price,
            rounding: pricing.rounding_step,
            global_pct: pricing.global_pct,
            cc_fee: pricing.card_fee,
            view: prefs.view,
            show_only_visible: prefs.show_only_visible,
            compact: prefs.compact,
            filters: prefs.filters.clone(),
            afford: prefs.afford.clone(),
            config: rules.clone(),
        }
    }

    pub fn pricing(&self) -> PricingState {
        PricingState {
            base_price: self.base,
            rounding_step: self.rounding,
            global_pct: self.global_pct,
            card_fee: self.cc_fee,
        }
        .coerced()
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            view: self.view,
            show_only_visible: self.show_only_visible,
            compact: self.compact,
            filters: self.filters.clone(),
            afford: self.afford.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One-shot v1 → v2 upgrade. Card fee off, default affordability
/// settings and default rules: v1 never stored custom rules.
pub fn migrate(v1: &StoredStateV1) -> StoredState {
    StoredState {
        base: v1.base,
        rounding: v1.rounding,
        global_pct: v1.global_pct,
        cc_fee: false,
        filters: v1.filters.clone(),
        afford: AffordSettings::default(),
        config: RuleSet::default(),
        ..StoredState::default()
    }
}

/// Lenient v2 decode; `fallback` supplies every missing or malformed field.
pub fn decode_state(raw: &Value, fallback: &StoredState) -> StoredState {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    StoredState {
        base: read_base(obj).unwrap_or(fallback.base),
        rounding: read_rounding(obj).unwrap_or(fallback.rounding),
        global_pct: read_pct(obj).unwrap_or(fallback.global_pct),
        cc_fee: read_bool(obj, "ccFee").unwrap_or(fallback.cc_fee),
        view: obj
            .get("view")
            .and_then(Value::as_str)
            .and_then(ViewMode::parse)
            .unwrap_or(fallback.view),
        show_only_visible: read_bool(obj, "showOnlyVisible").unwrap_or(fallback.show_only_visible),
        compact: read_bool(obj, "compact").unwrap_or(fallback.compact),
        filters: read_filters(obj).unwrap_or_else(|| fallback.filters.clone()),
        afford: obj
            .get("afford")
            .map(|afford| decode_afford(afford, &fallback.afford))
            .unwrap_or_else(|| fallback.afford.clone()),
        config: obj
            .get("config")
            .map(normalize)
            .unwrap_or_else(|| fallback.config.clone()),
    }
}

/// Lenient v1 decode, defaults from `fallback`.
pub fn decode_legacy_state(raw: &Value, fallback: &StoredState) -> StoredStateV1 {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    StoredStateV1 {
        base: read_base(obj).unwrap_or(fallback.base),
        rounding: read_rounding(obj).unwrap_or(fallback.rounding),
        global_pct: read_pct(obj).unwrap_or(fallback.global_pct),
        filters: read_filters(obj).unwrap_or_else(|| fallback.filters.clone()),
    }
}

fn decode_afford(raw: &Value, fallback: &AffordSettings) -> AffordSettings {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    AffordSettings {
        smmlv: match obj.get("smmlv") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => fallback.smmlv.clone(),
        },
        max: read_number(obj, "max")
            .filter(|n| *n >= 0.0)
            .map(|n| clamp_installments(n.min(u32::MAX as f64) as u32))
            .unwrap_or(fallback.max),
        scope: obj
            .get("scope")
            .and_then(Value::as_str)
            .map(|s| AffordScope::parse(s).unwrap_or_default())
            .unwrap_or(fallback.scope),
    }
}

fn read_number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn read_base(obj: &Map<String, Value>) -> Option<f64> {
    read_number(obj, "base").filter(|base| *base >= 0.0)
}

fn read_rounding(obj: &Map<String, Value>) -> Option<u64> {
    read_number(obj, "rounding")
        .filter(|step| *step >= 0.0)
        .map(|step| step.trunc() as u64)
}

fn read_pct(obj: &Map<String, Value>) -> Option<f64> {
    read_number(obj, "globalPct").map(coerce_pct)
}

fn read_bool(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

fn read_filters(obj: &Map<String, Value>) -> Option<CatalogFilter> {
    serde_json::from_value(obj.get("filters")?.clone()).ok()
}
