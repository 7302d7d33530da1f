//! Price computation.
//!
//! [`price`] is a pure function of a catalog entry, the session pricing
//! state and the rule set. Composition order:
//!
//! 1. group factor (neutral `1` when unknown)
//! 2. global multiplier `1 + pct / 100`
//! 3. subscriptions: `base * group * months_multiplier * global`, where an
//!    unlisted length uses `months * 0.95`; everything else:
//!    `base * group * type * classes * pack * global`, with the pack
//!    multiplier only for genuine packages
//! 4. ceiling to the rounding step (never down)
//! 5. card fee `* 1.06`, ceiled again, always last

pub mod affordability;

use crate::core::CatalogEntry;
use crate::rules::{RuleSet, NEUTRAL_FACTOR};
use serde::{Deserialize, Serialize};

/// Card processing surcharge applied to the final price.
pub const CARD_FEE_RATE: f64 = 1.06;

pub const MIN_GLOBAL_PCT: f64 = -99.0;
pub const MAX_GLOBAL_PCT: f64 = 300.0;

pub const DEFAULT_BASE_PRICE: f64 = 50_000.0;
pub const DEFAULT_ROUNDING_STEP: u64 = 1_000;

/// Session pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingState {
    pub base_price: f64,
    /// `0` disables rounding.
    pub rounding_step: u64,
    pub global_pct: f64,
    pub card_fee: bool,
}

impl Default for PricingState {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            rounding_step: DEFAULT_ROUNDING_STEP,
            global_pct: 0.0,
            card_fee: false,
        }
    }
}

impl PricingState {
    /// Clamp every field into its valid range.
    pub fn coerced(self) -> Self {
        Self {
            base_price: coerce_base(self.base_price),
            rounding_step: self.rounding_step,
            global_pct: coerce_pct(self.global_pct),
            card_fee: self.card_fee,
        }
    }

    pub fn global_multiplier(&self) -> f64 {
        1.0 + coerce_pct(self.global_pct) / 100.0
    }
}

fn coerce_base(base: f64) -> f64 {
    if base.is_finite() && base > 0.0 {
        base
    } else {
        0.0
    }
}

/// Non-finite percentages read as `0`; the rest is clamped to [-99, 300].
pub fn coerce_pct(pct: f64) -> f64 {
    if pct.is_finite() {
        pct.clamp(MIN_GLOBAL_PCT, MAX_GLOBAL_PCT)
    } else {
        0.0
    }
}

/// Round up to the next multiple of `step`; `step == 0` leaves the value
/// untouched.
pub fn ceiling_round(value: f64, step: u64) -> f64 {
    if step == 0 {
        return value;
    }
    let step = step as f64;
    (value / step).ceil() * step
}

/// Every factor that went into a price, for explanations and audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub group_factor: f64,
    pub global_multiplier: f64,
    pub basis: PriceBasis,
    pub raw_price: f64,
    pub rounded_price: f64,
    pub card_fee_applied: bool,
    pub final_price: f64,
}

/// The branch a price was computed on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceBasis {
    #[serde(rename_all = "camelCase")]
    Subscription {
        months: u32,
        months_multiplier: f64,
        /// True when `months_mult` had no entry and `months * 0.95` was used
        fallback: bool,
    },
    #[serde(rename_all = "camelCase")]
    PerClass {
        type_key: &'static str,
        type_factor: f64,
        classes: u32,
        pack_multiplier: f64,
    },
}

/// Compute the price of an entry. Total: never fails, never negative.
pub fn price(
    entry: &CatalogEntry,
    base_price: f64,
    rounding_step: u64,
    global_pct: f64,
    rules: &RuleSet,
    card_fee: bool,
) -> f64 {
    breakdown(entry, base_price, rounding_step, global_pct, rules, card_fee).final_price
}

/// [`price`] using a session's pricing state.
pub fn price_with_state(entry: &CatalogEntry, state: &PricingState, rules: &RuleSet) -> f64 {
    price(
        entry,
        state.base_price,
        state.rounding_step,
        state.global_pct,
        rules,
        state.card_fee,
    )
}

/// Full computation with every intermediate factor.
pub fn breakdown(
    entry: &CatalogEntry,
    base_price: f64,
    rounding_step: u64,
    global_pct: f64,
    rules: &RuleSet,
    card_fee: bool,
) -> PriceBreakdown {
    let base_price = coerce_base(base_price);
    let group_factor = rules.group_factor_of(&entry.group);
    let global_multiplier = 1.0 + coerce_pct(global_pct) / 100.0;

    let (basis, raw_price) = if entry.is_subscription() {
        let one_month = base_price * group_factor;
        let listed = rules.months_mult_of(entry.months);
        let months_multiplier = rules.months_multiplier(entry.months);
        (
            PriceBasis::Subscription {
                months: entry.months,
                months_multiplier,
                fallback: listed.is_none(),
            },
            one_month * months_multiplier * global_multiplier,
        )
    } else {
        let type_key = entry.type_label.type_key();
        let type_factor = rules.type_factor_of(type_key);
        let classes = entry.classes.max(1);
        let pack_multiplier = if entry.is_package() {
            rules.pack_discount_of(classes)
        } else {
            NEUTRAL_FACTOR
        };
        (
            PriceBasis::PerClass {
                type_key,
                type_factor,
                classes,
                pack_multiplier,
            },
            base_price
                * group_factor
                * type_factor
                * classes as f64
                * pack_multiplier
                * global_multiplier,
        )
    };

    let raw_price = raw_price.max(0.0);
    let rounded_price = ceiling_round(raw_price, rounding_step);
    let final_price = if card_fee {
        ceiling_round(rounded_price * CARD_FEE_RATE, rounding_step)
    } else {
        rounded_price
    };

    PriceBreakdown {
        base_price,
        group_factor,
        global_multiplier,
        basis,
        raw_price,
        rounded_price,
        card_fee_applied: card_fee,
        final_price,
    }
}

/// Whole currency units for display.
pub fn to_display_units(price: f64) -> u64 {
    if price.is_finite() && price > 0.0 {
        price.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_entry;
    use crate::core::TypeLabel;
    use proptest::prelude::*;

    fn entry(name: &str) -> CatalogEntry {
        parse_entry(name, &RuleSet::default())
    }

    fn default_price(name: &str, card_fee: bool) -> f64 {
        price(&entry(name), 50_000.0, 1_000, 0.0, &RuleSet::default(), card_fee)
    }

    #[test]
    fn test_pack_scenario() {
        assert_eq!(default_price("Sede Personalizado Paquete de 4 clases", false), 200_000.0);
    }

    #[test]
    fn test_trial_scenario_rounds_up() {
        let b = breakdown(
            &entry("Hogar Personalizado Clase de prueba"),
            50_000.0,
            1_000,
            0.0,
            &RuleSet::default(),
            false,
        );
        assert_eq!(b.raw_price, 40_500.0);
        assert_eq!(b.final_price, 41_000.0);
        assert!(matches!(
            b.basis,
            PriceBasis::PerClass { pack_multiplier, classes: 1, .. } if pack_multiplier == 1.0
        ));
    }

    #[test]
    fn test_subscription_scenario_with_card_fee() {
        assert_eq!(default_price("Musigym 3 meses", false), 338_000.0);
        assert_eq!(default_price("Musigym 3 meses", true), 359_000.0);
    }

    #[test]
    fn test_unlisted_months_use_linear_fallback() {
        let b = breakdown(
            &entry("Musigym 5 meses"),
            50_000.0,
            1_000,
            0.0,
            &RuleSet::default(),
            false,
        );
        assert_eq!(
            b.basis,
            PriceBasis::Subscription {
                months: 5,
                months_multiplier: 4.75,
                fallback: true
            }
        );
        assert_eq!(b.final_price, 594_000.0);
    }

    #[test]
    fn test_pack_discount_applies_to_whole_pack() {
        // 50000 * 1.00 * 1.00 * 8 * 0.97
        assert_eq!(default_price("Sede Personalizado Paquete de 8 clases", false), 388_000.0);
        // 50000 * 0.75 * 1.00 * 16 * 0.94
        assert_eq!(default_price("Sede Grupal Paquete de 16 clases", false), 564_000.0);
    }

    #[test]
    fn test_individual_ignores_pack_discount_for_one_class() {
        let mut rules = RuleSet::default();
        rules.pack_discount.insert(1, 0.5);
        let e = entry("Hogar Personalizado Clase individual");
        assert_eq!(e.type_label, TypeLabel::Individual);
        // 50000 * 1.35 * 1.10 = 74250 -> 75000
        assert_eq!(price(&e, 50_000.0, 1_000, 0.0, &rules, false), 75_000.0);
    }

    #[test]
    fn test_float_product_just_above_a_step_rounds_up() {
        let b = breakdown(
            &entry("Sede Personalizado Clase individual"),
            50_000.0,
            1_000,
            0.0,
            &RuleSet::default(),
            false,
        );
        // 50000 * 1.1 is 55000.00000000001 in binary floating point
        assert!(b.raw_price > 55_000.0);
        assert_eq!(b.final_price, 56_000.0);
    }

    #[test]
    fn test_unknown_group_and_type_are_neutral() {
        let e = entry("Afinación de piano");
        assert_eq!(price(&e, 50_000.0, 1_000, 0.0, &RuleSet::default(), false), 50_000.0);
    }

    #[test]
    fn test_other_type_prices_as_single_package() {
        // 50000 * 2.00 * 1 class
        assert_eq!(default_price("Taller empresarial Sesión", false), 100_000.0);
    }

    #[test]
    fn test_zero_rounding_keeps_fractions() {
        let e = entry("Hogar Personalizado Clase de prueba");
        let rules = RuleSet::default();
        assert_eq!(price(&e, 50_000.0, 0, 0.0, &rules, false), 40_500.0);
        assert_eq!(price(&e, 50_000.0, 0, 0.0, &rules, true), 40_500.0 * 1.06);
    }

    #[test]
    fn test_global_adjustment() {
        let e = entry("Sede Personalizado Paquete de 4 clases");
        let rules = RuleSet::default();
        assert_eq!(price(&e, 50_000.0, 500, -15.0, &rules, false), 170_000.0);
    }

    #[test]
    fn test_global_adjustment_is_clamped() {
        let e = entry("Sede Personalizado Clase individual");
        let rules = RuleSet::default();
        let floor = price(&e, 50_000.0, 0, -500.0, &rules, false);
        assert_eq!(floor, price(&e, 50_000.0, 0, -99.0, &rules, false));
        assert!(floor > 0.0);
    }

    #[test]
    fn test_invalid_inputs_degrade_to_zero() {
        let e = entry("Musigym 1 mes");
        let rules = RuleSet::default();
        assert_eq!(price(&e, f64::NAN, 1_000, 0.0, &rules, true), 0.0);
        assert_eq!(price(&e, -10.0, 1_000, 0.0, &rules, false), 0.0);
        assert_eq!(price(&e, 50_000.0, 1_000, f64::INFINITY, &rules, false), 125_000.0);
    }

    #[test]
    fn test_ceiling_round() {
        assert_eq!(ceiling_round(40_500.0, 1_000), 41_000.0);
        assert_eq!(ceiling_round(41_000.0, 1_000), 41_000.0);
        assert_eq!(ceiling_round(0.0, 1_000), 0.0);
        assert_eq!(ceiling_round(12.3, 0), 12.3);
    }

    #[test]
    fn test_to_display_units() {
        assert_eq!(to_display_units(42_930.4), 42_930);
        assert_eq!(to_display_units(f64::NAN), 0);
    }

    fn neutral_rules() -> RuleSet {
        let mut rules = RuleSet::default();
        rules.group_factor.values_mut().for_each(|v| *v = 1.0);
        rules.type_factor.values_mut().for_each(|v| *v = 1.0);
        rules.pack_discount.values_mut().for_each(|v| *v = 1.0);
        rules
    }

    proptest! {
        #[test]
        fn prop_ceiling_round_is_a_floor_guarantee(raw in 0.0f64..1e9, step in 1u64..100_000) {
            let rounded = ceiling_round(raw, step);
            prop_assert!(rounded >= raw);
            prop_assert_eq!(rounded % step as f64, 0.0);
        }

        #[test]
        fn prop_card_fee_applies_last(
            base in 0.0f64..500_000.0,
            step in 0u64..5_000,
            pct in -99.0f64..300.0,
            index in 0usize..63,
        ) {
            let rules = RuleSet::default();
            let e = parse_entry(&rules.service_names[index], &rules);
            let without = price(&e, base, step, pct, &rules, false);
            let with = price(&e, base, step, pct, &rules, true);
            prop_assert_eq!(with, ceiling_round(without * CARD_FEE_RATE, step));
        }

        #[test]
        fn prop_neutral_factors_price_single_class_at_base(
            base in 0.0f64..1_000_000.0,
            step in 0u64..10_000,
            name in prop::sample::select(vec![
                "Sede Personalizado Clase de prueba",
                "Virtual Personalizado Clase individual",
                "Musigym Clase individual",
                "Afinación de piano",
            ]),
        ) {
            let rules = neutral_rules();
            let e = parse_entry(name, &rules);
            prop_assert_eq!(price(&e, base, step, 0.0, &rules, false), ceiling_round(base, step));
        }

        #[test]
        fn prop_price_never_negative(
            base in -1e6f64..1e6,
            step in 0u64..10_000,
            pct in -1000.0f64..1000.0,
            index in 0usize..63,
            card_fee in any::<bool>(),
        ) {
            let rules = RuleSet::default();
            let e = parse_entry(&rules.service_names[index], &rules);
            prop_assert!(price(&e, base, step, pct, &rules, card_fee) >= 0.0);
        }
    }
}
