//! End-to-end pricing scenarios over the built-in rules.

mod common;

use common::entry;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tarifario::pricing::CARD_FEE_RATE;
use tarifario::{build_catalog, ceiling_round, price, PricingState, RuleSet, Session};

fn default_price(name: &str) -> f64 {
    price(&entry(name), 50_000.0, 1_000, 0.0, &RuleSet::default(), false)
}

#[test]
fn test_reference_prices() {
    let cases = [
        ("Sede Personalizado Paquete de 4 clases", 200_000.0),
        ("Hogar Personalizado Clase de prueba", 41_000.0),
        ("Musigym 3 meses", 338_000.0),
        ("Virtual Grupal Paquete de 12 clases", 371_000.0),
        ("Hogar Personalizado Clase individual", 75_000.0),
        ("Ensambles 6 meses", 168_000.0),
        ("Curso de formación 1 mes", 45_000.0),
        ("Musifamiliar Sede Grupal Clase de prueba", 26_000.0),
        ("Virtual Personalizado Clase individual", 47_000.0),
    ];
    for (name, expected) in cases {
        assert_eq!(default_price(name), expected, "{name}");
    }
}

#[test]
fn test_card_fee_is_applied_after_rounding() {
    let rules = RuleSet::default();
    let cases = [
        ("Sede Personalizado Paquete de 4 clases", 212_000.0),
        ("Hogar Personalizado Clase de prueba", 44_000.0),
        ("Musigym 3 meses", 359_000.0),
        ("Sede Personalizado Paquete de 8 clases", 412_000.0),
        ("Musigym 5 meses", 630_000.0),
    ];
    for (name, expected) in cases {
        assert_eq!(
            price(&entry(name), 50_000.0, 1_000, 0.0, &rules, true),
            expected,
            "{name}"
        );
    }
}

#[test]
fn test_session_price_of_matches_engine() {
    let mut session = Session::default();
    session.set_pricing(PricingState {
        rounding_step: 500,
        global_pct: -15.0,
        ..PricingState::default()
    });
    let pack = session
        .catalog()
        .iter()
        .find(|e| e.name == "Sede Personalizado Paquete de 4 clases")
        .unwrap();
    assert_eq!(session.price_of(pack), 170_000);
}

#[test]
fn test_every_default_entry_has_a_positive_rounded_price() {
    let rules = RuleSet::default();
    for e in build_catalog(&rules) {
        let p = price(&e, 50_000.0, 1_000, 0.0, &rules, false);
        assert!(p > 0.0, "{}", e.name);
        assert_eq!(p % 1_000.0, 0.0, "{}", e.name);
    }
}

proptest! {
    #[test]
    fn prop_card_fee_ordering_holds_for_the_whole_catalog(
        base in 1_000.0f64..200_000.0,
        step in prop::sample::select(vec![0u64, 100, 500, 1_000, 5_000]),
    ) {
        let rules = RuleSet::default();
        for e in build_catalog(&rules) {
            let plain = price(&e, base, step, 0.0, &rules, false);
            let with_fee = price(&e, base, step, 0.0, &rules, true);
            prop_assert_eq!(with_fee, ceiling_round(plain * CARD_FEE_RATE, step));
        }
    }
}
