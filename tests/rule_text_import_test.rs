//! Rule text import and export.

use indoc::indoc;
use pretty_assertions::assert_eq;
use tarifario::rules::text_format::{parse_named_mapping, parse_numeric_mapping, parse_service_list};
use tarifario::{ConfigEdits, Error, RuleSection, RuleSet, Session};

#[test]
fn test_exported_sections_import_back() {
    let rules = RuleSet::default();
    let mut session = Session::default();
    let edits = ConfigEdits {
        groups: rules.export_section(RuleSection::Group),
        types: rules.export_section(RuleSection::Type),
        packs: rules.export_section(RuleSection::Pack),
        months: rules.export_section(RuleSection::Months),
        services: rules.export_section(RuleSection::Services),
    };
    assert_eq!(session.apply_config_edits(&edits).unwrap(), &rules);
}

#[test]
fn test_comments_and_bad_lines_are_skipped() {
    let text = indoc! {"
        # group multipliers
        // temporary
        Sede Personalizado = 1.1
        Musigym: 2.75

        Hogar Personalizado = mucho
        = 3
        Virtual Grupal 0.6
    "};
    let mapping = parse_named_mapping(text);
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["Sede Personalizado"], 1.1);
    assert_eq!(mapping["Musigym"], 2.75);
}

#[test]
fn test_numeric_keys_must_be_positive_integers() {
    let mapping = parse_numeric_mapping(indoc! {"
        4 = 1
        8 = 0.97
        0 = 0.5
        -2 = 0.5
        doce = 0.9
    "});
    assert_eq!(mapping.keys().copied().collect::<Vec<_>>(), vec![4, 8]);
}

#[test]
fn test_service_list_dedupes_by_normalized_text() {
    let names = parse_service_list(indoc! {"
          Curso de formación 1 mes
        curso de formacion 1 mes

        Musigym 1 mes
    "});
    assert_eq!(names, vec!["Curso de formación 1 mes", "Musigym 1 mes"]);
}

#[test]
fn test_partial_edit_applies_and_prices_follow() {
    let mut session = Session::default();
    let edits = ConfigEdits {
        groups: "Hogar Personalizado = 1.5\nbroken line".into(),
        ..Default::default()
    };
    session.apply_config_edits(&edits).unwrap();
    let trial = session
        .catalog()
        .iter()
        .find(|e| e.name == "Hogar Personalizado Clase de prueba")
        .unwrap();
    // 50000 * 1.5 * 0.60 = 45000
    assert_eq!(session.price_of(trial), 45_000);
    // Groups missing from the edit are gone and now read as neutral
    assert_eq!(session.rules().group_factor.len(), 1);
}

#[test]
fn test_section_without_valid_lines_keeps_current_rules() {
    let mut session = Session::default();
    let rules = session
        .apply_config_edits(&ConfigEdits {
            groups: "Sede Personalizado = 1.2".into(),
            packs: "# only comments\n\n// here".into(),
            types: "nothing useful".into(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(rules.group_factor_of("Sede Personalizado"), 1.2);
    assert_eq!(rules.type_factor, RuleSet::default().type_factor);
    assert_eq!(rules.pack_discount, RuleSet::default().pack_discount);
}

#[test]
fn test_edit_with_no_usable_section_is_rejected() {
    let mut session = Session::default();
    let err = session
        .apply_config_edits(&ConfigEdits {
            packs: "# only comments\n\n// here".into(),
            types: "nothing useful".into(),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidRuleText {
            section: RuleSection::Type
        }
    ));
    assert_eq!(session.rules(), &RuleSet::default());
}
