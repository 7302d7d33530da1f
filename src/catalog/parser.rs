//! Catalog entry parser.
//!
//! Turns a free-text service name into a [`CatalogEntry`]. Classification is
//! a set of ordered rule tables evaluated against the normalized name; the
//! order of each table is part of the contract because reordering changes
//! results:
//!
//! 1. **Type** ([`TYPE_RULES`]), first match wins: `clase de prueba` →
//!    Prueba, `clase individual` → Individual, `paquete de` → Pack, a bare
//!    `mes`/`meses` token → Mes, otherwise Otro.
//! 2. **Group**: rule-set group keys, longest first, by normalized substring;
//!    then the fixed prefix table [`GROUP_FALLBACKS`], first match wins.
//! 3. **Modality** ([`MODALITY_RULES`]), every rule is checked and the last
//!    match wins.
//!
//! Parsing is total: anything unrecognized degrades to `Otro` with no group,
//! no classes and no months.

use crate::core::{collapse_whitespace, normalize_text, CatalogEntry, Modality, TypeLabel};
use crate::rules::RuleSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Type classification, in precedence order.
pub static TYPE_RULES: Lazy<Vec<(Regex, TypeLabel)>> = Lazy::new(|| {
    vec![
        (re(r"clase de prueba"), TypeLabel::Prueba),
        (re(r"clase individual"), TypeLabel::Individual),
        (re(r"paquete de"), TypeLabel::Pack),
        (re(r"\bmes(?:es)?\b"), TypeLabel::Mes),
    ]
});

/// Canonical group prefixes, used when no rule-set key matches.
pub static GROUP_FALLBACKS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (re(r"^sede personalizad"), "Sede Personalizado"),
        (re(r"^musifamiliar sede grupal"), "Musifamiliar Sede Grupal"),
        (re(r"^sede grupal"), "Sede Grupal"),
        (re(r"^ensamble"), "Ensambles"),
        (re(r"^hogar personalizad"), "Hogar Personalizado"),
        (re(r"^hogar musifamiliar grupal"), "Hogar Musifamiliar Grupal"),
        (re(r"^virtual personalizad"), "Virtual Personalizado"),
        (re(r"^virtual grupal"), "Virtual Grupal"),
        (re(r"^musigym"), "Musigym"),
        (re(r"^plataforma online"), "Plataforma Online"),
        (re(r"^curso preuniversitario"), "Curso Preuniversitario"),
        (re(r"^curso de formacion"), "Curso de formación"),
        (re(r"^curso vacacional"), "Curso Vacacional"),
        (re(r"^taller empresarial"), "Taller empresarial"),
    ]
});

/// Modality checks in evaluation order. All are evaluated; last match wins.
pub static MODALITY_RULES: Lazy<Vec<(Regex, Modality)>> = Lazy::new(|| {
    vec![
        (re(r"\bsede\b"), Modality::Sede),
        (re(r"^hogar\b"), Modality::Hogar),
        (re(r"^virtual\b"), Modality::Virtual),
        (re(r"\bmusigym\b"), Modality::Musigym),
        (re(r"\bonline\b|^plataforma\b"), Modality::Online),
        (re(r"^ensamble"), Modality::Ensambles),
        (re(r"^taller\b"), Modality::Taller),
        (re(r"^curso\b"), Modality::Curso),
    ]
});

// Display-name rewrites for known variant spellings
static NAME_VARIANTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (re(r"(?i)\bclase\s+individual\b"), "Clase individual"),
        (re(r"(?i)\bclase\s+de\s+prueba\b"), "Clase de prueba"),
    ]
});

static PACK_CLASSES: Lazy<Regex> = Lazy::new(|| re(r"paquete de (\d+) clases?\b"));
static MONTHS: Lazy<Regex> = Lazy::new(|| re(r"(\d+)\s*mes(?:es)?\b"));

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

/// Parse a service name against a rule set.
pub fn parse_entry(name: &str, rules: &RuleSet) -> CatalogEntry {
    let name = normalize_display_name(name);
    let search = normalize_text(&name);

    let type_label = classify_type(&search);
    let (classes, months) = match type_label {
        TypeLabel::Prueba | TypeLabel::Individual => (1, 0),
        TypeLabel::Pack => (capture_number(&PACK_CLASSES, &search), 0),
        TypeLabel::Mes => (0, capture_number(&MONTHS, &search)),
        TypeLabel::Otro => (0, 0),
    };

    CatalogEntry {
        group: match_group(&search, rules),
        modality: classify_modality(&search),
        type_label,
        classes,
        months,
        name,
        search,
    }
}

/// Trim, collapse whitespace and fix known variant capitalizations.
pub fn normalize_display_name(name: &str) -> String {
    NAME_VARIANTS
        .iter()
        .fold(collapse_whitespace(name), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

pub fn classify_type(search: &str) -> TypeLabel {
    TYPE_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(search))
        .map_or(TypeLabel::Otro, |(_, label)| *label)
}

/// Most specific rule-set key contained in the name, else the first
/// canonical prefix that matches, else empty.
pub fn match_group(search: &str, rules: &RuleSet) -> String {
    rules
        .groups_by_specificity()
        .into_iter()
        .find(|key| {
            let key = normalize_text(key);
            !key.is_empty() && search.contains(&key)
        })
        .or_else(|| {
            GROUP_FALLBACKS
                .iter()
                .find(|(pattern, _)| pattern.is_match(search))
                .map(|(_, group)| *group)
        })
        .unwrap_or_default()
        .to_string()
}

pub fn classify_modality(search: &str) -> Modality {
    MODALITY_RULES
        .iter()
        .filter(|(pattern, _)| pattern.is_match(search))
        .last()
        .map_or(Modality::Unclassified, |(_, modality)| *modality)
}

fn capture_number(pattern: &Regex, search: &str) -> u32 {
    pattern
        .captures(search)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
