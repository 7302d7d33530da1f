//! Affordability of catalog prices against the SMMLV (Colombian legal
//! monthly minimum wage) reference value.

use crate::core::CatalogEntry;
use serde::{Deserialize, Serialize};

pub const MIN_INSTALLMENTS: u32 = 1;
pub const MAX_INSTALLMENTS: u32 = 12;

/// Which entries the report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordScope {
    /// Only entries passing the active filter
    #[default]
    Shown,
    All,
}

impl AffordScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shown" => Some(Self::Shown),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Persisted affordability preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordSettings {
    /// Reference value as typed by the user, e.g. `"1.423.500"`.
    pub smmlv: String,
    /// Maximum number of monthly installments, 1..=12.
    pub max: u32,
    pub scope: AffordScope,
}

impl Default for AffordSettings {
    fn default() -> Self {
        Self {
            smmlv: "1423500".to_string(),
            max: 6,
            scope: AffordScope::Shown,
        }
    }
}

impl AffordSettings {
    pub fn reference_value(&self) -> u64 {
        parse_reference_value(&self.smmlv)
    }

    pub fn installments(&self) -> u32 {
        clamp_installments(self.max)
    }
}

pub fn clamp_installments(max: u32) -> u32 {
    max.clamp(MIN_INSTALLMENTS, MAX_INSTALLMENTS)
}

/// Read a currency amount typed with any thousands separators.
///
/// A trailing one- or two-digit decimal part (`,50` or `.5`) is dropped;
/// every other non-digit is ignored. Unparseable or empty text reads as `0`.
pub fn parse_reference_value(text: &str) -> u64 {
    let text = text.trim();
    let integral = match text.rfind(['.', ',']) {
        Some(pos) => {
            let tail = &text[pos + 1..];
            if (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit()) {
                &text[..pos]
            } else {
                text
            }
        }
        None => text,
    };
    let digits: String = integral.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityRow {
    pub name: String,
    pub price: u64,
    pub share_of_smmlv: f64,
    pub installments_needed: u32,
    pub monthly_installment: u64,
    pub affordable: bool,
}

/// Why no report could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Unavailable {
    /// SMMLV blank or zero
    MissingReference,
    /// Nothing in scope has a positive price (e.g. base price is zero)
    NoPrices,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AffordabilityReport {
    Unavailable { reason: Unavailable },
    Ready {
        smmlv: u64,
        max: u32,
        rows: Vec<AffordabilityRow>,
    },
}

impl AffordabilityReport {
    pub fn rows(&self) -> &[AffordabilityRow] {
        match self {
            Self::Ready { rows, .. } => rows,
            Self::Unavailable { .. } => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Build the report for already priced entries (prices in whole units).
pub fn affordability(priced: &[(&CatalogEntry, u64)], settings: &AffordSettings) -> AffordabilityReport {
    let smmlv = settings.reference_value();
    if smmlv == 0 {
        return AffordabilityReport::Unavailable {
            reason: Unavailable::MissingReference,
        };
    }
    if priced.iter().all(|(_, price)| *price == 0) {
        return AffordabilityReport::Unavailable {
            reason: Unavailable::NoPrices,
        };
    }

    let max = settings.installments();
    let rows = priced
        .iter()
        .map(|(entry, price)| {
            let installments_needed = price.div_ceil(smmlv).max(1);
            AffordabilityRow {
                name: entry.name.clone(),
                price: *price,
                share_of_smmlv: *price as f64 / smmlv as f64,
                installments_needed: u32::try_from(installments_needed).unwrap_or(u32::MAX),
                monthly_installment: price.div_ceil(u64::from(max)),
                affordable: installments_needed <= u64::from(max),
            }
        })
        .collect();

    AffordabilityReport::Ready { smmlv, max, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_entry;
    use crate::rules::RuleSet;

    #[test]
    fn test_parse_reference_value_formats() {
        assert_eq!(parse_reference_value("1423500"), 1_423_500);
        assert_eq!(parse_reference_value("1.423.500"), 1_423_500);
        assert_eq!(parse_reference_value("$ 1,423,500"), 1_423_500);
        assert_eq!(parse_reference_value("1.423.500,00"), 1_423_500);
        assert_eq!(parse_reference_value(""), 0);
        assert_eq!(parse_reference_value("mínimo"), 0);
    }

    #[test]
    fn test_installments_are_clamped() {
        assert_eq!(clamp_installments(0), 1);
        assert_eq!(clamp_installments(40), 12);
        assert_eq!(clamp_installments(6), 6);
    }

    #[test]
    fn test_missing_reference_is_unavailable() {
        let entry = parse_entry("Musigym 3 meses", &RuleSet::default());
        let settings = AffordSettings {
            smmlv: "  ".into(),
            ..Default::default()
        };
        let report = affordability(&[(&entry, 338_000)], &settings);
        assert_eq!(
            report,
            AffordabilityReport::Unavailable {
                reason: Unavailable::MissingReference
            }
        );
        assert!(report.rows().is_empty());
    }

    #[test]
    fn test_zero_prices_are_unavailable() {
        let entry = parse_entry("Musigym 3 meses", &RuleSet::default());
        let report = affordability(&[(&entry, 0)], &AffordSettings::default());
        assert!(!report.is_available());
    }

    #[test]
    fn test_rows() {
        let rules = RuleSet::default();
        let cheap = parse_entry("Sede Grupal Clase de prueba", &rules);
        let pricey = parse_entry("Musigym 12 meses", &rules);
        let settings = AffordSettings {
            smmlv: "1000000".into(),
            max: 3,
            scope: AffordScope::All,
        };
        let report = affordability(&[(&cheap, 23_000), (&pricey, 3_500_000)], &settings);
        let rows = report.rows();
        assert_eq!(rows[0].installments_needed, 1);
        assert!(rows[0].affordable);
        assert_eq!(rows[0].monthly_installment, 7_667);
        assert_eq!(rows[1].installments_needed, 4);
        assert!(!rows[1].affordable);
        assert_eq!(rows[1].share_of_smmlv, 3.5);
    }
}
