use serde::{Deserialize, Serialize};
use std::fmt;

/// Offering type, as shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeLabel {
    Prueba,
    Individual,
    Pack,
    Mes,
    Otro,
}

impl TypeLabel {
    pub const ALL: [TypeLabel; 5] = [
        TypeLabel::Prueba,
        TypeLabel::Individual,
        TypeLabel::Pack,
        TypeLabel::Mes,
        TypeLabel::Otro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prueba => "Prueba",
            Self::Individual => "Individual",
            Self::Pack => "Pack",
            Self::Mes => "Mes",
            Self::Otro => "Otro",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(wanted))
    }

    /// Key into `RuleSet::type_factor` for per-class pricing.
    ///
    /// Only trial and individual classes have their own key; every other
    /// label is priced as a package.
    pub fn type_key(&self) -> &'static str {
        match self {
            Self::Prueba => "Clase de prueba",
            Self::Individual => "Clase individual",
            _ => "Paquete",
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse category used for filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Modality {
    Sede,
    Hogar,
    Virtual,
    Musigym,
    Online,
    Ensambles,
    Taller,
    Curso,
    #[default]
    #[serde(rename = "")]
    Unclassified,
}

impl Modality {
    pub const ALL: [Modality; 8] = [
        Modality::Sede,
        Modality::Hogar,
        Modality::Virtual,
        Modality::Musigym,
        Modality::Online,
        Modality::Ensambles,
        Modality::Taller,
        Modality::Curso,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sede => "Sede",
            Self::Hogar => "Hogar",
            Self::Virtual => "Virtual",
            Self::Musigym => "Musigym",
            Self::Online => "Online",
            Self::Ensambles => "Ensambles",
            Self::Taller => "Taller",
            Self::Curso => "Curso",
            Self::Unclassified => "",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured catalog offering, derived from a service name.
///
/// Entries are value objects: they are rebuilt from the rule set whenever it
/// changes and never persisted on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    /// Matched group key, or empty when no group pattern matched.
    pub group: String,
    pub modality: Modality,
    pub type_label: TypeLabel,
    pub classes: u32,
    pub months: u32,
    #[serde(rename = "_search")]
    pub search: String,
}

impl CatalogEntry {
    pub fn has_group(&self) -> bool {
        !self.group.is_empty()
    }

    pub fn is_subscription(&self) -> bool {
        self.type_label == TypeLabel::Mes && self.months > 0
    }

    /// Whether pack discounts apply: a Pack entry, or any name mentioning
    /// "paquete". Trial and individual classes never count as packages.
    pub fn is_package(&self) -> bool {
        match self.type_label {
            TypeLabel::Prueba | TypeLabel::Individual => false,
            TypeLabel::Pack => true,
            TypeLabel::Mes | TypeLabel::Otro => self.search.contains("paquete"),
        }
    }
}
