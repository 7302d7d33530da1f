pub mod errors;
pub mod text;
pub mod types;

pub use errors::{Error, Result, RuleSection};
pub use text::{collapse_whitespace, normalize_text};
pub use types::{CatalogEntry, Modality, TypeLabel};
