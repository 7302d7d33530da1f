//! Catalog: parsing service names into structured entries, building the
//! full catalog from a rule set, and filtering it for display.

pub mod builder;
pub mod filter;
pub mod parser;

pub use builder::build_catalog;
pub use filter::{sort_entries, CatalogFilter, SortKey};
pub use parser::parse_entry;
