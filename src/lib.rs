// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod pricing;
pub mod rules;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{CatalogEntry, Error, Modality, Result, RuleSection, TypeLabel};

pub use crate::catalog::{build_catalog, parse_entry, CatalogFilter, SortKey};
pub use crate::pricing::{
    breakdown, ceiling_round, price, price_with_state, PriceBasis, PriceBreakdown, PricingState,
};
pub use crate::rules::{normalize, RuleSet};
pub use crate::session::{ConfigEdits, Session};
pub use crate::storage::{
    load_state, migrate, save_state, FileStore, KeyValueStore, MemoryStore, StoredState,
    StoredStateV1,
};
