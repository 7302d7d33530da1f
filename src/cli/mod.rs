//! CLI module for tarifario
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

pub use args::{
    Cli, Commands, FormatArg, RulesCommand, ScopeArg, SectionArg, SortArg, StateCommand, ViewArg,
};
pub use setup::init_logging;

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
