// Test utility module for tarifario integration tests
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tarifario::{parse_entry, CatalogEntry, RuleSet};

/// Parse a name against the built-in rules.
pub fn entry(name: &str) -> CatalogEntry {
    parse_entry(name, &RuleSet::default())
}

/// The binary, isolated from the user's environment: state lives in
/// `store`, the working directory is `store` too (no stray config file),
/// and colors are off.
pub fn tarifario(store: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tarifario"));
    cmd.current_dir(store)
        .env(tarifario::config::STORE_DIR_ENV, store)
        .env("NO_COLOR", "1")
        .env_remove("TARIFARIO_LOG")
        .env_remove("CLICOLOR_FORCE");
    cmd
}
