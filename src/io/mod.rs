pub mod clipboard;
pub mod output;

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Read a whole file, or standard input when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read standard input")?;
        return Ok(contents);
    }
    read_file(path).with_context(|| format!("Failed to read {}", path.display()))
}
