use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".tarifario.toml";
pub const STORE_DIR_ENV: &str = "TARIFARIO_STORE_DIR";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config file contents.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str::<AppConfig>(contents).map_err(|e| {
        Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })
}

fn try_load_config_from_path(config_path: &Path) -> Option<AppConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` of them.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load an explicitly named config file. Unlike discovery, a missing or
/// broken file is an error here.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system_with_source("Cannot read config file", path, e))?;
    parse_config(&contents)
}

/// Find `.tarifario.toml` in the working directory or its ancestors.
pub fn load_config() -> AppConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return AppConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AppConfig::default()
        })
}

/// Store directory: explicit override (flag or env), then the config file,
/// then the platform data directory, then `./.tarifario`.
pub fn resolve_store_dir(explicit: Option<&Path>, config: &AppConfig) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.storage.dir.clone())
        .or_else(|| dirs::data_dir().map(|dir| dir.join("tarifario")))
        .unwrap_or_else(|| PathBuf::from(".tarifario"))
}
