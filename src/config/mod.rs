//! Application configuration (`.tarifario.toml`).
//!
//! ```toml
//! [pricing]
//! base = 50000
//! rounding = 1000
//! global_pct = 0
//! card_fee = false
//!
//! [storage]
//! dir = "~/.local/share/tarifario"
//!
//! [display]
//! color = "auto"
//! format = "terminal"
//! ```
//!
//! Every key is optional. The `[pricing]` values seed a fresh session only;
//! once state has been saved the stored values win.

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_config, resolve_store_dir,
    CONFIG_FILE_NAME, STORE_DIR_ENV,
};

use crate::formatting::ColorMode;
use crate::pricing::{PricingState, DEFAULT_BASE_PRICE, DEFAULT_ROUNDING_STEP};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Defaults for a session with nothing persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_base")]
    pub base: f64,
    #[serde(default = "default_rounding")]
    pub rounding: u64,
    #[serde(default)]
    pub global_pct: f64,
    #[serde(default)]
    pub card_fee: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            rounding: default_rounding(),
            global_pct: 0.0,
            card_fee: false,
        }
    }
}

fn default_base() -> f64 {
    DEFAULT_BASE_PRICE
}

fn default_rounding() -> u64 {
    DEFAULT_ROUNDING_STEP
}

impl PricingConfig {
    pub fn to_state(&self) -> PricingState {
        PricingState {
            base_price: self.base,
            rounding_step: self.rounding,
            global_pct: self.global_pct,
            card_fee: self.card_fee,
        }
        .coerced()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the state files
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Output format of listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub color: ColorMode,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Commented starting point written by `tarifario init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Tarifario configuration

[pricing]
# Price of one standard class
base = 50000
# Prices are rounded up to a multiple of this step (0 disables rounding)
rounding = 1000
# Adjustment applied to every price, in percent (-99 to 300)
global_pct = 0
# Add the 6% card surcharge
card_fee = false

[storage]
# dir = "/path/to/state"

[display]
# auto, always or never
color = "auto"
# terminal, markdown or json
format = "terminal"
"#;
