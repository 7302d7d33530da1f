//! Command handlers, one module per subcommand.

pub mod afford;
pub mod init;
pub mod prices;
pub mod quote;
pub mod rules;
pub mod state;

use crate::cli::Cli;
use crate::config::{load_config, load_config_from, resolve_store_dir, AppConfig};
use crate::formatting::{ColoredFormatter, FormattingConfig};
use crate::rules::RuleSet;
use crate::session::Session;
use crate::storage::{load_state, save_state, FileStore, Preferences, StateOrigin, StoredState};
use anyhow::{Context, Result};
use tracing::info;

/// Everything a command needs besides its own arguments.
pub struct AppContext {
    pub config: AppConfig,
    pub store: FileStore,
    pub formatting: FormattingConfig,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_config(),
        };
        let store = FileStore::new(resolve_store_dir(cli.store_dir.as_deref(), &config));
        let formatting = if cli.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env(config.display.color)
        };
        Ok(Self {
            config,
            store,
            formatting,
        })
    }

    pub fn formatter(&self) -> ColoredFormatter {
        ColoredFormatter::new(self.formatting)
    }

    pub fn use_color(&self) -> bool {
        self.formatting.color.should_use_color()
    }

    /// State used when nothing has been saved yet.
    pub fn fallback_state(&self) -> StoredState {
        StoredState::from_parts(
            &self.config.pricing.to_state(),
            &Preferences::default(),
            &RuleSet::default(),
        )
    }

    pub fn load_session(&self) -> Session {
        let loaded = load_state(&self.store, &self.fallback_state());
        if loaded.origin == StateOrigin::Migrated {
            info!(dir = %self.store.dir().display(), "Upgraded saved state to the current format");
        }
        Session::from_stored(&loaded.state)
    }

    pub fn save_session(&self, session: &Session) -> bool {
        save_state(&self.store, &session.snapshot())
    }
}
