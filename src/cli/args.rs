use crate::catalog::SortKey;
use crate::config::OutputFormat;
use crate::core::RuleSection;
use crate::pricing::affordability::AffordScope;
use crate::storage::ViewMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tarifario")]
#[command(about = "Rule-driven price list for the Musicala service catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the saved state
    #[arg(long, global = true, env = "TARIFARIO_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .tarifario.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Plain output (no colors, no emoji)
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the catalog with prices
    ///
    /// Overrides, filters and layout flags apply to this run only. Pass
    /// --save to keep them for later runs.
    Prices {
        /// Base price of one standard class
        #[arg(long)]
        base: Option<f64>,

        /// Round prices up to a multiple of this step (0 disables)
        #[arg(long)]
        rounding: Option<u64>,

        /// Global adjustment in percent, -99 to 300
        #[arg(long, allow_hyphen_values = true)]
        adjust: Option<f64>,

        /// Add the 6% card surcharge
        #[arg(long, conflicts_with = "no_card_fee")]
        card_fee: bool,

        /// Remove the card surcharge
        #[arg(long)]
        no_card_fee: bool,

        /// Text search over service names (accents and case ignored)
        #[arg(short, long)]
        query: Option<String>,

        /// Only this modality (Sede, Hogar, Virtual, ...)
        #[arg(long)]
        modality: Option<String>,

        /// Only this type (Prueba, Individual, Pack, Mes, Otro)
        #[arg(long = "type")]
        type_label: Option<String>,

        /// Only this group
        #[arg(long)]
        group: Option<String>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Reverse the sort order
        #[arg(long)]
        desc: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Terminal layout
        #[arg(long, value_enum)]
        view: Option<ViewArg>,

        /// Only names and prices
        #[arg(long)]
        compact: bool,

        /// Copies include only the filtered rows
        #[arg(long, conflicts_with = "all_rows")]
        only_visible: bool,

        /// Copies include the whole catalog
        #[arg(long)]
        all_rows: bool,

        /// Copy the price list to the clipboard
        #[arg(long)]
        copy: bool,

        /// Remember pricing overrides, filters and layout (otherwise they last one run)
        #[arg(long)]
        save: bool,
    },

    /// Price any service name and show how the price was built
    Quote {
        /// Service name, e.g. "Hogar Personalizado Paquete de 8 clases"
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or edit pricing rules
    Rules {
        #[command(subcommand)]
        action: RulesCommand,
    },

    /// Check prices against the legal monthly minimum wage (SMMLV)
    ///
    /// Settings given here apply to this run only unless --save is passed.
    Afford {
        /// SMMLV reference value, any thousands separators
        #[arg(long)]
        smmlv: Option<String>,

        /// Maximum monthly installments, 1 to 12
        #[arg(long)]
        max: Option<u32>,

        /// Filtered services or the whole catalog
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Remember these settings
        #[arg(long)]
        save: bool,
    },

    /// Inspect the saved state
    State {
        #[command(subcommand)]
        action: StateCommand,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Print every rule section
    Show,

    /// Print one section in its editable text format
    Export {
        #[arg(long, value_enum)]
        section: SectionArg,
    },

    /// Replace rule sections from text files (`-` reads stdin)
    ///
    /// A file without any valid line leaves its section as it was.
    Edit {
        #[arg(long, value_name = "FILE")]
        groups: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        types: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        packs: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        months: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        services: Option<PathBuf>,
    },

    /// Restore the built-in rules
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum StateCommand {
    /// Print the saved state as JSON
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Terminal,
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Terminal => OutputFormat::Terminal,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Table,
    Cards,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Table => ViewMode::Table,
            ViewArg::Cards => ViewMode::Cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Catalog,
    Name,
    Group,
    Price,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Catalog => SortKey::Catalog,
            SortArg::Name => SortKey::Name,
            SortArg::Group => SortKey::Group,
            SortArg::Price => SortKey::Price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Shown,
    All,
}

impl From<ScopeArg> for AffordScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Shown => AffordScope::Shown,
            ScopeArg::All => AffordScope::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Group,
    Type,
    Pack,
    Months,
    Services,
}

impl From<SectionArg> for RuleSection {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Group => RuleSection::Group,
            SectionArg::Type => RuleSection::Type,
            SectionArg::Pack => RuleSection::Pack,
            SectionArg::Months => RuleSection::Months,
            SectionArg::Services => RuleSection::Services,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
