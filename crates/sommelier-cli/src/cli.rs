//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use sommelier_domain::{PriceBucket, Scale, TasteAxis, TastePreference};
use std::path::PathBuf;

/// Sommelier - wine recommendations from your shop's own stock.
#[derive(Debug, Parser)]
#[command(name = "sommelier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Google Sheets id to read the inventory from
    #[arg(long, global = true, conflicts_with = "inventory_file")]
    pub sheet_id: Option<String>,

    /// Local CSV file to read the inventory from
    #[arg(long, global = true)]
    pub inventory_file: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names or text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask the sommelier for three wines
    Recommend(RecommendArgs),

    /// Preview the stock rows a request would send to the model
    Candidates(CandidatesArgs),

    /// List the loaded inventory
    Inventory(InventoryArgs),

    /// Show or change configuration
    Config(ConfigArgs),

    /// Enter interactive mode
    Repl,
}

/// Arguments for the recommend command.
#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Price range
    #[arg(short, long, value_enum, default_value = "all")]
    pub price: PriceArg,

    #[command(flatten)]
    pub taste: TasteArgs,

    /// Free-text request (e.g. "삼겹살이랑 먹을 와인")
    pub query: Vec<String>,

    /// Print the prompt instead of calling the model
    #[arg(long)]
    pub dry_run: bool,
}

impl RecommendArgs {
    /// Free-text request joined into one string
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Taste sliders, or `--auto` for the sommelier's pick.
#[derive(Debug, Clone, Default, Args)]
pub struct TasteArgs {
    /// Let the sommelier pick popular wines (ignores the sliders)
    #[arg(long, conflicts_with_all = ["body", "sweetness", "acidity", "tannin"])]
    pub auto: bool,

    /// Body, 1 (very light) to 5 (very full)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub body: Option<u8>,

    /// Sweetness, 1 (very dry) to 5 (very sweet)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub sweetness: Option<u8>,

    /// Acidity, 1 (low) to 5 (very high)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub acidity: Option<u8>,

    /// Tannin, 1 (almost none) to 5 (strong)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub tannin: Option<u8>,
}

impl TasteArgs {
    /// Turn the flags into a preference
    ///
    /// No slider flags at all means "no preference". Once any slider is given,
    /// the others sit at their leftmost position.
    pub fn preference(&self) -> TastePreference {
        let sliders = [
            (TasteAxis::Body, self.body),
            (TasteAxis::Sweetness, self.sweetness),
            (TasteAxis::Acidity, self.acidity),
            (TasteAxis::Tannin, self.tannin),
        ];

        if self.auto || sliders.iter().all(|(_, value)| value.is_none()) {
            return TastePreference::NoPreference;
        }

        sliders
            .iter()
            .fold(TastePreference::sliders_at_rest(), |taste, (axis, value)| {
                match value.and_then(Scale::from_position) {
                    Some(scale) => taste.with_axis(*axis, scale),
                    None => taste,
                }
            })
    }
}

/// Arguments for the candidates command.
#[derive(Debug, Args)]
pub struct CandidatesArgs {
    /// Price range
    #[arg(short, long, value_enum, default_value = "all")]
    pub price: PriceArg,
}

/// Arguments for the inventory command.
#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Maximum number of rows to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Read the inventory from a Google Sheets document
    SetSheet {
        /// Spreadsheet id (the long token in the sheet URL)
        id: String,
    },

    /// Read the inventory from a local CSV file
    SetFile {
        /// CSV file path
        path: PathBuf,
    },

    /// Choose the Gemini model
    SetModel {
        /// Model name (e.g. gemini-2.0-flash-exp)
        name: String,
    },
}

/// Price range argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PriceArg {
    /// Any price
    All,
    /// Up to 30,000
    Low,
    /// 30,000 to 70,000
    Mid,
    /// 70,000 to 150,000
    High,
    /// Over 150,000
    Premium,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PriceArg> for PriceBucket {
    fn from(price: PriceArg) -> Self {
        match price {
            PriceArg::All => PriceBucket::All,
            PriceArg::Low => PriceBucket::Low,
            PriceArg::Mid => PriceBucket::Mid,
            PriceArg::High => PriceBucket::High,
            PriceArg::Premium => PriceBucket::Premium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_repl() {
        let cli = Cli::parse_from(["sommelier"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_recommend_command() {
        let cli = Cli::parse_from([
            "sommelier",
            "recommend",
            "--price",
            "mid",
            "--body",
            "4",
            "--tannin",
            "2",
            "생일",
            "선물",
        ]);
        match cli.command {
            Some(Command::Recommend(args)) => {
                assert_eq!(args.price, PriceArg::Mid);
                assert_eq!(args.query_text(), "생일 선물");
                assert!(!args.dry_run);
                assert_eq!(
                    args.taste.preference(),
                    TastePreference::Explicit {
                        body: Scale::High,
                        sweetness: Scale::Lowest,
                        acidity: Scale::Lowest,
                        tannin: Scale::Low,
                    }
                );
            }
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_default_taste_is_no_preference() {
        let cli = Cli::parse_from(["sommelier", "recommend", "--dry-run"]);
        match cli.command {
            Some(Command::Recommend(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.price, PriceArg::All);
                assert_eq!(args.taste.preference(), TastePreference::NoPreference);
            }
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_auto_conflicts_with_sliders() {
        let result = Cli::try_parse_from(["sommelier", "recommend", "--auto", "--body", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_slider_range_is_checked() {
        let result = Cli::try_parse_from(["sommelier", "recommend", "--acidity", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sheet_and_file_conflict() {
        let result = Cli::try_parse_from([
            "sommelier",
            "--sheet-id",
            "abc",
            "--inventory-file",
            "stock.csv",
            "inventory",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sommelier", "inventory", "--limit", "5", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Some(Command::Inventory(args)) => assert_eq!(args.limit, Some(5)),
            _ => panic!("Expected Inventory command"),
        }
    }

    #[test]
    fn test_config_actions() {
        let cli = Cli::parse_from(["sommelier", "config", "set-sheet", "sheet-123"]);
        match cli.command {
            Some(Command::Config(ConfigArgs {
                action: ConfigAction::SetSheet { id },
            })) => assert_eq!(id, "sheet-123"),
            _ => panic!("Expected config set-sheet"),
        }
    }

    #[test]
    fn test_price_conversion() {
        let bucket: PriceBucket = PriceArg::Premium.into();
        assert_eq!(bucket, PriceBucket::Premium);
    }
}
