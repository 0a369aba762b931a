//! Command-line interface definitions.
//!
//! Defines the CLI structure for pricescout using `clap`. The CLI prices
//! an item from live marketplace data, re-runs the pricing model over
//! saved listing files, and inspects strategies and configuration.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::Strategy;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resale price recommendations from marketplace listings
#[derive(Parser, Debug)]
#[command(name = "pricescout")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price an item from live marketplace listings
    Price(Box<PriceArgs>),

    /// Price an item from saved listing files
    Evaluate(EvaluateArgs),

    /// Explore available pricing strategies
    #[command(subcommand)]
    Strategies(StrategyCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `pricescout price`.
#[derive(Parser, Debug)]
pub struct PriceArgs {
    /// Search text describing the item
    pub query: String,

    /// Pricing strategy (fast-flip, max-profit) [default: from config]
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Your own shipping cost, subtracted to give the item list price
    #[arg(long, value_name = "AMOUNT")]
    pub shipping: Option<Decimal>,

    /// Skip the LLM relevance filter
    #[arg(long)]
    pub no_filter: bool,

    /// Extra relevance rule passed to the LLM filter
    #[arg(long, value_name = "TEXT")]
    pub constraints: Option<String>,

    /// Log level (overrides config)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `pricescout evaluate`.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// JSON array of active (competing) listings
    #[arg(long, value_name = "FILE")]
    pub active: PathBuf,

    /// JSON array of sold listings
    #[arg(long, value_name = "FILE")]
    pub sold: PathBuf,

    /// Pricing strategy (fast-flip, max-profit)
    #[arg(short, long, default_value_t = Strategy::FastFlip)]
    pub strategy: Strategy,

    /// Your own shipping cost, subtracted to give the item list price
    #[arg(long, value_name = "AMOUNT")]
    pub shipping: Option<Decimal>,
}

/// Subcommands for `pricescout strategies`.
#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    /// List available strategies
    List,
    /// Explain how a strategy picks its price
    Explain {
        /// Strategy name (e.g. fast-flip)
        name: String,
    },
}

/// Subcommands for `pricescout config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file
    Validate(ConfigPathArg),
    /// Display the effective configuration with defaults applied
    Show(ConfigPathArg),
}

/// Configuration file path argument.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_command_defaults() {
        let cli = Cli::try_parse_from(["pricescout", "price", "ps5 controller"]).unwrap();
        let Commands::Price(args) = cli.command else {
            panic!("expected price command");
        };
        assert_eq!(args.query, "ps5 controller");
        assert_eq!(args.strategy, None);
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(!args.no_filter);
        assert!(args.shipping.is_none());
    }

    #[test]
    fn price_command_with_options() {
        let cli = Cli::try_parse_from([
            "pricescout",
            "price",
            "lego 75192",
            "--strategy",
            "max-profit",
            "--shipping",
            "8.50",
            "--no-filter",
            "--constraints",
            "sealed only",
        ])
        .unwrap();
        let Commands::Price(args) = cli.command else {
            panic!("expected price command");
        };
        assert_eq!(args.strategy, Some(Strategy::MaxProfit));
        assert_eq!(args.shipping, Some(dec!(8.50)));
        assert!(args.no_filter);
        assert_eq!(args.constraints.as_deref(), Some("sealed only"));
    }

    #[test]
    fn price_requires_query() {
        assert!(Cli::try_parse_from(["pricescout", "price"]).is_err());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result = Cli::try_parse_from(["pricescout", "price", "x", "--strategy", "yolo"]);
        assert!(result.is_err());
    }

    #[test]
    fn evaluate_command() {
        let cli = Cli::try_parse_from([
            "pricescout",
            "evaluate",
            "--active",
            "active.json",
            "--sold",
            "sold.json",
        ])
        .unwrap();
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate command");
        };
        assert_eq!(args.active, PathBuf::from("active.json"));
        assert_eq!(args.sold, PathBuf::from("sold.json"));
        assert_eq!(args.strategy, Strategy::FastFlip);
    }

    #[test]
    fn evaluate_requires_both_files() {
        let result = Cli::try_parse_from(["pricescout", "evaluate", "--active", "a.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn strategies_explain_requires_name() {
        assert!(Cli::try_parse_from(["pricescout", "strategies", "explain"]).is_err());
        let cli = Cli::try_parse_from(["pricescout", "strategies", "explain", "fast_flip"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Strategies(StrategyCommand::Explain { ref name }) if name == "fast_flip"
        ));
    }

    #[test]
    fn config_commands_take_path() {
        let cli =
            Cli::try_parse_from(["pricescout", "config", "validate", "--config", "alt.toml"]).unwrap();
        let Commands::Config(ConfigCommand::Validate(arg)) = cli.command else {
            panic!("expected config validate");
        };
        assert_eq!(arg.config, PathBuf::from("alt.toml"));
    }

    #[test]
    fn global_flags_after_command() {
        let cli = Cli::try_parse_from([
            "pricescout",
            "strategies",
            "list",
            "--json",
            "--quiet",
            "-vv",
            "--color",
            "never",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["pricescout"]).is_err());
    }
}
