use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pricescout::adapter::inbound::cli::command::{
    Cli, ColorChoice, Commands, ConfigCommand, StrategyCommand,
};
use pricescout::adapter::inbound::cli::output::{self, OutputConfig};
use pricescout::adapter::inbound::cli::{config, diagnostic, evaluate, price, strategy};
use pricescout::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let color = use_color(cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, color));
    if !color {
        let _ = miette::set_hook(Box::new(|_| {
            Box::new(miette::MietteHandlerOpts::new().color(false).build())
        }));
    }

    let config_path = config_path(&cli.command);
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            diagnostic::emit(&err, config_path.as_deref());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Price(args) => price::execute(&args).await,
        Commands::Evaluate(args) => evaluate::execute(&args),
        Commands::Strategies(StrategyCommand::List) => strategy::list(),
        Commands::Strategies(StrategyCommand::Explain { name }) => strategy::explain(&name),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
    }
}

/// Config file read by `command`, if any.
fn config_path(command: &Commands) -> Option<PathBuf> {
    match command {
        Commands::Price(args) => Some(args.config.clone()),
        Commands::Config(ConfigCommand::Validate(arg) | ConfigCommand::Show(arg)) => {
            Some(arg.config.clone())
        }
        Commands::Evaluate(_) | Commands::Strategies(_) => None,
    }
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}
