use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use flat_prices::{config, init_tracing};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    if matches!(command, cli::Commands::Version) {
        println!("flat-prices v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = config::load_config(args.config.as_deref())?;

    // The dashboard owns the terminal, so it only logs to a file
    let interactive = matches!(command, cli::Commands::Dashboard);
    let _log_guard = init_tracing(&cfg.logging, interactive);

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Dashboard => commands::dashboard::execute(&cfg)?,
        cli::Commands::Predict(predict_args) => commands::predict::execute(&cfg, &predict_args)?,
        cli::Commands::Check => commands::check::execute(&cfg)?,
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg)?,
        },
        cli::Commands::Version => {}
    }

    Ok(())
}
