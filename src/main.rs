use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

mod cli;

use cli::Cli;
use cli::app::Commands;
use cli::commands::{check_command, edit_command, show_command};

const LOG_FILE: &str = "propsheet.log";

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if cli.command.uses_terminal() {
        // Log to file (truncate on each run) so output never lands on the editor screen
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    info!("Starting propsheet");

    match cli.command {
        Commands::Show(args) => show_command(args)?,
        Commands::Check(args) => {
            if !check_command(args)? {
                std::process::exit(1);
            }
        }
        Commands::Edit(args) => edit_command(args)?,
    }

    Ok(())
}
