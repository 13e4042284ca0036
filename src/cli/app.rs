use super::commands::{CheckCommands, EditCommands, ShowCommands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "propsheet")]
#[command(about = "Build, check and edit property sheets defined in TOML")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a sheet as plain text
    Show(ShowCommands),
    /// Report validation errors; exits with status 1 when there are any
    Check(CheckCommands),
    /// Edit a sheet interactively and print the resulting values
    Edit(EditCommands),
}

impl Commands {
    /// The interactive editor owns the terminal, so its logs go to a file
    pub fn uses_terminal(&self) -> bool {
        matches!(self, Commands::Edit(_))
    }
}
