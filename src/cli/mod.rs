// CLI module for running the server and administrative operations

pub mod migrate;

use clap::{Parser, Subcommand};

/// Inventory backend CLI
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(about = "Server-rendered inventory management", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Migrate the database and start the HTTP server (default)
    Serve,

    /// Run pending database migrations and exit
    Migrate,
}

impl Cli {
    /// The command to run, `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
