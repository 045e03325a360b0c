//! Command-line interface for Larder.

use clap::{Parser, Subcommand};

/// Larder - Personal recipe tracker
/// Keeps a household recipe catalogue and who has cooked what
#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (the default when no command is given)
    #[command(alias = "-s", alias = "--serve")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
