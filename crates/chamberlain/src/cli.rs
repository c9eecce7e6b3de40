//! Clap derive structures for the `chamberlain` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// chamberlain -- bridge a MyQ garage door opener
#[derive(Debug, Parser)]
#[command(
    name = "chamberlain",
    version,
    about = "Bridge a MyQ garage door opener as a smart-home accessory",
    long_about = "Keeps a bridged garage door accessory in step with a MyQ device.\n\n\
        The door is polled every 2s while it moves and every 10s once it has settled.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'c', env = "CHAMBERLAIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Host the accessory and keep it in sync until interrupted
    Run,

    /// Read the door position once and print it
    Status,

    /// Ask the door to open, without waiting for it to move
    Open,

    /// Ask the door to close, without waiting for it to move
    Close,
}
