use clap::Parser;
use log::Level;

use crate::commands::{
    login::{Canonicalize, Sign, Verify},
};

/// Telegram login data verification tool
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Overrides log level set in config file
    #[arg(long)]
    pub log_level: Option<Level>,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    Verify(Verify),
    Canonicalize(Canonicalize),
    Sign(Sign),
}
