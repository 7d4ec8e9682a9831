use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use log::Level;

mod cli;
mod commands;
mod init;
mod logger;

use cli::{Cli, SubCommand};
use init::initialize_app;
use logger::configure_logger;

fn main() -> Result<ExitCode, Error> {
    let opts: Cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match opts.subcmd {
        SubCommand::Canonicalize(cmd) => {
            // Bot token is not needed
            configure_logger(opts.log_level.unwrap_or(Level::Warn));
            cmd.execute(&mut stdout)?;
        },
        subcmd => {
            let config = initialize_app(opts.log_level)?;
            match subcmd {
                SubCommand::Verify(cmd) => {
                    if !cmd.execute(&config, &mut stdout)? {
                        return Ok(ExitCode::FAILURE);
                    };
                },
                SubCommand::Sign(cmd) => cmd.execute(&config, &mut stdout)?,
                SubCommand::Canonicalize(_) => unreachable!(),
            };
        },
    };
    Ok(ExitCode::SUCCESS)
}
