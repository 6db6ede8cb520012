// src/bin/trieshell.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;
use std::io;
use std::sync::Arc;
use trieshell::{
    cli::{Cli, shell::Shell, terminal_logger::TerminalLogger},
    system::config,
    t,
};

/// The main entry point of the `trieshell` application.
/// It sets up logging, parses arguments, runs the requested mode
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Loads the config, builds the shell and runs one of its three modes:
/// a single line (`-c`), a suggestion query (`--suggest`) or the interactive loop.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let config_path = config::resolve_config_path(cli.config.as_deref())?;
    let config = config::load_config(&config_path)?;
    log::debug!("Using config {:?}", config);

    let terminal = Arc::new(TerminalLogger::new(config.logger.min_severity, config.logger.enabled));
    let shell = Shell::new(&config, terminal, &[])?;

    let mut stdout = io::stdout().lock();

    if let Some(partial) = cli.suggest {
        shell.print_suggestions(&partial, &mut stdout)?;
        return Ok(());
    }

    if let Some(line) = cli.command {
        let outcome = shell.console().execute(&line);
        if !outcome.is_matched() {
            return Err(anyhow!(t!("cli.error.not_executed"), line = line.trim()));
        }
        return Ok(());
    }

    shell.run(io::stdin().lock(), &mut stdout)?;
    Ok(())
}
