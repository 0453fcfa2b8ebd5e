//! CheckForge command-line entry point.

mod cli;
mod commands;
mod error;

use checkforge_core::PersistenceError;
use checkforge_core::store::FileStore;
use checkforge_render::ResvgRasterizer;
use clap::Parser;
use cli::{Cli, Command};
use error::AppResult;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

fn open_store(dir: Option<std::path::PathBuf>) -> Result<FileStore, PersistenceError> {
    match dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location(),
    }
}

fn run(cli: Cli) -> AppResult<ExitCode> {
    let store = Arc::new(open_store(cli.store)?);
    log::debug!("Using store at {}", store.base_path().display());
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Export { fields, layout, out: out_dir } => {
            commands::export(store, ResvgRasterizer::new(), &fields, layout.as_deref(), &out_dir, &mut out)?;
        }
        Command::Verify { query } => {
            if !commands::verify(store, &query, &mut out)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Layout { action } => commands::layout(store, action, &mut out)?,
        Command::Stats => commands::stats(store, &mut out)?,
        Command::Cleanup { days } => commands::cleanup(store, days, &mut out)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting CheckForge");

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
