// MIT License
// Copyright (c) 2024 Graham King

use std::io;
use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

mod db;
mod error;
mod populate;
mod source;
mod tag;

// Both relative to wherever we are run from. There are no flags, arguments are ignored.
const SOURCE_NAME: &str = "messages.yaml";
const DB_NAME: &str = "demotivation.db";

fn main() -> anyhow::Result<()> {
    // Diagnostics only, set RUST_LOG to see them. Operator output goes to stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)?;

    let mut stdout = io::stdout();
    match populate::run(Path::new(SOURCE_NAME), Path::new(DB_NAME), &mut stdout) {
        Ok(report) => {
            tracing::info!(
                inserted = report.inserted,
                failed = report.failed,
                motivational = report.summary.motivational,
                demotivational = report.summary.demotivational,
                "populate finished"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(%err, "populate failed");
            println!("Error: {err}");
            process::exit(1);
        }
    }
}
