//! Folio CLI: publish-safe export of a private career repository.
//!
//! Turns annotated project narratives and a profile record into sanitized,
//! voice-normalized JSON payloads, and lints them before they go public.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
