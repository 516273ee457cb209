//! Command handlers

pub mod init;
pub mod version;

use anyhow::Result;

use crate::cli::Cli;

/// Dispatch on the parsed flags; `--version` wins over everything else
pub async fn run(cli: Cli) -> Result<()> {
    if cli.version {
        return version::run(cli.verbose);
    }
    init::run(&cli).await
}
