//! gs-init - scaffold a go-spring server project
//!
//! Clones the skeleton template, fills in the module and package names and
//! leaves the result in a directory named after the module.

mod cli;
mod commands;
mod logging;
mod output;
mod version;

use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::parse_exit_code(&e));
        }
    };

    logging::init_tracing(&cli.log_config());

    if let Err(e) = commands::run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(-1);
    }
}
