//! Cutover CLI - reconcile RF extracts against HOS extracts.

mod cli;
mod commands;

use clap::Parser;
use cli::{Action, Cli};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command.action() {
        Action::Reconcile { family, files } => commands::reconcile::run(
            family,
            files,
            commands::reconcile::RunOptions {
                countries: cli.countries.clone(),
                config: cli.config.clone(),
                output: cli.output.clone(),
                json: cli.json,
                verbose: cli.verbose,
            },
        ),
        Action::ListCountries => commands::countries::run(cli.config.as_deref(), cli.json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

// Log level comes from RUST_LOG; --verbose raises the default to debug
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,cutover=debug,cutover_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
