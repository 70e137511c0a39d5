//! `hedged-curl`: race a GET across mirrors and print whichever answers first.
//!
//! Exit status is 0 on success, 152 when every request timed out and 144 when
//! every request failed.

mod cli;
mod env;
mod present;

use std::{io::Write, process::ExitCode};

use clap::{CommandFactory, Parser};
use cli::Cli;
use color_eyre::Result;
use env::resolve_config;
use hedged_curl::{HedgedClient, Outcome, Target};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hedged_curl=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli::shows_usage(std::env::args_os().len()) {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let cli = Cli::parse();

    let cfg = resolve_config(cli.time)?;
    let mut client = HedgedClient::http(cfg);
    if cli.fail {
        client = client.require_success_status();
    }

    let targets = cli.urls.into_iter().map(Target::from);
    let outcome = client.dispatch_default(targets).await;

    match &outcome {
        Outcome::Success(winner) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(present::render(&winner.response).as_bytes())?;
            stdout.flush()?;
        }
        Outcome::TimedOut { .. } => eprintln!("{}", present::TIMEOUT_MESSAGE),
        Outcome::AllFailed { .. } => eprintln!("{}", present::FAILURE_MESSAGE),
    }

    Ok(ExitCode::from(outcome.exit_code()))
}
