//! Command-line arguments.

use clap::Parser;

/// Race identical GET requests to several URLs and print the first response.
#[derive(Debug, Parser)]
#[command(name = "hedged-curl", version, about)]
pub struct Cli {
    /// Timeout for all HTTP requests, in seconds [default: $HEDGED_CURL_TIME or 15]
    #[arg(short = 't', long = "time", value_name = "SECONDS")]
    pub time: Option<u64>,

    /// Only accept 2xx responses
    #[arg(short = 'f', long)]
    pub fail: bool,

    /// Endpoints serving the same content
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,
}

/// Usage is printed only for a bare invocation with no arguments at all.
///
/// Flags without URLs still run a round, which ends as all-failed.
pub fn shows_usage(argc: usize) -> bool {
    argc <= 1
}
