//! Races the same GET across several mirrors and reports which one answered.
//!
//! Mirrors come from the command line, or from `MIRROR_URLS`
//! (comma-separated) when none are given. Each round is repeated a few times
//! to show how the winner shifts with latency.

use std::{env, time::Instant};

use hedged_curl::{HedgeConfig, HedgedClient, Outcome, Target};

const ROUNDS: usize = 5;

fn mirrors_from_env() -> Vec<String> {
    env::var("MIRROR_URLS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut mirrors: Vec<String> = env::args().skip(1).collect();
    if mirrors.is_empty() {
        mirrors = mirrors_from_env();
    }

    if mirrors.is_empty() {
        eprintln!("No mirrors configured.");
        eprintln!("Pass URLs as arguments or set MIRROR_URLS=url1,url2,...");
        return Ok(());
    }

    let client = HedgedClient::http(HedgeConfig::from_secs(5)?).require_success_status();
    let targets: Vec<Target> = mirrors.iter().map(Target::new).collect();

    for round in 0..ROUNDS {
        let start = Instant::now();
        let outcome = client.dispatch_default(targets.clone()).await;
        let elapsed = start.elapsed();

        match outcome {
            Outcome::Success(winner) => println!(
                "[round {round}] OK   winner={} status={} bytes={} latency={elapsed:?}",
                winner.target,
                winner.response.status,
                winner.response.body.len(),
            ),
            Outcome::TimedOut { budget } => {
                println!("[round {round}] TIMEOUT after {budget:?}")
            }
            Outcome::AllFailed { attempts } => {
                println!("[round {round}] FAILED all {attempts} mirrors, latency={elapsed:?}")
            }
        }
    }

    Ok(())
}
