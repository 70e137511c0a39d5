//! Environment configuration for the round budget.

use std::env;

use color_eyre::{eyre::WrapErr, Result};
use hedged_curl::{HedgeConfig, DEFAULT_REQUEST_BUDGET_SECS};

/// Environment variable overriding the default round budget, in seconds.
pub const BUDGET_ENV: &str = "HEDGED_CURL_TIME";

/// Reads the budget from [`BUDGET_ENV`].
///
/// Returns `None` if the environment variable is not set.
pub fn budget_from_env() -> Result<Option<u64>> {
    budget_from_var(env::var(BUDGET_ENV))
}

fn budget_from_var(var: Result<String, env::VarError>) -> Result<Option<u64>> {
    match var {
        Ok(raw) => parse_budget(&raw).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).wrap_err_with(|| format!("{BUDGET_ENV} is not valid unicode")),
    }
}

fn parse_budget(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .wrap_err_with(|| format!("{BUDGET_ENV} must be a whole number of seconds, got {raw:?}"))
}

/// Builds the hedging configuration.
///
/// The `-t/--time` flag wins over [`BUDGET_ENV`], which wins over the default
/// of 15 seconds. Returns an error for a zero budget.
pub fn resolve_config(flag: Option<u64>) -> Result<HedgeConfig> {
    let secs = match flag {
        Some(secs) => secs,
        None => budget_from_env()?.unwrap_or(DEFAULT_REQUEST_BUDGET_SECS),
    };

    HedgeConfig::from_secs(secs).wrap_err("invalid request budget")
}
