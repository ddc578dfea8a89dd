//! Command-line interface parsing for the results board
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the validated configuration the fetcher and refresh loop run with.

use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::data::fetcher::DEFAULT_ORIGIN;
use crate::data::FetchConfig;
use crate::refresh::RefreshConfig;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The origin is not an http(s) URL
    #[error("Invalid origin: '{0}'. Expected an http:// or https:// URL")]
    InvalidOrigin(String),

    /// A refresh interval of zero would spin
    #[error("Refresh interval must be at least one second")]
    ZeroInterval,

    /// Every request would time out immediately
    #[error("Request timeout must be at least one second")]
    ZeroTimeout,

    /// The freshness window does not fit a calendar duration
    #[error("Freshness window of {0} seconds is too long")]
    FreshnessTooLong(u64),
}

/// Results board - live game results and monthly chart in the terminal
#[derive(Parser, Debug)]
#[command(name = "resultboard")]
#[command(about = "Live game results and monthly chart, refreshed in the background")]
#[command(version)]
pub struct Cli {
    /// Origin serving /api/results and /api/chart
    #[arg(long, value_name = "URL", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Seed the board from an existing HTML page
    #[arg(long, value_name = "FILE")]
    pub page: Option<PathBuf>,

    /// Write the board as HTML after every refresh
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seconds between the end of one refresh and the start of the next
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub interval: u64,

    /// Seconds a live fetch is served from cache
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub fresh_for: u64,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Skip the artificial latency of simulated data
    #[arg(long)]
    pub no_delay: bool,

    /// Run a single refresh, print the board and exit
    #[arg(long)]
    pub once: bool,

    /// With --once, print the board as JSON
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Log file for the interactive board
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub fetch: FetchConfig,
    pub refresh: RefreshConfig,
    /// Page to seed the board from
    pub page: Option<PathBuf>,
    /// Snapshot path written after each refresh
    pub output: Option<PathBuf>,
    /// Run one cycle and exit
    pub once: bool,
    /// Print JSON instead of text in one-shot mode
    pub json: bool,
    pub log_file: Option<PathBuf>,
}

/// Validates an origin and strips any trailing slash
///
/// # Returns
/// * `Ok(String)` with the normalised origin
/// * `Err(CliError::InvalidOrigin)` if it is not an http(s) URL
pub fn parse_origin(s: &str) -> Result<String, CliError> {
    let url = Url::parse(s).map_err(|_| CliError::InvalidOrigin(s.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(CliError::InvalidOrigin(s.to_string()));
    }
    Ok(s.trim_end_matches('/').to_string())
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the origin, interval, timeout or freshness is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.interval == 0 {
            return Err(CliError::ZeroInterval);
        }
        if cli.timeout == 0 {
            return Err(CliError::ZeroTimeout);
        }
        let freshness = Duration::from_secs(cli.fresh_for);
        if chrono::Duration::from_std(freshness).is_err() {
            return Err(CliError::FreshnessTooLong(cli.fresh_for));
        }

        let mut fetch = FetchConfig {
            origin: parse_origin(&cli.origin)?,
            freshness,
            request_timeout: Duration::from_secs(cli.timeout),
            ..FetchConfig::default()
        };
        if cli.no_delay {
            fetch.results_delay = Duration::ZERO;
            fetch.chart_delay = Duration::ZERO;
        }

        let interval = Duration::from_secs(cli.interval);
        let refresh = RefreshConfig {
            interval,
            // a cycle must finish before the next one is due
            cycle_timeout: RefreshConfig::default().cycle_timeout.min(interval),
            enabled: true,
        };

        Ok(StartupConfig {
            fetch,
            refresh,
            page: cli.page.clone(),
            output: cli.output.clone(),
            once: cli.once,
            json: cli.json,
            log_file: cli.log_file.clone(),
        })
    }
}
