//! Results client for the remote results and chart pages
//!
//! Fetches HTML from `{origin}/api/results` and `{origin}/api/chart`, scrapes
//! it through a [`ResultParser`], and keeps the last live copy of each in a
//! [`CacheManager`]. When a page cannot be fetched or parsed, the fetcher
//! answers with simulated data instead of an error.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::parser::{MarkupParser, ParseError, ResultParser};
use super::simulate::{Simulator, CHART_DELAY, RESULTS_DELAY};
use super::{ChartRow, ResultMap, Sourced};
use crate::cache::{CacheManager, DEFAULT_FRESHNESS_MINUTES};
use crate::clock::{Clock, Zone};

/// Origin used when none is configured
pub const DEFAULT_ORIGIN: &str = "http://localhost:8888";

/// Path of the results page, relative to the origin
const RESULTS_PATH: &str = "/api/results";

/// Path of the monthly chart page, relative to the origin
const CHART_PATH: &str = "/api/chart";

/// Default per-request timeout
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Page could not be scraped
    #[error("Failed to parse page: {0}")]
    Parse(#[from] ParseError),
}

/// Retrieves page bodies as text
#[async_trait]
pub trait Transport: Send + Sync {
    /// GETs `url` and returns the body; non-2xx statuses are errors
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Settings for the results client
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Scheme and host the pages are served from, without a trailing slash
    pub origin: String,
    /// How long a live fetch is served from cache
    pub freshness: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Artificial latency of simulated results
    pub results_delay: Duration,
    /// Artificial latency of a simulated chart
    pub chart_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            freshness: Duration::from_secs(DEFAULT_FRESHNESS_MINUTES as u64 * 60),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            results_delay: RESULTS_DELAY,
            chart_delay: CHART_DELAY,
        }
    }
}

impl FetchConfig {
    pub fn results_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), RESULTS_PATH)
    }

    pub fn chart_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), CHART_PATH)
    }
}

/// Client for the results and chart pages
///
/// Owns its cache; one instance per board session.
pub struct ResultFetcher {
    transport: Arc<dyn Transport>,
    parser: Arc<dyn ResultParser>,
    cache: CacheManager,
    simulator: Simulator,
    clock: Arc<dyn Clock>,
    zone: Zone,
    results_url: String,
    chart_url: String,
}

impl ResultFetcher {
    /// Creates a fetcher that talks HTTP and scrapes the site's markup
    pub fn new(
        config: &FetchConfig,
        clock: Arc<dyn Clock>,
        zone: Zone,
    ) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.request_timeout)?;
        Ok(Self::with_parts(
            config,
            Arc::new(transport),
            Arc::new(MarkupParser),
            clock,
            zone,
        ))
    }

    /// Creates a fetcher from explicit collaborators
    pub fn with_parts(
        config: &FetchConfig,
        transport: Arc<dyn Transport>,
        parser: Arc<dyn ResultParser>,
        clock: Arc<dyn Clock>,
        zone: Zone,
    ) -> Self {
        let freshness = chrono::Duration::from_std(config.freshness)
            .unwrap_or_else(|_| chrono::Duration::minutes(DEFAULT_FRESHNESS_MINUTES));

        Self {
            transport,
            parser,
            cache: CacheManager::new(freshness, clock.clone()),
            simulator: Simulator::new(config.results_delay, config.chart_delay),
            clock,
            zone,
            results_url: config.results_url(),
            chart_url: config.chart_url(),
        }
    }

    /// The cache backing this fetcher
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Current results for every game on the results page
    ///
    /// # Behavior
    /// - Returns the cached copy while it is inside the freshness window
    /// - Otherwise fetches and parses the results page and caches the result
    /// - On any fetch or parse failure, returns simulated results (not cached)
    pub async fn get_results(&mut self) -> Sourced<ResultMap> {
        if let Some(cached) = self.cache.read_results() {
            if !cached.is_expired {
                debug!(cached_at = %cached.cached_at, "Serving results from cache");
                return Sourced::live(cached.data);
            }
        }

        match self.fetch_results().await {
            Ok(results) => {
                info!(games = results.len(), "Fetched live results");
                self.cache.write_results(results.clone());
                Sourced::live(results)
            }
            Err(e) => {
                warn!(error = %e, url = %self.results_url, "Results unavailable, using simulation");
                Sourced::simulated(self.simulate_results().await)
            }
        }
    }

    /// Current month's chart
    ///
    /// Same cache, fetch and fallback behavior as [`get_results`](Self::get_results).
    pub async fn get_monthly_chart(&mut self) -> Sourced<Vec<ChartRow>> {
        if let Some(cached) = self.cache.read_chart() {
            if !cached.is_expired {
                debug!(cached_at = %cached.cached_at, "Serving chart from cache");
                return Sourced::live(cached.data);
            }
        }

        match self.fetch_chart().await {
            Ok(rows) => {
                info!(days = rows.len(), "Fetched live chart");
                self.cache.write_chart(rows.clone());
                Sourced::live(rows)
            }
            Err(e) => {
                warn!(error = %e, url = %self.chart_url, "Chart unavailable, using simulation");
                Sourced::simulated(self.simulate_chart().await)
            }
        }
    }

    /// Simulated results for the whole catalog
    pub async fn simulate_results(&self) -> ResultMap {
        self.simulator.results().await
    }

    /// Simulated chart for the current month in the display zone
    pub async fn simulate_chart(&self) -> Vec<ChartRow> {
        let today = self.zone.date_of(self.clock.now());
        self.simulator.chart(today).await
    }

    async fn fetch_results(&self) -> Result<ResultMap, FetchError> {
        let html = self.transport.get_text(&self.results_url).await?;
        Ok(self.parser.parse_results(&html)?)
    }

    async fn fetch_chart(&self) -> Result<Vec<ChartRow>, FetchError> {
        let html = self.transport.get_text(&self.chart_url).await?;
        Ok(self.parser.parse_chart(&html)?)
    }
}
