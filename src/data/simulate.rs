//! Simulated results used when the remote pages are unavailable
//!
//! The generators are plain functions over an `Rng` and a date so they can be
//! checked deterministically; [`Simulator`] wraps them with an artificial
//! latency that mimics a network round-trip.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use std::time::Duration;

use super::{all_games, ChartRow, GameResult, ResultMap, SENTINEL};

/// Chance that a game has no result for today yet
const PENDING_PROBABILITY: f64 = 0.3;

/// Latency before simulated results resolve
pub const RESULTS_DELAY: Duration = Duration::from_millis(500);

/// Latency before a simulated chart resolves
pub const CHART_DELAY: Duration = Duration::from_millis(300);

/// Produces simulated data after an advisory delay
#[derive(Debug, Clone)]
pub struct Simulator {
    results_delay: Duration,
    chart_delay: Duration,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(RESULTS_DELAY, CHART_DELAY)
    }
}

impl Simulator {
    pub fn new(results_delay: Duration, chart_delay: Duration) -> Self {
        Self {
            results_delay,
            chart_delay,
        }
    }

    /// A simulator that resolves immediately
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Simulated results for every game in the catalog
    pub async fn results(&self) -> ResultMap {
        pause(self.results_delay).await;
        simulate_results(&mut rand::thread_rng())
    }

    /// Simulated chart for the month containing `today`
    pub async fn chart(&self, today: NaiveDate) -> Vec<ChartRow> {
        pause(self.chart_delay).await;
        simulate_chart(today, &mut rand::thread_rng())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// A zero-padded number in 00..=99
fn random_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:02}", rng.gen_range(0..100u8))
}

/// One entry per catalog game; today is pending with probability 0.3
pub fn simulate_results<R: Rng + ?Sized>(rng: &mut R) -> ResultMap {
    all_games()
        .iter()
        .map(|game| {
            let today = if rng.gen_bool(PENDING_PROBABILITY) {
                SENTINEL.to_string()
            } else {
                random_number(rng)
            };
            let result = GameResult {
                name: game.name.to_string(),
                today,
                yesterday: random_number(rng),
            };
            (game.id.to_string(), result)
        })
        .collect()
}

/// One row per day of `today`'s month
///
/// Days before yesterday get four numbers; yesterday onwards stays pending.
pub fn simulate_chart<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<ChartRow> {
    let yesterday = today.day().saturating_sub(1);

    (1..=days_in_month(today))
        .map(|day| {
            let values: Vec<String> = if day < yesterday {
                (0..4).map(|_| random_number(rng)).collect()
            } else {
                Vec::new()
            };
            ChartRow::from_values(day, &values)
        })
        .collect()
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (next_month, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(first)) => (next - first).num_days() as u32,
        _ => 31,
    }
}
