//! Core data models for the results board
//!
//! This module contains the game catalog, the result and chart types that flow
//! from the fetcher to the board, and the fetching pipeline itself.

pub mod catalog;
pub mod fetcher;
pub mod parser;
pub mod simulate;

pub use catalog::{all_games, get_game_by_id};
pub use fetcher::{FetchConfig, FetchError, HttpTransport, ResultFetcher, Transport};
pub use parser::{MarkupParser, ParseError, ResultParser};
pub use simulate::Simulator;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown while a game has no result yet
pub const SENTINEL: &str = "XX";

/// Returns true when `value` is the "no result yet" marker
pub fn is_pending(value: &str) -> bool {
    value == SENTINEL
}

/// A game in the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameDescriptor {
    /// Short code, also the id of the game's row on the page
    pub id: &'static str,
    /// Human-readable name of the game
    pub name: &'static str,
}

/// Today's and yesterday's numbers for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub name: String,
    pub today: String,
    pub yesterday: String,
}

/// Results keyed by game id
pub type ResultMap = BTreeMap<String, GameResult>;

/// One day of the monthly chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Day of month
    pub date: u32,
    pub desawar: String,
    pub faridabad: String,
    pub ghaziabad: String,
    pub gali: String,
}

impl ChartRow {
    /// Column headings, in the order the values appear on the page
    pub const COLUMNS: [&'static str; 4] = ["DSWR", "FRBD", "GZBD", "GALI"];

    /// Builds a row from up to four ordered values, padding with the sentinel
    pub fn from_values(date: u32, values: &[String]) -> Self {
        let value = |i: usize| {
            values
                .get(i)
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| SENTINEL.to_string())
        };
        Self {
            date,
            desawar: value(0),
            faridabad: value(1),
            ghaziabad: value(2),
            gali: value(3),
        }
    }

    /// The four values in page order
    pub fn values(&self) -> [&str; 4] {
        [&self.desawar, &self.faridabad, &self.ghaziabad, &self.gali]
    }
}

/// Where a payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// Parsed from the remote page, possibly served from cache
    Live,
    /// Generated locally because the remote page was unavailable
    Simulated,
}

/// A payload tagged with its [`Source`]
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: Source::Live,
        }
    }

    pub fn simulated(data: T) -> Self {
        Self {
            data,
            source: Source::Simulated,
        }
    }

    pub fn is_simulated(&self) -> bool {
        self.source == Source::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_row_pads_missing_values_with_sentinel() {
        let row = ChartRow::from_values(7, &["12".to_string(), String::new()]);

        assert_eq!(row.date, 7);
        assert_eq!(row.values(), ["12", "XX", "XX", "XX"]);
    }

    #[test]
    fn test_chart_row_ignores_extra_values() {
        let values = ["01", "02", "03", "04", "05"].map(String::from);
        let row = ChartRow::from_values(1, &values);

        assert_eq!(row.values(), ["01", "02", "03", "04"]);
    }

    #[test]
    fn test_is_pending() {
        assert!(is_pending("XX"));
        assert!(!is_pending("00"));
        assert!(!is_pending("xx"));
    }

    #[test]
    fn test_sourced_tags() {
        assert!(Sourced::simulated(()).is_simulated());
        assert!(!Sourced::live(()).is_simulated());
    }

    #[test]
    fn test_game_result_serializes_with_field_names() {
        let result = GameResult {
            name: "GALI".to_string(),
            today: "XX".to_string(),
            yesterday: "09".to_string(),
        };

        let json = serde_json::to_string(&result).expect("Failed to serialize GameResult");

        assert_eq!(json, r#"{"name":"GALI","today":"XX","yesterday":"09"}"#);
    }
}
