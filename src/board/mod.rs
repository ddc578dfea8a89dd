//! The displayed results board
//!
//! A [`Board`] is the document the update loop renders into: one row per game
//! with today's and yesterday's cells, one line per chart day with four cells,
//! and a "last updated" stamp. It can be laid out from the catalog or read
//! from an existing page (see [`page`]), and written back out as HTML.

pub mod page;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

use crate::clock::Zone;
use crate::data::simulate::days_in_month;
use crate::data::{all_games, is_pending, ChartRow, ResultMap, Source, SENTINEL};

/// A single displayed number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    /// Set once the cell has been overwritten by a render
    pub fresh: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fresh: false,
        }
    }

    pub fn pending() -> Self {
        Self::new(SENTINEL)
    }

    /// Overwrites the cell unless `value` is the sentinel; returns whether it did
    fn update(&mut self, value: &str) -> bool {
        if is_pending(value) {
            return false;
        }
        self.text = value.to_string();
        self.fresh = true;
        true
    }
}

/// A game's row; cells missing from the page stay `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub name: String,
    pub today: Option<Cell>,
    pub yesterday: Option<Cell>,
}

/// One day of the displayed chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLine {
    /// Day label as displayed
    pub day: String,
    pub cells: Vec<Cell>,
}

/// The "last updated" display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastUpdated {
    /// Human-readable time, e.g. "05 March 2026, 14:07:09 IST"
    pub display: String,
    /// RFC 3339 UTC time with milliseconds
    pub datetime: String,
}

impl LastUpdated {
    pub fn at(now: DateTime<Utc>, zone: &Zone) -> Self {
        let local = now.with_timezone(&zone.offset);
        Self {
            display: format!("{} {}", local.format("%d %B %Y, %H:%M:%S"), zone.label),
            datetime: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// The displayed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    pub rows: Vec<ResultRow>,
    pub chart: Vec<ChartLine>,
    /// `None` when the page has no last-updated element
    pub last_updated: Option<LastUpdated>,
    /// Whether the page has a last-updated element to stamp
    pub has_stamp: bool,
    /// Source of the last results rendered
    pub results_source: Option<Source>,
    /// Source of the last chart rendered
    pub chart_source: Option<Source>,
    /// First day of the month the chart lines were laid out for; `None` for
    /// pages with a fixed chart
    pub chart_month: Option<NaiveDate>,
}

impl Board {
    /// Lays out every catalog game and every day of `today`'s month, all pending
    pub fn from_catalog(today: NaiveDate) -> Self {
        let rows = all_games()
            .iter()
            .map(|game| ResultRow {
                id: game.id.to_string(),
                name: game.name.to_string(),
                today: Some(Cell::pending()),
                yesterday: Some(Cell::pending()),
            })
            .collect();

        Self {
            rows,
            chart: chart_lines(today),
            chart_month: Some(first_of_month(today)),
            has_stamp: true,
            ..Self::default()
        }
    }

    /// Row for a game id
    pub fn row(&self, id: &str) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Writes results into the matching rows
    ///
    /// Ids without a row and cells the row lacks are skipped. Sentinel values
    /// leave the displayed number alone. Returns the number of cells written.
    pub fn render_results(&mut self, results: &ResultMap) -> usize {
        let mut written = 0;
        for (id, result) in results {
            let Some(row) = self.rows.iter_mut().find(|row| &row.id == id) else {
                continue;
            };
            if let Some(cell) = row.today.as_mut() {
                written += usize::from(cell.update(&result.today));
            }
            if let Some(cell) = row.yesterday.as_mut() {
                written += usize::from(cell.update(&result.yesterday));
            }
        }
        written
    }

    /// Writes chart rows into chart lines by position
    ///
    /// Lines with fewer than four cells are skipped, as are rows beyond the
    /// last line. Returns the number of cells written.
    pub fn render_chart(&mut self, rows: &[ChartRow]) -> usize {
        let mut written = 0;
        for (line, row) in self.chart.iter_mut().zip(rows) {
            if line.cells.len() < ChartRow::COLUMNS.len() {
                continue;
            }
            for (cell, value) in line.cells.iter_mut().zip(row.values()) {
                written += usize::from(cell.update(value));
            }
        }
        written
    }

    /// Lays the chart out again, all pending, once `today` is in a new month
    ///
    /// Boards with a fixed chart are left alone. Returns whether the chart
    /// was rebuilt.
    pub fn roll_month(&mut self, today: NaiveDate) -> bool {
        let month = first_of_month(today);
        match self.chart_month {
            Some(current) if current != month => {
                self.chart = chart_lines(today);
                self.chart_month = Some(month);
                true
            }
            _ => false,
        }
    }

    /// Updates the last-updated display, if the board has one
    pub fn stamp(&mut self, now: DateTime<Utc>, zone: &Zone) {
        if self.has_stamp {
            self.last_updated = Some(LastUpdated::at(now, zone));
        }
    }

    /// Number of cells currently marked fresh
    pub fn fresh_cells(&self) -> usize {
        let row_cells = self
            .rows
            .iter()
            .flat_map(|row| [row.today.as_ref(), row.yesterday.as_ref()])
            .flatten();
        let chart_cells = self.chart.iter().flat_map(|line| line.cells.iter());
        row_cells.chain(chart_cells).filter(|cell| cell.fresh).count()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// One pending line per day of `today`'s month
fn chart_lines(today: NaiveDate) -> Vec<ChartLine> {
    (1..=days_in_month(today))
        .map(|day| ChartLine {
            day: format!("{:02}", day),
            cells: (0..ChartRow::COLUMNS.len()).map(|_| Cell::pending()).collect(),
        })
        .collect()
}

fn cell_text(cell: Option<&Cell>) -> &str {
    cell.map(|c| c.text.as_str()).unwrap_or("--")
}

fn source_label(source: Option<Source>) -> &'static str {
    match source {
        Some(Source::Live) => "live",
        Some(Source::Simulated) => "simulated",
        None => "not loaded",
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last_updated {
            Some(stamp) => writeln!(f, "Updated: {}", stamp.display)?,
            None => writeln!(f, "Updated: never")?,
        }
        writeln!(f, "Results ({})", source_label(self.results_source))?;
        writeln!(f, "{:<4} {:<24} {:>9} {:>5}", "ID", "GAME", "YESTERDAY", "TODAY")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<4} {:<24} {:>9} {:>5}",
                row.id,
                row.name,
                cell_text(row.yesterday.as_ref()),
                cell_text(row.today.as_ref())
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Chart ({})", source_label(self.chart_source))?;
        write!(f, "{:<4}", "DAY")?;
        for column in ChartRow::COLUMNS {
            write!(f, " {:>4}", column)?;
        }
        writeln!(f)?;
        for line in &self.chart {
            write!(f, "{:<4}", line.day)?;
            for cell in &line.cells {
                write!(f, " {:>4}", cell.text)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
