//! Reading a board from, and writing it back to, an HTML page
//!
//! Uses the same class and id vocabulary as the remote results pages, so a
//! saved snapshot can seed the next session with `--page`.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::fmt::Write as _;

use super::{Board, Cell, ChartLine, LastUpdated, ResultRow};
use crate::data::parser::{element_text, first_text, selector, selectors, ParseError};

/// Class marking a cell written by the update loop
pub const FRESH_CLASS: &str = "real-time-update";

impl Board {
    /// Reads the board out of an existing page
    ///
    /// Result rows need an `id`; cells missing from a row stay absent so later
    /// renders skip them. The page is stampable only if it has a
    /// `#last-updated` element.
    pub fn from_html(html: &str) -> Result<Self, ParseError> {
        let document = Html::parse_document(html);
        let row_sel = selector(selectors::RESULT_ROW)?;
        let name_sel = selector(selectors::GAME_NAME)?;
        let today_sel = selector(selectors::TODAY)?;
        let yesterday_sel = selector(selectors::YESTERDAY)?;
        let line_sel = selector(selectors::CHART_ROW)?;
        let day_sel = selector(selectors::DAY)?;
        let number_sel = selector(selectors::NUMBER)?;
        let stamp_sel = selector(selectors::LAST_UPDATED)?;
        let time_sel = selector("time")?;
        let chart_sel = selector(selectors::CHART)?;

        let rows = document
            .select(&row_sel)
            .filter_map(|row| {
                let id = row.value().attr("id").filter(|id| !id.is_empty())?;
                Some(ResultRow {
                    id: id.to_string(),
                    name: first_text(row, &name_sel).unwrap_or_default(),
                    today: first_cell(row, &today_sel),
                    yesterday: first_cell(row, &yesterday_sel),
                })
            })
            .collect();

        let chart = document
            .select(&line_sel)
            .map(|line| ChartLine {
                day: first_text(line, &day_sel).unwrap_or_default(),
                cells: line.select(&number_sel).map(read_cell).collect(),
            })
            .collect();

        let chart_month = document
            .select(&chart_sel)
            .next()
            .and_then(|table| table.value().attr("data-month"))
            .and_then(parse_month);

        let stamp_element = document.select(&stamp_sel).next();
        let last_updated = stamp_element
            .and_then(|element| element.select(&time_sel).next())
            .and_then(|time| {
                Some(LastUpdated {
                    display: element_text(time),
                    datetime: time.value().attr("datetime")?.to_string(),
                })
            });

        Ok(Self {
            rows,
            chart,
            last_updated,
            has_stamp: stamp_element.is_some(),
            results_source: None,
            chart_source: None,
            chart_month,
        })
    }

    /// Writes the board as a standalone page
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n<title>Results Board</title>\n</head>\n<body>\n");

        if self.has_stamp {
            match &self.last_updated {
                Some(stamp) => {
                    let _ = writeln!(
                        html,
                        "<p id=\"last-updated\">Updated: <time datetime=\"{}\">{}</time></p>",
                        escape(&stamp.datetime),
                        escape(&stamp.display)
                    );
                }
                None => html.push_str("<p id=\"last-updated\"></p>\n"),
            }
        }

        html.push_str("<section id=\"results\">\n");
        for row in &self.rows {
            let _ = write!(
                html,
                "<div class=\"game-result\" id=\"{}\"><div class=\"game-name\">{}</div>",
                escape(&row.id),
                escape(&row.name)
            );
            if let Some(cell) = &row.today {
                let _ = write!(html, "<div class=\"today-number\">{}</div>", heading(cell));
            }
            if let Some(cell) = &row.yesterday {
                let _ = write!(html, "<div class=\"yesterday-number\">{}</div>", heading(cell));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");

        match self.chart_month {
            Some(month) => {
                let _ = writeln!(
                    html,
                    "<table id=\"mix-chart\" data-month=\"{}\">",
                    month.format("%Y-%m")
                );
            }
            None => html.push_str("<table id=\"mix-chart\">\n"),
        }
        for line in &self.chart {
            let _ = write!(
                html,
                "<tr class=\"day-number\"><td class=\"day\">{}</td>",
                escape(&line.day)
            );
            for cell in &line.cells {
                let class = if cell.fresh {
                    format!("number {}", FRESH_CLASS)
                } else {
                    "number".to_string()
                };
                let _ = write!(html, "<td class=\"{}\">{}</td>", class, escape(&cell.text));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n</body>\n</html>\n");

        html
    }
}

/// Reads a `YYYY-MM` month as its first day
fn parse_month(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").ok()
}

fn read_cell(element: ElementRef<'_>) -> Cell {
    let fresh = element.value().classes().any(|class| class == FRESH_CLASS);
    Cell {
        text: element_text(element),
        fresh,
    }
}

fn first_cell(row: ElementRef<'_>, sel: &Selector) -> Option<Cell> {
    row.select(sel).next().map(read_cell)
}

fn heading(cell: &Cell) -> String {
    if cell.fresh {
        format!("<h3 class=\"{}\">{}</h3>", FRESH_CLASS, escape(&cell.text))
    } else {
        format!("<h3>{}</h3>", escape(&cell.text))
    }
}

/// Escapes text for use in element content and quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
