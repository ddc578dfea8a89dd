//! HTML scraping for the results and chart pages
//!
//! The markup shape belongs to the remote site, so all of it lives behind
//! [`ResultParser`]: raw HTML in, typed rows out.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use super::{ChartRow, GameResult, ResultMap, SENTINEL};

/// CSS selectors for the page vocabulary shared by the remote pages and the board
pub mod selectors {
    pub const RESULT_ROW: &str = ".game-result";
    pub const GAME_NAME: &str = ".game-name";
    pub const TODAY: &str = ".today-number h3";
    pub const YESTERDAY: &str = ".yesterday-number h3";
    pub const CHART: &str = "#mix-chart";
    pub const CHART_ROW: &str = "#mix-chart .day-number";
    pub const DAY: &str = ".day";
    pub const NUMBER: &str = ".number";
    pub const LAST_UPDATED: &str = "#last-updated";
}

/// Errors that can occur while scraping a page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A selector failed to compile
    #[error("Invalid selector {0}")]
    InvalidSelector(String),

    /// A chart row's day cell did not hold a day number
    #[error("Invalid day number: {0:?}")]
    InvalidDay(String),
}

/// Turns fetched HTML into typed results
pub trait ResultParser: Send + Sync {
    /// Extracts every game row that carries an id
    fn parse_results(&self, html: &str) -> Result<ResultMap, ParseError>;

    /// Extracts every chart row that carries a day cell
    fn parse_chart(&self, html: &str) -> Result<Vec<ChartRow>, ParseError>;
}

/// [`ResultParser`] for the site's markup, built on `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl ResultParser for MarkupParser {
    fn parse_results(&self, html: &str) -> Result<ResultMap, ParseError> {
        let document = Html::parse_document(html);
        let row_sel = selector(selectors::RESULT_ROW)?;
        let name_sel = selector(selectors::GAME_NAME)?;
        let today_sel = selector(selectors::TODAY)?;
        let yesterday_sel = selector(selectors::YESTERDAY)?;

        let mut results = ResultMap::new();
        for row in document.select(&row_sel) {
            let Some(id) = row.value().attr("id").filter(|id| !id.is_empty()) else {
                continue;
            };
            let name = first_text(row, &name_sel).unwrap_or_default();
            let today = first_text(row, &today_sel).unwrap_or_else(|| SENTINEL.to_string());
            let yesterday = first_text(row, &yesterday_sel).unwrap_or_else(|| SENTINEL.to_string());

            results.insert(
                id.to_string(),
                GameResult {
                    name,
                    today: or_sentinel(today),
                    yesterday: or_sentinel(yesterday),
                },
            );
        }

        Ok(results)
    }

    fn parse_chart(&self, html: &str) -> Result<Vec<ChartRow>, ParseError> {
        let document = Html::parse_document(html);
        let row_sel = selector(selectors::CHART_ROW)?;
        let day_sel = selector(selectors::DAY)?;
        let number_sel = selector(selectors::NUMBER)?;

        let mut rows = Vec::new();
        for row in document.select(&row_sel) {
            let Some(day_text) = first_text(row, &day_sel) else {
                continue;
            };
            let date = parse_day(&day_text)?;
            let values: Vec<String> = row
                .select(&number_sel)
                .take(4)
                .map(element_text)
                .collect();

            rows.push(ChartRow::from_values(date, &values));
        }

        Ok(rows)
    }
}

/// Compiles a selector, mapping the borrowed error into a [`ParseError`]
pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::InvalidSelector(format!("{}: {:?}", css, e)))
}

/// Trimmed text of an element and its descendants
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first descendant matching `sel`
pub(crate) fn first_text(element: ElementRef<'_>, sel: &Selector) -> Option<String> {
    element.select(sel).next().map(element_text)
}

fn or_sentinel(value: String) -> String {
    if value.is_empty() {
        SENTINEL.to_string()
    } else {
        value
    }
}

/// Reads the leading decimal digits of a day cell ("5", " 05 ", "5th")
fn parse_day(text: &str) -> Result<u32, ParseError> {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidDay(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_FIXTURE: &str = r#"
        <html><body>
          <div class="game-result" id="DS">
            <div class="game-name"> DESAWAR </div>
            <div class="today-number"><h3>47</h3></div>
            <div class="yesterday-number"><h3>XX</h3></div>
          </div>
        </body></html>
    "#;

    const CHART_FIXTURE: &str = r#"
        <html><body>
          <table id="mix-chart">
            <tr class="day-number">
              <td class="day">5</td>
              <td class="number">12</td>
              <td class="number">XX</td>
              <td class="number">34</td>
              <td class="number">56</td>
            </tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_single_result_row() {
        let results = MarkupParser.parse_results(RESULTS_FIXTURE).unwrap();

        let mut expected = ResultMap::new();
        expected.insert(
            "DS".to_string(),
            GameResult {
                name: "DESAWAR".to_string(),
                today: "47".to_string(),
                yesterday: "XX".to_string(),
            },
        );
        assert_eq!(results, expected);
    }

    #[test]
    fn test_parse_single_chart_row() {
        let rows = MarkupParser.parse_chart(CHART_FIXTURE).unwrap();

        assert_eq!(
            rows,
            vec![ChartRow {
                date: 5,
                desawar: "12".to_string(),
                faridabad: "XX".to_string(),
                ghaziabad: "34".to_string(),
                gali: "56".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_result_cells_become_sentinel() {
        let html = r#"
            <div class="game-result" id="GL">
              <div class="today-number"><h3> </h3></div>
            </div>
        "#;

        let results = MarkupParser.parse_results(html).unwrap();
        let gali = &results["GL"];

        assert_eq!(gali.name, "");
        assert_eq!(gali.today, "XX");
        assert_eq!(gali.yesterday, "XX");
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let html = r#"
            <div class="game-result"><div class="game-name">NO ID</div></div>
            <div class="game-result" id=""><div class="game-name">EMPTY ID</div></div>
            <div class="game-result" id="FB"><div class="game-name">FARIDABAD</div></div>
        "#;

        let results = MarkupParser.parse_results(html).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.contains_key("FB"));
    }

    #[test]
    fn test_empty_page_yields_empty_results() {
        assert!(MarkupParser.parse_results("<html></html>").unwrap().is_empty());
        assert!(MarkupParser.parse_chart("<html></html>").unwrap().is_empty());
    }

    #[test]
    fn test_chart_rows_outside_container_are_ignored() {
        let html = r#"
            <div class="day-number"><span class="day">1</span><span class="number">99</span></div>
            <div id="mix-chart">
              <div class="day-number"><span class="day">2</span><span class="number">07</span></div>
            </div>
        "#;

        let rows = MarkupParser.parse_chart(html).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, 2);
        assert_eq!(rows[0].values(), ["07", "XX", "XX", "XX"]);
    }

    #[test]
    fn test_chart_row_without_day_cell_is_skipped() {
        let html = r#"
            <div id="mix-chart">
              <div class="day-number"><span class="number">11</span></div>
            </div>
        "#;

        assert!(MarkupParser.parse_chart(html).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_day_is_an_error() {
        let html = r#"
            <div id="mix-chart">
              <div class="day-number"><span class="day">Total</span></div>
            </div>
        "#;

        let err = MarkupParser.parse_chart(html).unwrap_err();
        assert_eq!(err, ParseError::InvalidDay("Total".to_string()));
    }

    #[test]
    fn test_parse_day_accepts_padding_and_suffix() {
        assert_eq!(parse_day(" 05 ").unwrap(), 5);
        assert_eq!(parse_day("21st").unwrap(), 21);
        assert!(parse_day("").is_err());
    }
}
