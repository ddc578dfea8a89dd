//! Integration tests for fetching over real HTTP
//!
//! A throwaway server on 127.0.0.1 plays the origin so the reqwest transport,
//! the scraper and the fallback path run end to end.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use resultboard::board::Board;
use resultboard::clock::{Clock, ManualClock, Zone};
use resultboard::data::{FetchConfig, ResultFetcher, Source};
use resultboard::refresh::UpdateLoop;

const RESULTS_PAGE: &str = r#"<html><body>
  <div class="game-result" id="DS">
    <div class="game-name">DESAWAR</div>
    <div class="today-number"><h3>47</h3></div>
    <div class="yesterday-number"><h3>18</h3></div>
  </div>
  <div class="game-result" id="GL">
    <div class="game-name">GALI</div>
    <div class="today-number"><h3>XX</h3></div>
    <div class="yesterday-number"><h3>91</h3></div>
  </div>
</body></html>"#;

const CHART_PAGE: &str = r#"<html><body>
  <table id="mix-chart">
    <tr class="day-number">
      <td class="day">1</td>
      <td class="number">12</td><td class="number">34</td>
      <td class="number">56</td><td class="number">78</td>
    </tr>
  </table>
</body></html>"#;

/// Serves `results` on /api/results and `chart` on /api/chart as
/// (status, body) pairs; anything else is a 404. Returns the origin.
async fn serve(results: (u16, &'static str), chart: (u16, &'static str)) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&request);
                let (status, body) = if head.starts_with("GET /api/results ") {
                    results
                } else if head.starts_with("GET /api/chart ") {
                    chart
                } else {
                    (404, "")
                };

                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: text/html\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn config(origin: String) -> FetchConfig {
    FetchConfig {
        origin,
        request_timeout: Duration::from_secs(5),
        results_delay: Duration::ZERO,
        chart_delay: Duration::ZERO,
        ..FetchConfig::default()
    }
}

fn clock() -> ManualClock {
    // 2026-04-09 12:00 IST
    ManualClock::new(Utc.with_ymd_and_hms(2026, 4, 9, 6, 30, 0).unwrap())
}

#[tokio::test]
async fn test_live_pages_are_scraped() {
    let origin = serve((200, RESULTS_PAGE), (200, CHART_PAGE)).await;
    let mut fetcher = ResultFetcher::new(&config(origin), Arc::new(clock()), Zone::ist()).unwrap();

    let results = fetcher.get_results().await;
    assert_eq!(results.source, Source::Live);
    assert_eq!(results.data.len(), 2);
    assert_eq!(results.data["DS"].today, "47");
    assert_eq!(results.data["GL"].today, "XX");

    let chart = fetcher.get_monthly_chart().await;
    assert_eq!(chart.source, Source::Live);
    assert_eq!(chart.data.len(), 1);
    assert_eq!(chart.data[0].gali, "78");
}

#[tokio::test]
async fn test_server_error_falls_back_to_simulation() {
    let origin = serve((500, "boom"), (503, "")).await;
    let mut fetcher = ResultFetcher::new(&config(origin), Arc::new(clock()), Zone::ist()).unwrap();

    let results = fetcher.get_results().await;
    assert_eq!(results.source, Source::Simulated);
    assert_eq!(results.data.len(), 79);

    let chart = fetcher.get_monthly_chart().await;
    assert_eq!(chart.source, Source::Simulated);
    assert_eq!(chart.data.len(), 30);

    assert!(fetcher.cache().read_results().is_none());
    assert!(fetcher.cache().read_chart().is_none());
}

#[tokio::test]
async fn test_cycle_renders_live_numbers_onto_the_board() {
    let origin = serve((200, RESULTS_PAGE), (200, CHART_PAGE)).await;
    let clock = Arc::new(clock());
    let zone = Zone::ist();
    let fetcher = ResultFetcher::new(&config(origin), clock.clone(), zone.clone()).unwrap();
    let board = Board::from_catalog(zone.date_of(clock.now()));

    let mut update_loop = UpdateLoop::new(fetcher, board, clock, zone, Duration::from_secs(10));
    update_loop.run_cycle().await.unwrap();

    let board = update_loop.board();
    let desawar = board.row("DS").unwrap();
    assert_eq!(desawar.today.as_ref().map(|c| c.text.as_str()), Some("47"));
    assert!(desawar.today.as_ref().is_some_and(|c| c.fresh));

    let gali = board.row("GL").unwrap();
    assert_eq!(gali.yesterday.as_ref().map(|c| c.text.as_str()), Some("91"));

    assert_eq!(board.chart[0].cells[3].text, "78");
    assert_eq!(
        board.last_updated.as_ref().map(|s| s.display.as_str()),
        Some("09 April 2026, 12:00:00 IST")
    );
    assert_eq!(board.results_source, Some(Source::Live));
}
