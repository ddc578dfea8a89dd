//! UI rendering module for the results board
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod chart_view;
pub mod help_overlay;
pub mod results_view;

pub use chart_view::render as render_chart_view;
pub use help_overlay::render as render_help_overlay;
pub use results_view::render as render_results_view;

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::board::Cell;
use crate::data::Source;

/// Style for a displayed number: fresh cells stand out, pending ones recede
pub(crate) fn cell_style(cell: &Cell) -> Style {
    if cell.fresh {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if crate::data::is_pending(&cell.text) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Label and color for where a dataset came from
fn source_badge(source: Option<Source>) -> Span<'static> {
    match source {
        Some(Source::Live) => Span::styled("LIVE", Style::default().fg(Color::Green)),
        Some(Source::Simulated) => Span::styled(
            "SIMULATED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("--", Style::default().fg(Color::DarkGray)),
    }
}

/// Renders the two-line header shared by both views
pub(crate) fn render_header(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let Some(board) = &app.board else {
        return;
    };

    let updated = board
        .last_updated
        .as_ref()
        .map(|stamp| stamp.display.clone())
        .unwrap_or_else(|| "never".to_string());

    let status = if app.refreshing {
        Span::styled("refreshing…", Style::default().fg(Color::Cyan))
    } else if let Some(error) = &app.last_error {
        Span::styled(error.clone(), Style::default().fg(Color::Red))
    } else {
        Span::raw("")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "RESULTBOARD",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(title.to_string(), Style::default().fg(Color::White)),
            Span::raw("  "),
            status,
        ]),
        Line::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::DarkGray)),
            Span::raw(updated),
            Span::raw("   results "),
            source_badge(board.results_source),
            Span::raw("   chart "),
            source_badge(board.chart_source),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// How long ago the last board arrived, e.g. " │ Board: 3m ago"
fn received_label(last_refresh: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now - last_refresh;
    let mins_ago = elapsed.num_minutes();
    if mins_ago < 1 {
        " │ Board: just now".to_string()
    } else if mins_ago < 60 {
        format!(" │ Board: {}m ago", mins_ago)
    } else {
        format!(" │ Board: {}h ago", elapsed.num_hours())
    }
}

/// Renders the one-line key hint at the bottom, with board freshness
pub(crate) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![Span::raw("↑↓ scroll  Tab switch view  r refresh  ? help  q quit")];

    if let Some(last_refresh) = app.last_refresh {
        help_spans.push(Span::raw(received_label(last_refresh, Local::now())));
    }

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
