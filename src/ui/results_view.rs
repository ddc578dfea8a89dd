//! Results screen rendering
//!
//! Lists every game on the board with yesterday's and today's numbers.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{cell_style, render_footer, render_header};
use crate::app::App;
use crate::board::{Cell, ResultRow};

/// Renders the results view
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], "Results");
    render_rows(frame, app, chunks[1]);
    render_footer(frame, chunks[2], app);
}

fn number_span(cell: Option<&Cell>) -> Span<'static> {
    match cell {
        Some(cell) => Span::styled(format!("{:>9}", cell.text), cell_style(cell)),
        None => Span::styled(format!("{:>9}", "--"), Style::default().fg(Color::DarkGray)),
    }
}

fn row_line(row: &ResultRow) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<4}", row.id), Style::default().fg(Color::Cyan)),
        Span::raw(format!("{:<24}", row.name)),
        number_span(row.yesterday.as_ref()),
        number_span(row.today.as_ref()),
    ])
}

fn render_rows(frame: &mut Frame, app: &App, area: Rect) {
    let Some(board) = &app.board else {
        return;
    };

    let visible = area.height.saturating_sub(3) as usize;
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<4}{:<24}{:>9}{:>9}", "ID", "GAME", "YESTERDAY", "TODAY"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        board
            .rows
            .iter()
            .skip(app.scroll_offset)
            .take(visible)
            .map(row_line),
    );

    let block = Block::default()
        .title(format!(" {} games ", board.rows.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::data::{GameResult, ResultMap, Source};
    use crate::refresh::RefreshMessage;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_results_view_renders_rows_and_source() {
        let mut board = Board::from_catalog(NaiveDate::from_ymd_opt(2026, 4, 9).unwrap());
        let mut results = ResultMap::new();
        results.insert(
            "DR".to_string(),
            GameResult {
                name: "DELHI ROSE".to_string(),
                today: "64".to_string(),
                yesterday: "XX".to_string(),
            },
        );
        board.render_results(&results);
        board.results_source = Some(Source::Simulated);

        let mut app = App::new();
        app.apply(RefreshMessage::BoardUpdated(Box::new(board)));

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("RESULTBOARD"));
        assert!(content.contains("SIMULATED"));
        assert!(content.contains("DELHI ROSE"));
        assert!(content.contains("64"));
    }
}
