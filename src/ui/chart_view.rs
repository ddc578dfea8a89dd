//! Monthly chart screen rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{cell_style, render_footer, render_header};
use crate::app::App;
use crate::board::ChartLine;
use crate::data::ChartRow;

/// Renders the chart view
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], "Monthly chart");
    render_lines(frame, app, chunks[1]);
    render_footer(frame, chunks[2], app);
}

fn chart_line(line: &ChartLine) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:<5}", line.day),
        Style::default().fg(Color::Cyan),
    )];
    spans.extend(
        line.cells
            .iter()
            .map(|cell| Span::styled(format!("{:>6}", cell.text), cell_style(cell))),
    );
    Line::from(spans)
}

fn render_lines(frame: &mut Frame, app: &App, area: Rect) {
    let Some(board) = &app.board else {
        return;
    };

    let heading: String = ChartRow::COLUMNS
        .iter()
        .map(|column| format!("{:>6}", column))
        .collect();
    let visible = area.height.saturating_sub(3) as usize;

    let mut lines = vec![Line::from(Span::styled(
        format!("{:<5}{}", "DAY", heading),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        board
            .chart
            .iter()
            .skip(app.scroll_offset)
            .take(visible)
            .map(chart_line),
    );

    let block = Block::default()
        .title(format!(" {} days ", board.chart.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::refresh::RefreshMessage;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_chart_view_renders_columns_and_days() {
        let mut board = Board::from_catalog(NaiveDate::from_ymd_opt(2026, 4, 9).unwrap());
        let values = ["12", "XX", "34", "56"].map(String::from);
        board.render_chart(&[ChartRow::from_values(1, &values)]);

        let mut app = App::new();
        app.apply(RefreshMessage::BoardUpdated(Box::new(board)));

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Monthly chart"));
        assert!(content.contains("DSWR"));
        assert!(content.contains("GALI"));
        assert!(content.contains("30 days"));
        assert!(content.contains("56"));
    }
}
