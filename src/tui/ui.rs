//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unbeatable_tictactoe::{Board, Cell, Player, Position};

use super::app::App;

/// Renders the title, the board with cursor highlight, and the status line.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    let title = Paragraph::new("Unbeatable Tic-Tac-Toe (you are X)")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app.game().board(), app.cursor());

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Position) {
    let board_area = center_rect(area, 38, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, positions) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], board, cursor, positions);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, positions: &[Position]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (col, &pos) in positions.iter().enumerate() {
        // Vertically center the mark in the 3-line cell.
        let cell_area = Rect {
            y: cols[col * 2].y + cols[col * 2].height / 2,
            height: 1,
            ..cols[col * 2]
        };
        draw_cell(frame, cell_area, board, cursor, pos);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, pos: Position) {
    let label;
    let (symbol, base_style) = match board.get(pos) {
        Cell::Empty => {
            label = format!(" {} ", pos.to_index() + 1);
            (label.as_str(), Style::default().fg(Color::DarkGray))
        }
        Cell::Occupied(Player::Human) => (" X ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Cell::Occupied(Player::Ai) => (" O ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };

    let style = if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let bar = vec![Line::from("│"); area.height as usize];
    let sep = Paragraph::new(bar).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_marks_and_status() {
        let app = App::new(&AppConfig::default());
        let screen = rendered(&app);
        assert!(screen.contains("Unbeatable Tic-Tac-Toe"));
        assert!(screen.contains('O'));
        assert!(screen.contains('5'));
        assert!(screen.contains("AI opened"));
    }
}
