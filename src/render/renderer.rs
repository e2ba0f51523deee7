use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::Board;

const HELP_MOVES: &str = "(W)Up (S)Down (A)Left (D)Right";
const HELP_CONTROLS: &str = "(R)Restart (Q)Exit";
const WIN_MESSAGE: &str = "YOU WIN";
const GAMEOVER_MESSAGE: &str = "GAME OVER";

/// Draws the board. Stateless: every frame is a function of the board alone.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board) {
        let grid_height = grid_height(board.height());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),           // Scores
                Constraint::Length(grid_height), // Grid
                Constraint::Length(2),           // Status and help
                Constraint::Min(0),
            ])
            .split(frame.area());

        frame.render_widget(self.render_scores(board), chunks[0]);
        frame.render_widget(self.render_grid(board), chunks[1]);
        frame.render_widget(self.render_status(board), chunks[2]);
    }

    fn render_scores(&self, board: &Board) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from(vec![
            Span::styled("SCORE: ", label),
            Span::styled(board.score().to_string(), value),
        ])];
        if board.high_score() != 0 {
            lines.push(Line::from(vec![
                Span::styled("HIGHSCORE: ", label),
                Span::styled(board.high_score().to_string(), value),
            ]));
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'_> {
        let border = Style::default().fg(Color::DarkGray);
        let separator = Line::from(Span::styled(separator(board.width()), border));

        let mut lines = Vec::with_capacity(board.height() * 2 + 1);
        for row in board.grid().rows() {
            lines.push(separator.clone());

            let mut spans = Vec::with_capacity(row.len() * 2 + 1);
            for &value in row {
                spans.push(Span::styled("|", border));
                spans.push(Span::styled(format_cell(value), tile_style(value)));
            }
            spans.push(Span::styled("|", border));
            lines.push(Line::from(spans));
        }
        lines.push(separator);

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White))
                    .title(" 2048 "),
            )
            .alignment(Alignment::Center)
    }

    fn render_status(&self, board: &Board) -> Paragraph<'_> {
        let status = if board.is_win() {
            Span::styled(
                WIN_MESSAGE,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else if board.is_gameover() {
            Span::styled(
                GAMEOVER_MESSAGE,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(HELP_MOVES, Style::default().fg(Color::Cyan))
        };

        let text = vec![
            Line::from(status),
            Line::from(Span::styled(HELP_CONTROLS, Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows needed for the grid: tiles, separators and the block border
fn grid_height(rows: usize) -> u16 {
    let lines = rows.saturating_mul(2).saturating_add(3);
    u16::try_from(lines).unwrap_or(u16::MAX)
}

/// Horizontal rule between grid rows, e.g. `+------+------+`
fn separator(width: usize) -> String {
    let mut line = "+------".repeat(width);
    line.push('+');
    line
}

/// Cell body without its left border: the value centred in six columns,
/// blank when empty
fn format_cell(value: u32) -> String {
    if value == 0 {
        " ".repeat(6)
    } else {
        format!("{value:^5} ")
    }
}

fn tile_style(value: u32) -> Style {
    let color = match value {
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::Yellow,
        16 => Color::LightRed,
        32 => Color::Red,
        64 => Color::Magenta,
        128 => Color::LightMagenta,
        256 => Color::LightBlue,
        512 => Color::Blue,
        1024 => Color::LightCyan,
        _ => Color::LightGreen,
    };
    let style = Style::default().fg(color);
    if value >= 128 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
