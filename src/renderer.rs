use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Rgb;
use crate::feed::{FeedCell, RenderFeed};

/// Terminal columns per grid cell; keeps cells roughly square.
const COLUMNS_PER_CELL: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_EMPTY: &str = "  ";

/// Renders one frame from a render feed.
pub fn render(frame: &mut Frame<'_>, feed: &RenderFeed) {
    let board_width = feed.grid_width.saturating_mul(COLUMNS_PER_CELL) + 2;
    let board_height = feed.grid_height + 2;

    let [board_row, status_row] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(frame.area());
    let [board_area] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(board_row);
    let [status_area] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(status_row);

    let block = Block::bordered()
        .border_style(Style::new().fg(color(feed.outline)).bg(color(feed.background)))
        .style(Style::new().bg(color(feed.background)));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    if let Some(vacated) = feed.vacated {
        paint_cell(frame, inner, vacated, GLYPH_EMPTY, feed.background);
    }
    paint_cell(frame, inner, feed.apple, GLYPH_CELL, feed.background);
    for (index, cell) in feed.snake.iter().enumerate() {
        let glyph = if index == feed.head_index { "▓▓" } else { GLYPH_CELL };
        paint_cell(frame, inner, *cell, glyph, feed.outline);
    }

    frame.render_widget(
        Paragraph::new(status_line(feed))
            .alignment(Alignment::Center)
            .style(Style::new().fg(Color::DarkGray)),
        status_area,
    );

    if feed.paused {
        render_pause_popup(frame, board_area);
    }
}

fn status_line(feed: &RenderFeed) -> Line<'static> {
    Line::from(format!(
        "length {}  tick {}  [Space] pause  [Esc] quit",
        feed.snake.len(),
        feed.tick
    ))
}

fn paint_cell(frame: &mut Frame<'_>, inner: Rect, cell: FeedCell, glyph: &str, bg: Rgb) {
    let Some((x, y)) = cell_to_terminal(inner, cell) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, glyph, Style::new().fg(color(cell.color)).bg(color(bg)));
}

fn render_pause_popup(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 50, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::new().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[Esc]/[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(mid);

    center
}

fn cell_to_terminal(inner: Rect, cell: FeedCell) -> Option<(u16, u16)> {
    let column = u16::try_from(cell.position.x).ok()?;
    let row = u16::try_from(cell.position.y).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
