pub mod kanban;
pub mod keybind_view;
pub mod prompt_box;
pub mod stats_overlay;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode, Panel};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    match app.mode {
        Mode::Normal => {
            render_header(frame, app, chunks[0]);
            task_list::render_task_list(frame, app, chunks[1]);
        }
        Mode::KeybindList { selected } => {
            keybind_view::render_keybind_list(frame, app, selected, chunks[0], chunks[1]);
        }
        Mode::KeybindEdit { action, .. } => {
            keybind_view::render_keybind_edit(frame, app, action, chunks[0]);
        }
    }

    // Panels draw over the content
    match app.panel {
        Some(Panel::Kanban) => kanban::render_kanban(frame, app, area),
        Some(Panel::Stats) => stats_overlay::render_stats_overlay(frame, app, area),
        None => {}
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans = Vec::new();
    if app.in_search() {
        spans.push(Span::styled(" Search Results (ESC to exit)", title_style));
    } else if app.board.has_contexts() {
        spans.push(Span::styled(
            format!(" Context: {}", app.board.current_context),
            title_style,
        ));
        let position = app
            .board
            .contexts
            .iter()
            .position(|c| *c == app.board.current_context)
            .map_or(0, |i| i + 1);
        spans.push(Span::styled(
            format!("  ({}/{})", position, app.board.contexts.len()),
            dim_style,
        ));
    }

    let separator = "\u{2500}".repeat(area.width as usize);
    let lines = vec![Line::from(spans), Line::from(Span::styled(separator, dim_style))];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// A `width` x `height` rect centered in `area`, clamped to fit
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
