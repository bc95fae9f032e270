use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render every context side by side as a read-only board
pub fn render_kanban(frame: &mut Frame, app: &mut App, area: Rect) {
    frame.render_widget(Clear, area);

    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let border_style = Style::default().fg(app.theme.highlight).bg(bg);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" Kanban View", title_style)))
            .style(Style::default().bg(bg)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" ESC/q: close", dim_style)))
            .style(Style::default().bg(bg)),
        rows[2],
    );

    let contexts = app.board.contexts.clone();
    if contexts.is_empty() {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, contexts.len() as u32);
            contexts.len()
        ])
        .split(rows[1]);

    for (context, column) in contexts.iter().zip(columns.iter()) {
        let inner_width = column.width.saturating_sub(2) as usize;
        let text_style = Style::default().fg(app.theme.text).bg(bg);
        let checked_style = Style::default().fg(app.theme.checked).bg(bg);
        let lines: Vec<Line> = app
            .board
            .tasks_in(context)
            .into_iter()
            .map(|task| {
                let mark = if task.checked { "[X] " } else { "[ ] " };
                let style = if task.checked { checked_style } else { text_style };
                let text = format!("{}{}", mark, task.text);
                Line::from(Span::styled(truncate_to_width(&text, inner_width), style))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(format!(" {} ", context), title_style))
            .style(Style::default().bg(bg));
        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn columns_per_context() {
        let mut app = sample_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_kanban(frame, &mut app, area)
        });
        assert!(out.contains("Kanban View"));
        assert!(out.contains(" Work "));
        assert!(out.contains(" Personal "));
        assert!(out.contains("[X] Task 2"));
        assert!(out.contains("[ ] Task 3"));
    }
}
