use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::stats::compute_stats;
use crate::tui::app::App;

use super::centered_rect_fixed;

/// Render completion statistics in a centered popup
pub fn render_stats_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let stats = compute_stats(&mut app.board);

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines = vec![
        Line::from(Span::styled(" Task Statistics", header_style)),
        Line::from(""),
        Line::from(Span::styled(format!(" Total tasks: {}", stats.total), text_style)),
        Line::from(Span::styled(
            format!(" Completed: {} ({:.1}%)", stats.completed, stats.rate),
            text_style,
        )),
        Line::from(""),
        Line::from(Span::styled(" By context", header_style)),
    ];
    for ctx in &stats.contexts {
        lines.push(Line::from(Span::styled(
            format!("  {}: {}/{} ({:.1}%)", ctx.context, ctx.done, ctx.total, ctx.rate),
            text_style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Press any key to close", dim_style)));

    let width = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0) + 4;
    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(width.max(30), height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
