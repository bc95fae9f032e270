use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Action;
use crate::tui::app::{App, Mode};

const NORMAL_HINTS: [Action; 10] = [
    Action::Quit,
    Action::AddTask,
    Action::Toggle,
    Action::Edit,
    Action::NextContext,
    Action::PreviousContext,
    Action::KanbanView,
    Action::SearchTasks,
    Action::TogglePriority,
    Action::Undo,
];

const SEARCH_HINTS: [Action; 3] = [Action::ExitSearch, Action::Toggle, Action::Edit];

/// Render the status row: the current error if any, else key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!(" {}", error),
            Style::default()
                .fg(app.theme.error)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
    } else if app.show_help_line && app.mode == Mode::Normal && app.panel.is_none() {
        help_line(app, area.width as usize)
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn help_line(app: &App, width: usize) -> Line<'static> {
    let hints: &[Action] = if app.in_search() {
        &SEARCH_HINTS
    } else if !app.board.has_contexts() {
        &[Action::AddContext, Action::Quit]
    } else {
        &NORMAL_HINTS
    };
    let key_style = Style::default().fg(app.theme.highlight).bg(app.theme.background);
    let desc_style = Style::default().fg(app.theme.dim).bg(app.theme.background);

    let mut spans = vec![Span::raw(" ")];
    let mut used = 1;
    for action in hints {
        let key = app.keybinds.key_for(*action).label();
        let desc = format!(":{}  ", action);
        let cost = key.chars().count() + desc.chars().count();
        if used + cost > width {
            break;
        }
        used += cost;
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(desc, desc_style));
    }
    Line::from(spans)
}
