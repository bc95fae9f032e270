use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Action;
use crate::tui::app::App;

/// Render the keybind settings list with `selected` highlighted
pub fn render_keybind_list(
    frame: &mut Frame,
    app: &App,
    selected: usize,
    header: Rect,
    area: Rect,
) {
    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let selected_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.selection_bg)
        .add_modifier(Modifier::BOLD);

    let header_lines = vec![
        Line::from(Span::styled(" Keybind Settings", title_style)),
        Line::from(Span::styled(
            " \u{2191}/\u{2193}: Navigate | Enter: Edit | ESC: Exit",
            dim_style,
        )),
    ];
    frame.render_widget(Paragraph::new(header_lines), header);

    let total = app.keybinds.len();
    let visible = (area.height as usize).max(1);
    let start = if total <= visible {
        0
    } else {
        selected.saturating_sub(visible / 2).min(total - visible)
    };

    let lines: Vec<Line> = app
        .keybinds
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, (action, key))| {
            let style = if i == selected {
                selected_style
            } else {
                text_style
            };
            Line::from(Span::styled(
                format!("   {}: {}", action, key.label()),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Render the "press a key" screen for rebinding `action`
pub fn render_keybind_edit(frame: &mut Frame, app: &App, action: Action, area: Rect) {
    let bg = app.theme.background;
    let lines = vec![
        Line::from(Span::styled(
            format!(" Press a key to rebind '{}'", action),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Press ESC to cancel",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::render;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn list_shows_actions_and_labels() {
        let mut app = sample_app();
        app.mode = Mode::KeybindList { selected: 0 };
        let out = render_to_string(TERM_W, 40, |frame, _| render(frame, &mut app));
        assert!(out.contains("Keybind Settings"));
        assert!(out.contains("toggle: SPACE"));
        assert!(out.contains("next_context: \u{2192}"));
        assert!(out.contains("move_task_down: J"));
    }

    #[test]
    fn list_scrolls_to_selection() {
        let mut app = sample_app();
        app.mode = Mode::KeybindList { selected: 24 };
        let out = render_to_string(TERM_W, 12, |frame, _| render(frame, &mut app));
        assert!(out.contains("move_task_down: J"));
        assert!(!out.contains("toggle: SPACE"));
    }

    #[test]
    fn edit_screen_names_action() {
        let mut app = sample_app();
        app.mode = Mode::KeybindEdit {
            action: Action::AddTag,
            list_selected: 15,
        };
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.contains("Press a key to rebind 'add_tag'"));
        assert!(out.contains("Press ESC to cancel"));
    }
}
