use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Action, Task};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

const CHECKBOX_WIDTH: usize = 6;

/// Render the rows of the visible view (current context or search results)
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    if !app.board.has_contexts() {
        let key = app.keybinds.key_for(Action::AddContext).label();
        let msg = format!(
            "  There are currently no contexts. Press '{}' to create one.",
            key
        );
        let line = Line::from(Span::styled(
            msg,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let view = app.view();
    if view.is_empty() {
        let msg = if app.in_search() {
            "  No matching tasks found."
        } else {
            "  No tasks in this context."
        };
        frame.render_widget(Paragraph::new(Line::from(Span::styled(msg, dim_style))), area);
        return;
    }

    let selected = app.board.selected % view.len();
    let visible = area.height.saturating_sub(1).max(1) as usize;
    let start = scroll_start(selected, visible, view.len());
    let end = (start + visible).min(view.len());
    let width = area.width as usize;
    let show_context = app.in_search();

    let mut lines: Vec<Line> = Vec::with_capacity(end - start + 1);
    lines.push(Line::from(vec![
        Span::styled(format!(" {:<w$}", "Status", w = CHECKBOX_WIDTH), dim_style),
        Span::styled("Task", dim_style),
    ]));

    for (i, &pos) in view.iter().enumerate().take(end).skip(start) {
        let task = &app.board.tasks[pos];
        lines.push(task_line(task, &app.theme, i == selected, show_context, width));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// First visible row, keeping the selection near the middle
fn scroll_start(selected: usize, visible: usize, total: usize) -> usize {
    if total <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(total - visible)
}

fn task_line<'a>(
    task: &Task,
    theme: &Theme,
    selected: bool,
    show_context: bool,
    width: usize,
) -> Line<'a> {
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = if task.checked {
        Style::default().fg(theme.checked).bg(bg)
    } else {
        Style::default().fg(theme.text).bg(bg)
    };
    let base = if selected {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };

    let checkbox = if task.checked { "[X]" } else { "[ ]" };
    let mut spans = vec![Span::styled(
        format!(" {:<w$}", checkbox, w = CHECKBOX_WIDTH),
        base,
    )];
    let mut used = CHECKBOX_WIDTH + 1;

    if let Some(priority) = task.priority {
        let marker = format!("{} ", priority.marker());
        used += display_width(&marker);
        spans.push(Span::styled(
            marker,
            Style::default().fg(theme.priority_color(priority)).bg(bg),
        ));
    }

    let mut suffix: Vec<Span> = Vec::new();
    if let Some(due) = task.due_date {
        suffix.push(Span::styled(
            format!(" [Due: {}]", due),
            Style::default().fg(theme.due).bg(bg),
        ));
    }
    if !task.tags.is_empty() {
        let tags: Vec<String> = task.tags.iter().map(|t| format!("#{}", t)).collect();
        suffix.push(Span::styled(
            format!(" [{}]", tags.join(", ")),
            Style::default().fg(theme.tag).bg(bg),
        ));
    }
    if show_context {
        suffix.push(Span::styled(
            format!(" ({})", task.context),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }

    let suffix_width: usize = suffix.iter().map(|s| display_width(&s.content)).sum();
    let room = width.saturating_sub(used);
    if display_width(&task.text) + suffix_width <= room {
        spans.push(Span::styled(task.text.clone(), base));
        spans.extend(suffix);
    } else {
        // Too wide: keep as much of the text as fits and drop the decorations
        spans.push(Span::styled(truncate_to_width(&task.text, room), base));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DueDate, Priority};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn renders_checkbox_and_decorations() {
        let mut app = sample_app();
        app.board.tasks[0].priority = Some(Priority::High);
        app.board.tasks[0].due_date = Some(DueDate::parse("2025-03-01").unwrap());
        app.board.tasks[0].add_tag("home");
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_task_list(frame, &mut app, area)
        });
        assert!(out.contains("Status"));
        assert!(out.contains("[ ]   !!! Task 1 [Due: 2025-03-01] [#home]"));
        assert!(out.contains("Task 3"));
    }

    #[test]
    fn search_rows_show_context() {
        let mut app = sample_app();
        app.enter_search("task 2").unwrap();
        let out = render_to_string(TERM_W, 10, |frame, area| {
            render_task_list(frame, &mut app, area)
        });
        assert!(out.contains("[X]   Task 2 (Personal)"));
    }

    #[test]
    fn empty_states() {
        let mut app = empty_app();
        let out = render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area)
        });
        assert!(out.contains("There are currently no contexts. Press 'n' to create one."));

        let mut app = sample_app();
        crate::ops::context_ops::add_context(&mut app.board, "Empty").unwrap();
        let out = render_to_string(TERM_W, 5, |frame, area| {
            render_task_list(frame, &mut app, area)
        });
        assert!(out.contains("No tasks in this context."));
    }

    #[test]
    fn long_text_is_truncated() {
        let mut app = sample_app();
        app.board.tasks[0].text = "x".repeat(100);
        let out = render_to_string(30, 5, |frame, area| {
            render_task_list(frame, &mut app, area)
        });
        assert!(out.contains('\u{2026}'));
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_start(0, 5, 3), 0);
        assert_eq!(scroll_start(8, 5, 20), 6);
        assert_eq!(scroll_start(19, 5, 20), 15);
    }
}
