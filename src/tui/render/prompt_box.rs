use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

/// Draw a one-line input box near the top of `area`
pub fn render_prompt_box(frame: &mut Frame, area: Rect, label: &str, input: &str, theme: &Theme) {
    let width = area.width.saturating_sub(4);
    let height = 3u16.min(area.height);
    let y = area.y + 2u16.min(area.height.saturating_sub(height));
    let popup = Rect::new(area.x + 2u16.min(area.width), y, width, height);
    frame.render_widget(Clear, popup);

    let bg = theme.background;
    let inner = width.saturating_sub(4) as usize;
    // Keep the tail of long input visible next to the cursor
    let room = inner.saturating_sub(display_width(label) + 1);
    let shown = if display_width(input) > room {
        tail_to_width(input, room)
    } else {
        input.to_string()
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}", truncate_to_width(label, inner)),
            Style::default().fg(theme.text_bright).bg(bg),
        ),
        Span::styled(shown, Style::default().fg(theme.text).bg(bg)),
        Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(line).block(block), popup);
}

/// The longest suffix of `s` that fits in `max_cells`
fn tail_to_width(s: &str, max_cells: usize) -> String {
    let mut width = 0;
    let mut start = s.len();
    for (i, c) in s.char_indices().rev() {
        let w = display_width(c.encode_utf8(&mut [0; 4]));
        if width + w > max_cells {
            break;
        }
        width += w;
        start = i;
    }
    s[start..].to_string()
}
