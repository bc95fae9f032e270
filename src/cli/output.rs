use serde::Serialize;

use crate::model::task::Task;
use crate::ops::stats::Stats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ContextListJson<'a> {
    pub context: String,
    pub tasks: Vec<&'a Task>,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[x] !!! text [Due: 2025-01-31] [#tag]`
pub fn format_task_line(task: &Task) -> String {
    let mark = if task.checked { 'x' } else { ' ' };
    format!("[{}] {}", mark, task.display_line())
}

/// One block per context: a header line, then indented tasks
pub fn format_context_listing(groups: &[ContextListJson<'_>]) -> String {
    let mut blocks = Vec::new();
    for group in groups {
        let mut lines = vec![format!("{} ({})", group.context, group.tasks.len())];
        if group.tasks.is_empty() {
            lines.push("  (no tasks)".to_string());
        }
        lines.extend(group.tasks.iter().map(|t| format!("  {}", format_task_line(t))));
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}

pub fn format_stats(stats: &Stats) -> String {
    let mut lines = vec![
        format!("Total tasks: {}", stats.total),
        format!("Completed:   {} ({:.1}%)", stats.completed, stats.rate),
    ];
    if !stats.contexts.is_empty() {
        lines.push(String::new());
        let name_width = stats
            .contexts
            .iter()
            .map(|c| c.context.chars().count())
            .max()
            .unwrap_or(0);
        for ctx in &stats.contexts {
            lines.push(format!(
                "  {:<w$}  {}/{} ({:.1}%)",
                ctx.context,
                ctx.done,
                ctx.total,
                ctx.rate,
                w = name_width
            ));
        }
    }
    lines.join("\n")
}
