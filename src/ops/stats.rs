use serde::Serialize;

use crate::model::board::Board;

/// Completion numbers for one context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextStats {
    pub context: String,
    pub total: usize,
    pub done: usize,
    pub rate: f64,
}

/// Completion numbers for the whole board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub rate: f64,
    pub contexts: Vec<ContextStats>,
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

/// Compute totals and per-context completion, in context display order.
pub fn compute_stats(board: &mut Board) -> Stats {
    let total = board.tasks.len();
    let completed = board.tasks.iter().filter(|t| t.checked).count();
    let contexts = board
        .contexts
        .clone()
        .into_iter()
        .map(|context| {
            let tasks = board.tasks_in(&context);
            let total = tasks.len();
            let done = tasks.iter().filter(|t| t.checked).count();
            ContextStats {
                context,
                total,
                done,
                rate: percent(done, total),
            }
        })
        .collect();
    Stats {
        total,
        completed,
        rate: percent(completed, total),
        contexts,
    }
}
