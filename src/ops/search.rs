use crate::model::task::Task;

/// Positions of every task whose text contains `query`, ignoring case,
/// across all contexts in list order.
pub fn search_tasks(tasks: &[Task], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.text.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
