use std::collections::HashMap;

use crate::model::task::Task;

/// Memoized per-context views over the task list.
///
/// Each entry holds the positions (into the task list) of the tasks whose
/// context equals the key, in list order. An entry is only valid until the
/// next mutation touching that context; mutators must call `invalidate`.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    entries: HashMap<String, Vec<usize>>,
}

impl ViewCache {
    pub fn new() -> Self {
        ViewCache::default()
    }

    /// Positions of the tasks in `context`, computed on first access.
    pub fn get(&mut self, tasks: &[Task], context: &str) -> &[usize] {
        self.entries
            .entry(context.to_string())
            .or_insert_with(|| filter_positions(tasks, context))
    }

    /// Drop one entry, or every entry when `context` is `None`.
    pub fn invalidate(&mut self, context: Option<&str>) {
        match context {
            Some(ctx) => {
                self.entries.remove(ctx);
            }
            None => self.entries.clear(),
        }
    }

    /// Move a cached entry to a new key after a context rename. Positions do
    /// not change on rename, so the entry stays valid.
    pub fn rename(&mut self, old: &str, new: &str) {
        self.entries.remove(new);
        if let Some(positions) = self.entries.remove(old) {
            self.entries.insert(new.to_string(), positions);
        }
    }

    pub fn is_cached(&self, context: &str) -> bool {
        self.entries.contains_key(context)
    }
}

/// Live filter of the task list by context
pub fn filter_positions(tasks: &[Task], context: &str) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.context == context)
        .map(|(i, _)| i)
        .collect()
}
