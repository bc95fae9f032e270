use crate::model::task::Task;
use crate::model::view_cache::ViewCache;

/// The undoable part of the board: everything a snapshot captures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub contexts: Vec<String>,
    pub current_context: String,
    pub selected: usize,
}

/// Live task/context model with its view cache and dirty flag.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub tasks: Vec<Task>,
    /// Context names in display order
    pub contexts: Vec<String>,
    pub current_context: String,
    /// Selection inside the current view (wrapped by view length on use)
    pub selected: usize,
    cache: ViewCache,
    dirty: bool,
}

impl Board {
    /// Build a board from loaded tasks. Contexts are derived from the tasks
    /// in first-appearance order; the first one becomes current.
    pub fn new(tasks: Vec<Task>) -> Self {
        let contexts = derive_contexts(&tasks);
        let current_context = contexts.first().cloned().unwrap_or_default();
        Board {
            tasks,
            contexts,
            current_context,
            selected: 0,
            cache: ViewCache::new(),
            dirty: false,
        }
    }

    pub fn has_contexts(&self) -> bool {
        !self.contexts.is_empty()
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.iter().any(|c| c == name)
    }

    /// Positions of the tasks in `context`, in list order
    pub fn context_view(&mut self, context: &str) -> Vec<usize> {
        self.cache.get(&self.tasks, context).to_vec()
    }

    /// Positions of the tasks in the current context
    pub fn current_view(&mut self) -> Vec<usize> {
        let ctx = self.current_context.clone();
        self.context_view(&ctx)
    }

    /// Tasks of a context, for read-only consumers
    pub fn tasks_in(&mut self, context: &str) -> Vec<&Task> {
        let positions = self.cache.get(&self.tasks, context).to_vec();
        positions.into_iter().map(|i| &self.tasks[i]).collect()
    }

    /// Drop cached views and mark the board dirty. Every mutator calls this
    /// for each context it could have affected.
    pub fn invalidate(&mut self, context: Option<&str>) {
        self.cache.invalidate(context);
        self.dirty = true;
    }

    /// Migrate a cached view to the renamed context's key.
    pub fn rename_cached(&mut self, old: &str, new: &str) {
        self.cache.rename(old, new);
        self.dirty = true;
    }

    pub fn is_cached(&self, context: &str) -> bool {
        self.cache.is_cached(context)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Copy of the undoable state
    pub fn snapshot(&self) -> BoardState {
        BoardState {
            tasks: self.tasks.clone(),
            contexts: self.contexts.clone(),
            current_context: self.current_context.clone(),
            selected: self.selected,
        }
    }

    /// Replace the live state with `state`, returning the previous live
    /// state by value. Invalidates every cached view.
    pub fn restore(&mut self, state: BoardState) -> BoardState {
        let previous = BoardState {
            tasks: std::mem::replace(&mut self.tasks, state.tasks),
            contexts: std::mem::replace(&mut self.contexts, state.contexts),
            current_context: std::mem::replace(&mut self.current_context, state.current_context),
            selected: std::mem::replace(&mut self.selected, state.selected),
        };
        self.invalidate(None);
        previous
    }
}

/// Distinct context names referenced by `tasks`, in first-appearance order
pub fn derive_contexts(tasks: &[Task]) -> Vec<String> {
    let mut contexts: Vec<String> = Vec::new();
    for task in tasks {
        if !contexts.iter().any(|c| c == &task.context) {
            contexts.push(task.context.clone());
        }
    }
    contexts
}
