use crate::model::board::Board;
use crate::model::error::ActionError;

/// Create an empty context and switch to it.
pub fn add_context(board: &mut Board, name: &str) -> Result<(), ActionError> {
    if board.has_context(name) {
        return Err(ActionError::NameCollision(name.to_string()));
    }
    board.contexts.push(name.to_string());
    board.current_context = name.to_string();
    board.selected = 0;
    board.invalidate(None);
    tracing::info!(context = %name, "context created");
    Ok(())
}

/// Rename the current context, retargeting its tasks.
///
/// Renaming to the current name is a no-op. The cached view moves to the
/// new key since task positions are unchanged.
pub fn rename_context(board: &mut Board, new_name: &str) -> Result<(), ActionError> {
    let old = board.current_context.clone();
    if new_name == old {
        return Ok(());
    }
    if board.has_context(new_name) {
        return Err(ActionError::NameCollision(new_name.to_string()));
    }

    for task in board.tasks.iter_mut().filter(|t| t.context == old) {
        task.context = new_name.to_string();
    }
    if let Some(slot) = board.contexts.iter_mut().find(|c| **c == old) {
        *slot = new_name.to_string();
    }
    board.current_context = new_name.to_string();
    board.rename_cached(&old, new_name);
    tracing::info!(from = %old, to = %new_name, "context renamed");
    Ok(())
}

/// Check that the current context may be deleted (another one must remain).
pub fn ensure_deletable(board: &Board) -> Result<(), ActionError> {
    if board.contexts.len() <= 1 {
        return Err(ActionError::PreconditionFailed);
    }
    Ok(())
}

/// Delete the current context and every task in it. The context that
/// slides into the old position (or the new last one) becomes current.
/// Returns the number of tasks removed.
pub fn delete_context(board: &mut Board) -> Result<usize, ActionError> {
    ensure_deletable(board)?;
    let doomed = board.current_context.clone();
    let index = board
        .contexts
        .iter()
        .position(|c| *c == doomed)
        .unwrap_or(0);

    let before = board.tasks.len();
    board.tasks.retain(|t| t.context != doomed);
    let removed = before - board.tasks.len();
    board.contexts.retain(|c| *c != doomed);
    board.invalidate(None);

    let next = index.min(board.contexts.len().saturating_sub(1));
    board.current_context = board.contexts.get(next).cloned().unwrap_or_default();
    board.selected = 0;
    tracing::info!(context = %doomed, removed, "context deleted");
    Ok(removed)
}

/// Switch to the next context, wrapping around.
pub fn next_context(board: &mut Board) {
    step_context(board, 1);
}

/// Switch to the previous context, wrapping around.
pub fn previous_context(board: &mut Board) {
    step_context(board, -1);
}

fn step_context(board: &mut Board, delta: isize) {
    let count = board.contexts.len();
    if count == 0 {
        return;
    }
    let current = board
        .contexts
        .iter()
        .position(|c| *c == board.current_context)
        .unwrap_or(0);
    let next = (current as isize + delta).rem_euclid(count as isize) as usize;
    board.current_context = board.contexts[next].clone();
    board.selected = 0;
}
