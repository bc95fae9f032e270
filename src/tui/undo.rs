use crate::model::board::{Board, BoardState};
use crate::model::error::ActionError;

/// Maximum number of snapshots kept on either stack
pub const UNDO_STACK_LIMIT: usize = 50;

/// Linear undo/redo over full board snapshots.
///
/// States move between the stacks and the live board by value, so no
/// snapshot is ever shared with the live state.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    history: Vec<BoardState>,
    future: Vec<BoardState>,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack::default()
    }

    /// Record the board as it is now. Call before a mutation. Clears the
    /// redo stack and evicts the oldest entry past the limit.
    pub fn snapshot(&mut self, board: &Board) {
        self.history.push(board.snapshot());
        if self.history.len() > UNDO_STACK_LIMIT {
            self.history.drain(..self.history.len() - UNDO_STACK_LIMIT);
        }
        self.future.clear();
    }

    /// Restore the most recent snapshot. The live state moves to the redo
    /// stack.
    pub fn undo(&mut self, board: &mut Board) -> Result<(), ActionError> {
        let state = self.history.pop().ok_or(ActionError::NothingToUndo)?;
        let live = board.restore(state);
        push_bounded(&mut self.future, live);
        tracing::debug!(history = self.history.len(), "undo");
        Ok(())
    }

    /// Re-apply the most recently undone state. The live state moves back to
    /// the undo stack without clearing the redo stack.
    pub fn redo(&mut self, board: &mut Board) -> Result<(), ActionError> {
        let state = self.future.pop().ok_or(ActionError::NothingToRedo)?;
        let live = board.restore(state);
        push_bounded(&mut self.history, live);
        tracing::debug!(future = self.future.len(), "redo");
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

fn push_bounded(stack: &mut Vec<BoardState>, state: BoardState) {
    stack.push(state);
    if stack.len() > UNDO_STACK_LIMIT {
        stack.remove(0);
    }
}
