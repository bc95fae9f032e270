use crate::model::board::Board;
use crate::model::error::ActionError;
use crate::model::task::{DueDate, Priority, Task};

// ---------------------------------------------------------------------------
// Creation and removal
// ---------------------------------------------------------------------------

/// Append a task to the current context and select it.
/// Returns the new task's position in the task list.
pub fn add_task(board: &mut Board, text: &str) -> usize {
    let context = board.current_context.clone();
    board.tasks.push(Task::new(text, context.as_str()));
    board.invalidate(Some(&context));
    let view = board.current_view();
    board.selected = view.len().saturating_sub(1);
    tracing::debug!(context = %context, "task added");
    board.tasks.len() - 1
}

/// Remove the task at `pos`, returning it.
pub fn delete_task(board: &mut Board, pos: usize) -> Task {
    let task = board.tasks.remove(pos);
    // Positions after `pos` shifted, so every context's view is stale
    board.invalidate(None);
    tracing::debug!(context = %task.context, "task deleted");
    task
}

/// Selection after deleting from a view that held `old_len` tasks: step
/// back one when the selection sat on (or past) the last row.
pub fn selection_after_delete(selected: usize, old_len: usize) -> usize {
    if selected > 0 && selected + 1 >= old_len {
        selected - 1
    } else {
        selected
    }
}

// ---------------------------------------------------------------------------
// Field edits
// ---------------------------------------------------------------------------

/// Replace the text of the task at `pos`
pub fn edit_task(board: &mut Board, pos: usize, text: &str) {
    let task = &mut board.tasks[pos];
    task.text = text.to_string();
    let context = task.context.clone();
    board.invalidate(Some(&context));
}

/// Flip the checked flag of the task at `pos`
pub fn toggle_checked(board: &mut Board, pos: usize) {
    let task = &mut board.tasks[pos];
    task.checked = !task.checked;
    let context = task.context.clone();
    board.invalidate(Some(&context));
}

/// Advance the priority of the task at `pos` one step around the cycle.
/// Returns the new priority.
pub fn cycle_priority(board: &mut Board, pos: usize) -> Option<Priority> {
    let task = &mut board.tasks[pos];
    task.priority = Priority::cycle(task.priority);
    let (priority, context) = (task.priority, task.context.clone());
    board.invalidate(Some(&context));
    priority
}

/// Set or clear the due date of the task at `pos` from user text.
/// `clear` (any case) removes the date. On a parse error nothing changes.
pub fn set_due_date(board: &mut Board, pos: usize, text: &str) -> Result<(), ActionError> {
    let due = if text.trim().eq_ignore_ascii_case("clear") {
        None
    } else {
        Some(DueDate::parse(text)?)
    };
    let task = &mut board.tasks[pos];
    task.due_date = due;
    let context = task.context.clone();
    board.invalidate(Some(&context));
    Ok(())
}

/// Add a tag to the task at `pos`. Adding an existing tag is a no-op.
pub fn add_tag(board: &mut Board, pos: usize, tag: &str) {
    let task = &mut board.tasks[pos];
    task.add_tag(tag);
    let context = task.context.clone();
    board.invalidate(Some(&context));
}

/// Remove a tag from the task at `pos`. Missing tags are ignored.
pub fn remove_tag(board: &mut Board, pos: usize, tag: &str) {
    let task = &mut board.tasks[pos];
    task.remove_tag(tag);
    let context = task.context.clone();
    board.invalidate(Some(&context));
}

// ---------------------------------------------------------------------------
// Reordering
// ---------------------------------------------------------------------------

/// Direction for moving a task within its view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Swap the task at `view[index]` with its neighbour in `view`. Returns the
/// task's new index in the view, or `None` when it is already at that end.
pub fn move_in_view(
    board: &mut Board,
    view: &[usize],
    index: usize,
    direction: Direction,
) -> Option<usize> {
    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => {
            if index + 1 >= view.len() {
                return None;
            }
            index + 1
        }
    };
    board.tasks.swap(view[index], view[target]);
    board.invalidate(None);
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::default_tasks;
    use crate::model::view_cache::filter_positions;

    fn sample_board() -> Board {
        Board::new(default_tasks())
    }

    fn assert_cache_matches_filter(board: &mut Board) {
        for ctx in board.contexts.clone() {
            let cached = board.context_view(&ctx);
            assert_eq!(cached, filter_positions(&board.tasks, &ctx), "context {}", ctx);
        }
    }

    #[test]
    fn test_add_task_selects_new_task() {
        let mut board = sample_board();
        board.current_view();
        let pos = add_task(&mut board, "Task 4");
        assert_eq!(pos, 3);
        assert_eq!(board.tasks[3].context, "Work");
        assert_eq!(board.selected, 2);
        assert!(board.is_dirty());
        assert_cache_matches_filter(&mut board);
    }

    #[test]
    fn test_delete_task_invalidates_views() {
        let mut board = sample_board();
        board.context_view("Work");
        board.context_view("Personal");
        let removed = delete_task(&mut board, 0);
        assert_eq!(removed.text, "Task 1");
        assert_eq!(board.context_view("Personal"), vec![0]);
        assert_eq!(board.context_view("Work"), vec![1]);
        assert_cache_matches_filter(&mut board);
    }

    #[test]
    fn test_selection_after_delete() {
        // last row of three
        assert_eq!(selection_after_delete(2, 3), 1);
        // middle row stays
        assert_eq!(selection_after_delete(1, 3), 1);
        // first row never goes negative
        assert_eq!(selection_after_delete(0, 1), 0);
        // stale index past the end
        assert_eq!(selection_after_delete(7, 3), 6);
    }

    #[test]
    fn test_edit_and_toggle() {
        let mut board = sample_board();
        edit_task(&mut board, 2, "Renamed");
        toggle_checked(&mut board, 2);
        assert_eq!(board.tasks[2].text, "Renamed");
        assert!(board.tasks[2].checked);
        assert_cache_matches_filter(&mut board);
    }

    #[test]
    fn test_priority_cycle_four_times_is_identity() {
        let mut board = sample_board();
        let original = board.tasks[0].priority;
        for _ in 0..4 {
            cycle_priority(&mut board, 0);
        }
        assert_eq!(board.tasks[0].priority, original);
    }

    #[test]
    fn test_set_due_date_and_clear() {
        let mut board = sample_board();
        set_due_date(&mut board, 0, "2025-06-01").unwrap();
        assert_eq!(board.tasks[0].due_date.unwrap().to_string(), "2025-06-01");

        let err = set_due_date(&mut board, 0, "June first").unwrap_err();
        assert_eq!(err, ActionError::InvalidDateFormat);
        assert!(board.tasks[0].due_date.is_some());

        set_due_date(&mut board, 0, "CLEAR").unwrap();
        assert!(board.tasks[0].due_date.is_none());
    }

    #[test]
    fn test_tags() {
        let mut board = sample_board();
        add_tag(&mut board, 1, "home");
        add_tag(&mut board, 1, "home");
        add_tag(&mut board, 1, "weekend");
        assert_eq!(board.tasks[1].tags, vec!["home", "weekend"]);
        remove_tag(&mut board, 1, "home");
        remove_tag(&mut board, 1, "nope");
        assert_eq!(board.tasks[1].tags, vec!["weekend"]);
    }

    #[test]
    fn test_move_in_view() {
        let mut board = sample_board();
        let view = board.current_view();
        assert_eq!(move_in_view(&mut board, &view, 0, Direction::Up), None);
        assert_eq!(move_in_view(&mut board, &view, 0, Direction::Down), Some(1));
        let texts: Vec<&str> = board.tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Task 3", "Task 2", "Task 1"]);
        let view = board.current_view();
        assert_eq!(move_in_view(&mut board, &view, 1, Direction::Down), None);
        assert_cache_matches_filter(&mut board);
    }
}
