use crate::model::{Action, ActionError, KeyId};
use crate::ops::context_ops;
use crate::ops::task_ops::{self, Direction};
use crate::tui::app::{App, Mode, Panel};
use crate::tui::input::prompt::Prompt;

/// Actions that change task data. The board is snapshotted before they run.
pub fn is_mutating(action: Action) -> bool {
    matches!(
        action,
        Action::Toggle
            | Action::Edit
            | Action::AddTask
            | Action::DeleteTask
            | Action::AddTag
            | Action::SetDueDate
            | Action::TogglePriority
            | Action::RemoveTag
            | Action::MoveTaskUp
            | Action::MoveTaskDown
    )
}

/// Actions a key press can reach from the normal view
pub fn available_in_normal(action: Action) -> bool {
    action != Action::ExitSearch
}

/// Actions that close the search overlay (restoring the saved context and
/// selection) before they run.
pub fn leaves_search(action: Action) -> bool {
    matches!(
        action,
        Action::AddTask
            | Action::AddContext
            | Action::RenameContext
            | Action::DeleteContext
            | Action::NextContext
            | Action::PreviousContext
            | Action::SearchTasks
            | Action::EditKeybinds
            | Action::Undo
            | Action::Redo
    )
}

/// Look up the action bound to `key` in the normal view. With no contexts
/// only `add_context` and `quit` resolve.
pub fn resolve(app: &App, key: &KeyId) -> Option<Action> {
    let action = app.keybinds.action_for(key, available_in_normal)?;
    if !app.board.has_contexts() && !matches!(action, Action::AddContext | Action::Quit) {
        return None;
    }
    Some(action)
}

/// Run one action: snapshot if it mutates, execute it, and record the
/// outcome in the error slot.
pub fn run_action(app: &mut App, action: Action, prompt: &mut dyn Prompt) {
    if app.in_search() && leaves_search(action) {
        app.exit_search();
    }
    if is_mutating(action) {
        app.undo.snapshot(&app.board);
    }
    tracing::debug!(action = %action, "dispatch");
    match perform(app, action, prompt) {
        Ok(()) => app.clear_error(),
        Err(e) => app.set_error(e),
    }
    if is_mutating(action) {
        app.refresh_search();
    }
}

fn perform(app: &mut App, action: Action, prompt: &mut dyn Prompt) -> Result<(), ActionError> {
    match action {
        Action::Toggle => {
            if let Some(pos) = app.selected_position() {
                task_ops::toggle_checked(&mut app.board, pos);
            }
        }
        Action::Edit => {
            let Some(pos) = app.selected_position() else {
                return Ok(());
            };
            if let Some(text) = prompt.ask("Edit task: ", false)? {
                task_ops::edit_task(&mut app.board, pos, &text);
            }
        }
        Action::AddTask => {
            if let Some(text) = prompt.ask("Add new task: ", false)? {
                task_ops::add_task(&mut app.board, &text);
            }
        }
        Action::AddContext => {
            if let Some(name) = prompt.ask("Create new context: ", false)? {
                context_ops::add_context(&mut app.board, &name)?;
            }
        }
        Action::NextContext => context_ops::next_context(&mut app.board),
        Action::PreviousContext => context_ops::previous_context(&mut app.board),
        Action::MoveDown => app.move_selection(1),
        Action::MoveUp => app.move_selection(-1),
        Action::Quit => {
            tracing::info!("quit requested");
            app.should_quit = true;
        }
        Action::EditKeybinds => {
            tracing::debug!("keybind list opened");
            app.mode = Mode::KeybindList { selected: 0 };
        }
        Action::DeleteTask => {
            let Some(index) = app.selected_index() else {
                return Ok(());
            };
            let view = app.view();
            task_ops::delete_task(&mut app.board, view[index]);
            app.board.selected = task_ops::selection_after_delete(index, view.len());
        }
        Action::DeleteContext => {
            context_ops::ensure_deletable(&app.board)?;
            let label = format!("Delete context '{}'? (y/n): ", app.board.current_context);
            if let Some(answer) = prompt.ask(&label, true)?
                && matches!(answer.as_str(), "y" | "Y")
            {
                context_ops::delete_context(&mut app.board)?;
            }
        }
        Action::RenameContext => {
            let label = format!("Rename '{}' to: ", app.board.current_context);
            if let Some(name) = prompt.ask(&label, false)? {
                context_ops::rename_context(&mut app.board, &name)?;
            }
        }
        Action::KanbanView => app.panel = Some(Panel::Kanban),
        Action::ShowStats => app.panel = Some(Panel::Stats),
        Action::AddTag => {
            let Some(pos) = app.selected_position() else {
                return Ok(());
            };
            if let Some(tag) = prompt.ask("Add tag: ", false)? {
                task_ops::add_tag(&mut app.board, pos, &tag);
            }
        }
        Action::SetDueDate => {
            let Some(pos) = app.selected_position() else {
                return Ok(());
            };
            if let Some(text) = prompt.ask("Due date (YYYY-MM-DD or 'clear'): ", false)? {
                task_ops::set_due_date(&mut app.board, pos, &text)?;
            }
        }
        Action::SearchTasks => {
            if let Some(query) = prompt.ask("Search: ", false)? {
                app.enter_search(&query)?;
            }
        }
        Action::TogglePriority => {
            if let Some(pos) = app.selected_position() {
                task_ops::cycle_priority(&mut app.board, pos);
            }
        }
        Action::Undo => app.undo.undo(&mut app.board)?,
        Action::Redo => app.undo.redo(&mut app.board)?,
        Action::ExitSearch => app.exit_search(),
        Action::RemoveTag => {
            let Some(pos) = app.selected_position() else {
                return Ok(());
            };
            if app.board.tasks[pos].tags.is_empty() {
                return Ok(());
            }
            if let Some(tag) = prompt.ask("Remove tag: ", false)? {
                task_ops::remove_tag(&mut app.board, pos, &tag);
            }
        }
        Action::MoveTaskUp => move_selected(app, Direction::Up),
        Action::MoveTaskDown => move_selected(app, Direction::Down),
    }
    Ok(())
}

/// Reorder the selected task inside its context. Search results are not
/// reorderable.
fn move_selected(app: &mut App, direction: Direction) {
    if app.in_search() {
        return;
    }
    let view = app.board.current_view();
    if view.is_empty() {
        return;
    }
    let index = app.board.selected % view.len();
    if let Some(moved) = task_ops::move_in_view(&mut app.board, &view, index, direction) {
        app.board.selected = moved;
    }
}
