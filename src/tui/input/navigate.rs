use crate::model::{Action, KeyId};
use crate::tui::app::{App, Panel};
use crate::tui::dispatch::{resolve, run_action};

use super::prompt::Prompt;

pub(super) fn handle_normal(app: &mut App, key: &KeyId, prompt: &mut dyn Prompt) {
    // Cancel, or the exit_search binding, closes the overlay before any
    // other interpretation
    if app.in_search() && (key.is_cancel() || app.keybinds.key_for(Action::ExitSearch) == key) {
        run_action(app, Action::ExitSearch, prompt);
        return;
    }

    match resolve(app, key) {
        Some(action) => run_action(app, action, prompt),
        None if key.is_cancel() => app.clear_error(),
        None => {}
    }
}

pub(super) fn handle_panel(app: &mut App, panel: Panel, key: &KeyId) {
    let close = match panel {
        Panel::Stats => true,
        Panel::Kanban => key.is_cancel() || key.is("q"),
    };
    if close {
        app.panel = None;
    }
}
