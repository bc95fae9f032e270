use crate::model::{Action, KeyId};
use crate::tui::app::{App, Mode};

pub(super) fn handle_keybind_list(app: &mut App, selected: usize, key: &KeyId) {
    let count = app.keybinds.len();
    match key.as_str() {
        KeyId::UP => {
            app.mode = Mode::KeybindList {
                selected: (selected + count - 1) % count,
            };
        }
        KeyId::DOWN => {
            app.mode = Mode::KeybindList {
                selected: (selected + 1) % count,
            };
        }
        KeyId::ENTER => {
            app.mode = Mode::KeybindEdit {
                action: app.keybinds.action_at(selected),
                list_selected: selected,
            };
        }
        KeyId::ESC => {
            tracing::debug!("keybind list closed");
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

pub(super) fn handle_keybind_edit(
    app: &mut App,
    action: Action,
    list_selected: usize,
    key: &KeyId,
) {
    if key.is_cancel() {
        app.mode = Mode::KeybindList {
            selected: list_selected,
        };
        app.clear_error();
        return;
    }
    if !key.is_assignable() {
        return;
    }
    match app.keybinds.rebind(action, key.clone()) {
        Ok(()) => {
            tracing::info!(action = %action, key = %key, "keybind changed");
            app.mode = Mode::KeybindList {
                selected: list_selected,
            };
            app.clear_error();
        }
        Err(e) => app.set_error(e),
    }
}
