mod keybinds;
mod navigate;
pub mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Action, KeyId};

use super::app::{App, Mode};
use super::dispatch::run_action;
use prompt::Prompt;

use keybinds::*;
use navigate::*;

/// Handle one resolved key in the current mode
pub fn handle_key(app: &mut App, key: &KeyId, prompt: &mut dyn Prompt) {
    // Cancel always leaves search, closing any panel opened over it
    if app.in_search() && key.is_cancel() {
        app.panel = None;
        run_action(app, Action::ExitSearch, prompt);
        return;
    }

    // Open panels swallow all other input
    if let Some(panel) = app.panel {
        handle_panel(app, panel, key);
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal(app, key, prompt),
        Mode::KeybindList { selected } => handle_keybind_list(app, selected, key),
        Mode::KeybindEdit {
            action,
            list_selected,
        } => handle_keybind_edit(app, action, list_selected, key),
    }
}

/// Resolve a terminal key event into a key identifier. Bare modifier
/// presses and keys without a name yield `None`.
pub fn key_id(key: KeyEvent) -> Option<KeyId> {
    let name = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(KeyId::new(format!("KEY_CTRL_{}", c.to_ascii_uppercase())));
        }
        KeyCode::Char(c)
            if key.modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_lowercase() =>
        {
            return Some(KeyId::char(c.to_ascii_uppercase()));
        }
        KeyCode::Char(c) => return Some(KeyId::char(c)),
        KeyCode::Up => KeyId::UP,
        KeyCode::Down => KeyId::DOWN,
        KeyCode::Left => KeyId::LEFT,
        KeyCode::Right => KeyId::RIGHT,
        KeyCode::Esc => KeyId::ESC,
        KeyCode::Enter => KeyId::ENTER,
        KeyCode::Backspace => KeyId::BACKSPACE,
        KeyCode::Tab => KeyId::TAB,
        KeyCode::BackTab => "KEY_BTAB",
        KeyCode::Home => "KEY_HOME",
        KeyCode::End => "KEY_END",
        KeyCode::PageUp => "KEY_PPAGE",
        KeyCode::PageDown => "KEY_NPAGE",
        KeyCode::Delete => "KEY_DC",
        KeyCode::Insert => "KEY_IC",
        KeyCode::F(n) => return Some(KeyId::new(format!("KEY_F{}", n))),
        _ => return None,
    };
    Some(KeyId::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionError, AppConfig, KeybindTable, default_tasks};
    use crate::tui::app::Panel;
    use crate::tui::input::prompt::ScriptedPrompt;

    fn app() -> App {
        App::new(default_tasks(), KeybindTable::default(), &AppConfig::default())
    }

    fn press(app: &mut App, key: &str) {
        handle_key(app, &KeyId::new(key), &mut ScriptedPrompt::new());
    }

    #[test]
    fn key_ids_from_events() {
        let plain = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_id(plain), Some(KeyId::new("a")));
        let shifted = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::SHIFT);
        assert_eq!(key_id(shifted), Some(KeyId::new("D")));
        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_id(ctrl), Some(KeyId::new("KEY_CTRL_C")));
        let arrow = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(key_id(arrow), Some(KeyId::new(KeyId::LEFT)));
        let f5 = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_id(f5), Some(KeyId::new("KEY_F5")));
        let caps = KeyEvent::new(KeyCode::CapsLock, KeyModifiers::NONE);
        assert_eq!(key_id(caps), None);
    }

    #[test]
    fn stats_panel_closes_on_any_key() {
        let mut app = app();
        press(&mut app, "s");
        assert_eq!(app.panel, Some(Panel::Stats));
        press(&mut app, "x");
        assert_eq!(app.panel, None);
    }

    #[test]
    fn kanban_panel_closes_on_escape_or_q() {
        let mut app = app();
        press(&mut app, "v");
        press(&mut app, "x");
        assert_eq!(app.panel, Some(Panel::Kanban));
        // q closes the panel without quitting
        press(&mut app, "q");
        assert_eq!(app.panel, None);
        assert!(!app.should_quit);
    }

    #[test]
    fn keybind_list_round_trip() {
        let mut app = app();
        press(&mut app, "k");
        assert_eq!(app.mode, Mode::KeybindList { selected: 0 });
        press(&mut app, KeyId::UP);
        let last = Action::ALL.len() - 1;
        assert_eq!(app.mode, Mode::KeybindList { selected: last });
        press(&mut app, KeyId::DOWN);
        press(&mut app, KeyId::DOWN);
        press(&mut app, KeyId::ENTER);
        assert_eq!(
            app.mode,
            Mode::KeybindEdit {
                action: Action::Edit,
                list_selected: 1
            }
        );

        // Non-assignable keys are ignored
        press(&mut app, KeyId::TAB);
        assert!(matches!(app.mode, Mode::KeybindEdit { .. }));

        press(&mut app, "E");
        assert_eq!(app.mode, Mode::KeybindList { selected: 1 });
        assert_eq!(app.keybinds.key_for(Action::Edit), &KeyId::new("E"));

        press(&mut app, KeyId::ESC);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn keybind_edit_rejects_taken_key() {
        let mut app = app();
        app.mode = Mode::KeybindEdit {
            action: Action::Edit,
            list_selected: 1,
        };
        press(&mut app, "/");
        assert_eq!(app.error, Some(ActionError::DuplicateBinding("/".into())));
        assert!(matches!(app.mode, Mode::KeybindEdit { .. }));

        press(&mut app, KeyId::ESC);
        assert_eq!(app.mode, Mode::KeybindList { selected: 1 });
        assert_eq!(app.error, None);
        assert_eq!(app.keybinds.key_for(Action::Edit), &KeyId::new("e"));
    }

    #[test]
    fn escape_exits_search_first() {
        let mut app = app();
        app.enter_search("task").unwrap();
        press(&mut app, KeyId::ESC);
        assert!(!app.in_search());
    }

    #[test]
    fn escape_leaves_search_through_open_panel() {
        let mut app = app();
        app.enter_search("task").unwrap();
        press(&mut app, "s");
        assert_eq!(app.panel, Some(Panel::Stats));

        press(&mut app, KeyId::ESC);
        assert_eq!(app.panel, None);
        assert!(!app.in_search());
        assert_eq!(app.board.current_context, "Work");
    }

    #[test]
    fn rebound_exit_search_key_works() {
        let mut app = app();
        app.keybinds.rebind(Action::ExitSearch, KeyId::new("x")).unwrap();
        app.enter_search("task").unwrap();
        press(&mut app, "x");
        assert!(!app.in_search());
    }

    #[test]
    fn escape_dismisses_error_in_normal() {
        let mut app = app();
        app.set_error(ActionError::NothingToUndo);
        press(&mut app, KeyId::ESC);
        assert_eq!(app.error, None);
    }
}
