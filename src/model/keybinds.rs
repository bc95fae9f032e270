use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::error::ActionError;

/// Every action a key can be bound to. The set is closed; loaded keybind
/// files are reconciled against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Toggle,
    Edit,
    AddTask,
    AddContext,
    NextContext,
    PreviousContext,
    MoveDown,
    MoveUp,
    Quit,
    EditKeybinds,
    DeleteTask,
    DeleteContext,
    RenameContext,
    KanbanView,
    ShowStats,
    AddTag,
    SetDueDate,
    SearchTasks,
    TogglePriority,
    Undo,
    ExitSearch,
    Redo,
    RemoveTag,
    MoveTaskUp,
    MoveTaskDown,
}

impl Action {
    /// Canonical order, used for the keybind list and for lookups
    pub const ALL: [Action; 25] = [
        Action::Toggle,
        Action::Edit,
        Action::AddTask,
        Action::AddContext,
        Action::NextContext,
        Action::PreviousContext,
        Action::MoveDown,
        Action::MoveUp,
        Action::Quit,
        Action::EditKeybinds,
        Action::DeleteTask,
        Action::DeleteContext,
        Action::RenameContext,
        Action::KanbanView,
        Action::ShowStats,
        Action::AddTag,
        Action::SetDueDate,
        Action::SearchTasks,
        Action::TogglePriority,
        Action::Undo,
        Action::ExitSearch,
        Action::Redo,
        Action::RemoveTag,
        Action::MoveTaskUp,
        Action::MoveTaskDown,
    ];

    /// Identifier used in the keybind file
    pub fn id(self) -> &'static str {
        match self {
            Action::Toggle => "toggle",
            Action::Edit => "edit",
            Action::AddTask => "add_task",
            Action::AddContext => "add_context",
            Action::NextContext => "next_context",
            Action::PreviousContext => "previous_context",
            Action::MoveDown => "move_down",
            Action::MoveUp => "move_up",
            Action::Quit => "quit",
            Action::EditKeybinds => "edit_keybinds",
            Action::DeleteTask => "delete_task",
            Action::DeleteContext => "delete_context",
            Action::RenameContext => "rename_context",
            Action::KanbanView => "kanban_view",
            Action::ShowStats => "show_stats",
            Action::AddTag => "add_tag",
            Action::SetDueDate => "set_due_date",
            Action::SearchTasks => "search_tasks",
            Action::TogglePriority => "toggle_priority",
            Action::Undo => "undo",
            Action::ExitSearch => "exit_search",
            Action::Redo => "redo",
            Action::RemoveTag => "remove_tag",
            Action::MoveTaskUp => "move_task_up",
            Action::MoveTaskDown => "move_task_down",
        }
    }

    /// Default key for this action
    pub fn default_key(self) -> KeyId {
        let key = match self {
            Action::Toggle => " ",
            Action::Edit => "e",
            Action::AddTask => "a",
            Action::AddContext => "n",
            Action::NextContext => KeyId::RIGHT,
            Action::PreviousContext => KeyId::LEFT,
            Action::MoveDown => KeyId::DOWN,
            Action::MoveUp => KeyId::UP,
            Action::Quit => "q",
            Action::EditKeybinds => "k",
            Action::DeleteTask => "d",
            Action::DeleteContext => "D",
            Action::RenameContext => "r",
            Action::KanbanView => "v",
            Action::ShowStats => "s",
            Action::AddTag => "t",
            Action::SetDueDate => "u",
            Action::SearchTasks => "/",
            Action::TogglePriority => "p",
            Action::Undo => "z",
            Action::ExitSearch => KeyId::ESC,
            Action::Redo => "y",
            Action::RemoveTag => "T",
            Action::MoveTaskUp => "K",
            Action::MoveTaskDown => "J",
        };
        KeyId::new(key)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL.into_iter().find(|a| a.id() == s).ok_or(())
    }
}

/// A resolved key identifier: a printable character stands for itself,
/// named keys use `KEY_*`/`ESC`/`ENTER` style names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    pub const UP: &'static str = "KEY_UP";
    pub const DOWN: &'static str = "KEY_DOWN";
    pub const LEFT: &'static str = "KEY_LEFT";
    pub const RIGHT: &'static str = "KEY_RIGHT";
    pub const ESC: &'static str = "ESC";
    pub const ENTER: &'static str = "ENTER";
    pub const BACKSPACE: &'static str = "BACKSPACE";
    pub const TAB: &'static str = "TAB";

    pub fn new(s: impl Into<String>) -> Self {
        KeyId(s.into())
    }

    pub fn char(c: char) -> Self {
        KeyId(c.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }

    pub fn is_cancel(&self) -> bool {
        self.is(Self::ESC)
    }

    /// The single printable character this key stands for, if any
    pub fn printable(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Keys that may be bound to an action: printable characters and arrows
    pub fn is_assignable(&self) -> bool {
        self.printable().is_some()
            || matches!(self.0.as_str(), Self::UP | Self::DOWN | Self::LEFT | Self::RIGHT)
    }

    /// Short label for help lines and the keybind list
    pub fn label(&self) -> String {
        match self.0.as_str() {
            Self::UP => "\u{2191}".into(),
            Self::DOWN => "\u{2193}".into(),
            Self::LEFT => "\u{2190}".into(),
            Self::RIGHT => "\u{2192}".into(),
            " " => "SPACE".into(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Action → key mapping, always holding exactly one key per action in
/// canonical action order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindTable {
    binds: IndexMap<Action, KeyId>,
}

impl Default for KeybindTable {
    fn default() -> Self {
        KeybindTable {
            binds: Action::ALL.into_iter().map(|a| (a, a.default_key())).collect(),
        }
    }
}

impl KeybindTable {
    /// Reconcile a raw `action → key` mapping: unknown action names are
    /// returned separately, missing actions are backfilled from defaults.
    pub fn from_raw(raw: IndexMap<String, String>) -> (KeybindTable, Vec<String>) {
        let mut table = KeybindTable::default();
        let mut unknown = Vec::new();
        for (name, key) in raw {
            match name.parse::<Action>() {
                Ok(action) => {
                    table.binds.insert(action, KeyId::new(key));
                }
                Err(()) => unknown.push(name),
            }
        }
        (table, unknown)
    }

    /// Serializable form, in canonical order
    pub fn to_raw(&self) -> IndexMap<String, String> {
        self.iter()
            .map(|(a, k)| (a.id().to_string(), k.as_str().to_string()))
            .collect()
    }

    pub fn key_for(&self, action: Action) -> &KeyId {
        &self.binds[&action]
    }

    /// First action in canonical order that passes `allowed` and is bound
    /// to `key`
    pub fn action_for(&self, key: &KeyId, allowed: impl Fn(Action) -> bool) -> Option<Action> {
        self.iter()
            .find(|(a, k)| allowed(*a) && *k == key)
            .map(|(a, _)| a)
    }

    /// Bind `key` to `action`. Fails if any other action already owns `key`;
    /// the table is unchanged on failure.
    pub fn rebind(&mut self, action: Action, key: KeyId) -> Result<(), ActionError> {
        if self.iter().any(|(a, k)| a != action && *k == key) {
            return Err(ActionError::DuplicateBinding(key.to_string()));
        }
        self.binds.insert(action, key);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, &KeyId)> {
        Action::ALL.into_iter().map(move |a| (a, &self.binds[&a]))
    }

    pub fn len(&self) -> usize {
        Action::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Action at a position in the keybind list
    pub fn action_at(&self, index: usize) -> Action {
        Action::ALL[index % Action::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_action_uniquely() {
        let table = KeybindTable::default();
        let mut keys: Vec<&KeyId> = table.iter().map(|(_, k)| k).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Action::ALL.len());
        assert_eq!(table.key_for(Action::SearchTasks).as_str(), "/");
        assert_eq!(
            table.action_for(&KeyId::new("KEY_DOWN"), |_| true),
            Some(Action::MoveDown)
        );
        let esc = KeyId::new(KeyId::ESC);
        assert_eq!(table.action_for(&esc, |_| true), Some(Action::ExitSearch));
        assert_eq!(table.action_for(&esc, |a| a != Action::ExitSearch), None);
    }

    #[test]
    fn from_raw_backfills_and_reports_unknown() {
        let mut raw = IndexMap::new();
        raw.insert("edit".to_string(), "E".to_string());
        raw.insert("fly".to_string(), "f".to_string());
        let (table, unknown) = KeybindTable::from_raw(raw);
        assert_eq!(table.key_for(Action::Edit).as_str(), "E");
        assert_eq!(table.key_for(Action::Quit).as_str(), "q");
        assert_eq!(unknown, vec!["fly"]);
        assert_eq!(table.to_raw().len(), Action::ALL.len());
    }

    #[test]
    fn rebind_rejects_duplicates() {
        let mut table = KeybindTable::default();
        table.rebind(Action::Edit, KeyId::new("x")).unwrap();
        table.rebind(Action::SearchTasks, KeyId::new("e")).unwrap();
        let before = table.clone();

        assert_eq!(
            table.rebind(Action::Edit, KeyId::new("e")),
            Err(ActionError::DuplicateBinding("e".into()))
        );
        assert_eq!(table, before);
        assert_eq!(table.key_for(Action::Edit).as_str(), "x");
    }

    #[test]
    fn rebind_to_own_key_is_allowed() {
        let mut table = KeybindTable::default();
        assert!(table.rebind(Action::Edit, KeyId::new("e")).is_ok());
    }

    #[test]
    fn assignable_keys() {
        assert!(KeyId::new("a").is_assignable());
        assert!(KeyId::new(" ").is_assignable());
        assert!(KeyId::new(KeyId::LEFT).is_assignable());
        assert!(!KeyId::new(KeyId::ESC).is_assignable());
        assert!(!KeyId::new(KeyId::ENTER).is_assignable());
        assert!(!KeyId::new("KEY_F1").is_assignable());
    }

    #[test]
    fn labels() {
        assert_eq!(KeyId::new(" ").label(), "SPACE");
        assert_eq!(KeyId::new(KeyId::UP).label(), "\u{2191}");
        assert_eq!(KeyId::new("x").label(), "x");
    }
}
