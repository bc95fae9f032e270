use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::io::atomic_write;
use crate::model::keybinds::KeybindTable;
use crate::model::task::{Task, default_tasks};

/// Error type for task and keybind file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Locations of the files in the config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub dir: PathBuf,
    pub tasks: PathBuf,
    pub keybinds: PathBuf,
    pub config: PathBuf,
    pub log: PathBuf,
}

impl StorePaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        StorePaths {
            tasks: dir.join("tasks.json"),
            keybinds: dir.join("keybinds.json"),
            config: dir.join("config.toml"),
            log: dir.join("tuido.log"),
            dir,
        }
    }

    /// `$XDG_CONFIG_HOME/tuido` (or the platform equivalent)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tuido"))
    }
}

/// Create the config directory and write default task and keybind files
/// where none exist yet.
pub fn ensure_store(paths: &StorePaths) -> Result<(), StoreError> {
    fs::create_dir_all(&paths.dir).map_err(|e| StoreError::WriteError {
        path: paths.dir.clone(),
        source: e,
    })?;
    if !paths.tasks.exists() {
        tracing::info!(path = %paths.tasks.display(), "writing default tasks");
        save_tasks(&paths.tasks, &default_tasks())?;
    }
    if !paths.keybinds.exists() {
        tracing::info!(path = %paths.keybinds.display(), "writing default keybinds");
        save_keybinds(&paths.keybinds, &KeybindTable::default())?;
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| StoreError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the task list strictly
pub fn read_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    read_json(path)
}

/// Load the task list, falling back to the built-in defaults when the file
/// is missing or unreadable.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    match read_tasks(path) {
        Ok(tasks) => {
            tracing::debug!(count = tasks.len(), "tasks loaded");
            tasks
        }
        Err(e) => {
            tracing::warn!(error = %e, "using default tasks");
            default_tasks()
        }
    }
}

/// Load the keybind table, falling back to defaults when the file is
/// missing or unreadable. Missing actions are backfilled; unknown ones are
/// dropped.
pub fn load_keybinds(path: &Path) -> KeybindTable {
    match read_json::<IndexMap<String, String>>(path) {
        Ok(raw) => {
            let (table, unknown) = KeybindTable::from_raw(raw);
            if !unknown.is_empty() {
                tracing::warn!(actions = ?unknown, "ignoring unknown keybind actions");
            }
            table
        }
        Err(e) => {
            tracing::warn!(error = %e, "using default keybinds");
            KeybindTable::default()
        }
    }
}

/// Overwrite the task file
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(tasks)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(count = tasks.len(), "tasks saved");
    Ok(())
}

/// Overwrite the keybind file
pub fn save_keybinds(path: &Path, keybinds: &KeybindTable) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(&keybinds.to_raw())?;
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!("keybinds saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keybinds::{Action, KeyId};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn ensure_store_writes_defaults_once() {
        let tmp = TempDir::new().unwrap();
        let paths = StorePaths::new(tmp.path().join("tuido"));
        ensure_store(&paths).unwrap();
        assert_eq!(read_tasks(&paths.tasks).unwrap(), default_tasks());

        save_tasks(&paths.tasks, &[]).unwrap();
        ensure_store(&paths).unwrap();
        assert!(read_tasks(&paths.tasks).unwrap().is_empty());
    }

    #[test]
    fn tasks_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut tasks = default_tasks();
        tasks[0].add_tag("urgent");
        save_tasks(&path, &tasks).unwrap();
        assert_eq!(load_tasks(&path), tasks);
    }

    #[test]
    fn corrupt_tasks_fall_back_independently() {
        let tmp = TempDir::new().unwrap();
        let paths = StorePaths::new(tmp.path());
        fs::write(&paths.tasks, "not json {{{").unwrap();
        fs::write(&paths.keybinds, r#"{"edit": "E"}"#).unwrap();

        assert_eq!(load_tasks(&paths.tasks), default_tasks());
        let keys = load_keybinds(&paths.keybinds);
        assert_eq!(keys.key_for(Action::Edit), &KeyId::new("E"));
        assert_eq!(keys.key_for(Action::Quit), &KeyId::new("q"));
    }

    #[test]
    fn loose_due_dates_keep_the_task_list() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(
            &path,
            r#"[
  {"task": "Pay rent", "checked": false, "context": "Home"},
  {"task": "Report", "checked": false, "context": "Work", "due_date": "2025-02-30"},
  {"task": "Someday", "checked": true, "context": "Work", "due_date": "later"}
]"#,
        )
        .unwrap();

        let tasks = load_tasks(&path);
        assert_ne!(tasks, default_tasks());
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Pay rent", "Report", "Someday"]);
        assert_eq!(tasks[1].due_date.unwrap().to_string(), "2025-02-30");
        assert_eq!(tasks[2].due_date, None);
    }

    #[test]
    fn missing_keybinds_fall_back() {
        let tmp = TempDir::new().unwrap();
        let keys = load_keybinds(&tmp.path().join("nope.json"));
        assert_eq!(keys, KeybindTable::default());
    }

    #[test]
    fn keybinds_saved_in_canonical_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keybinds.json");
        save_keybinds(&path, &KeybindTable::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let toggle = text.find("\"toggle\"").unwrap();
        let redo = text.find("\"redo\"").unwrap();
        assert!(toggle < redo);
        assert_eq!(load_keybinds(&path), KeybindTable::default());
    }
}
