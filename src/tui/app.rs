use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::io::store_io::{StoreError, StorePaths, load_keybinds, load_tasks, save_keybinds, save_tasks};
use crate::model::{Action, ActionError, AppConfig, Board, KeybindTable, Task};
use crate::ops::search::search_tasks;

use super::input;
use super::input::prompt::TerminalPrompt;
use super::render;
use super::theme::Theme;
use super::undo::UndoStack;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Browsing the keybind list
    KeybindList { selected: usize },
    /// Waiting for the new key of one action
    KeybindEdit { action: Action, list_selected: usize },
}

/// Read-only panels drawn over the normal view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Kanban,
    Stats,
}

/// An active search overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub query: String,
    /// Task-list positions of the matches, in list order
    pub results: Vec<usize>,
    /// Context and selection restored when the overlay closes
    pub saved_context: String,
    pub saved_selected: usize,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub keybinds: KeybindTable,
    pub undo: UndoStack,
    pub mode: Mode,
    pub search: Option<SearchSession>,
    pub panel: Option<Panel>,
    /// Most recent error, shown until the next successful action
    pub error: Option<ActionError>,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help_line: bool,
}

impl App {
    pub fn new(tasks: Vec<Task>, keybinds: KeybindTable, config: &AppConfig) -> Self {
        App {
            board: Board::new(tasks),
            keybinds,
            undo: UndoStack::new(),
            mode: Mode::Normal,
            search: None,
            panel: None,
            error: None,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_help_line: config.ui.show_help_line,
        }
    }

    pub fn in_search(&self) -> bool {
        self.search.is_some()
    }

    /// Task positions currently on screen: the search results while the
    /// overlay is active, otherwise the current context's view.
    pub fn view(&mut self) -> Vec<usize> {
        match &self.search {
            Some(session) => session.results.clone(),
            None => self.board.current_view(),
        }
    }

    /// Selection wrapped into the visible view, `None` when it is empty
    pub fn selected_index(&mut self) -> Option<usize> {
        let len = self.view().len();
        (len > 0).then(|| self.board.selected % len)
    }

    /// Task-list position of the selected row
    pub fn selected_position(&mut self) -> Option<usize> {
        let index = self.selected_index()?;
        Some(self.view()[index])
    }

    /// Move the selection by `delta` rows, wrapping at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selected_index() else {
            return;
        };
        let len = self.view().len() as isize;
        self.board.selected = (current as isize + delta).rem_euclid(len) as usize;
    }

    /// Open the search overlay on `query`. Fails with `NoMatches` (and
    /// leaves the overlay closed) when nothing matches.
    pub fn enter_search(&mut self, query: &str) -> Result<(), ActionError> {
        let results = search_tasks(&self.board.tasks, query);
        if results.is_empty() {
            return Err(ActionError::NoMatches(query.to_string()));
        }
        tracing::debug!(query = %query, matches = results.len(), "search opened");
        self.search = Some(SearchSession {
            query: query.to_string(),
            results,
            saved_context: self.board.current_context.clone(),
            saved_selected: self.board.selected,
        });
        self.board.selected = 0;
        Ok(())
    }

    /// Close the search overlay, restoring the saved context and selection.
    pub fn exit_search(&mut self) {
        let Some(session) = self.search.take() else {
            return;
        };
        if self.board.has_context(&session.saved_context) {
            self.board.current_context = session.saved_context;
            self.board.selected = session.saved_selected;
        } else {
            self.board.current_context = self.board.contexts.first().cloned().unwrap_or_default();
            self.board.selected = 0;
        }
        tracing::debug!("search closed");
    }

    /// Rerun the active query after a mutation. Closes the overlay when
    /// nothing matches any more.
    pub fn refresh_search(&mut self) {
        let Some(session) = &mut self.search else {
            return;
        };
        session.results = search_tasks(&self.board.tasks, &session.query);
        if session.results.is_empty() {
            self.exit_search();
        }
    }

    pub fn set_error(&mut self, error: ActionError) {
        tracing::debug!(error = %error, "action failed");
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Decides when the task list is written between events: only when the
/// board is dirty and the interval has passed since the last save.
#[derive(Debug, Clone, Copy)]
pub struct SaveClock {
    interval: Duration,
    last_save: Instant,
}

impl SaveClock {
    pub fn new(interval_secs: f64, now: Instant) -> Self {
        let interval = Duration::try_from_secs_f64(interval_secs).unwrap_or_else(|_| {
            tracing::warn!(interval_secs, "invalid autosave interval, using 2s");
            Duration::from_secs(2)
        });
        SaveClock {
            interval,
            last_save: now,
        }
    }

    pub fn due(&self, dirty: bool, now: Instant) -> bool {
        dirty && now.saturating_duration_since(self.last_save) >= self.interval
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_save = now;
    }
}

/// Load the store, run the TUI until quit, and save on the way out.
pub fn run(paths: &StorePaths, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = load_tasks(&paths.tasks);
    let keybinds = load_keybinds(&paths.keybinds);
    let mut app = App::new(tasks, keybinds, config);
    tracing::info!(
        tasks = app.board.tasks.len(),
        contexts = app.board.contexts.len(),
        "starting tui"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, paths, config);

    // Both files are written at shutdown regardless of the dirty flag
    let saved = save_all(&mut app, paths);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("tui closed");
    result?;
    saved?;
    Ok(())
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    paths: &StorePaths,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut clock = SaveClock::new(config.autosave_secs, Instant::now());
    let mut backdrop = Buffer::empty(Rect::default());
    loop {
        let completed = terminal.draw(|frame| render::render(frame, app))?;
        backdrop.clone_from(completed.buffer);

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(id) = input::key_id(key)
        {
            let theme = app.theme.clone();
            let mut prompt = TerminalPrompt::new(terminal, &backdrop, &theme);
            input::handle_key(app, &id, &mut prompt);
        }

        let now = Instant::now();
        if clock.due(app.board.is_dirty(), now) {
            match save_tasks(&paths.tasks, &app.board.tasks) {
                Ok(()) => app.board.mark_saved(),
                Err(e) => tracing::error!(error = %e, "autosave failed"),
            }
            clock.mark(now);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Write tasks and keybinds, attempting both even if the first fails.
fn save_all(app: &mut App, paths: &StorePaths) -> Result<(), StoreError> {
    let tasks = save_tasks(&paths.tasks, &app.board.tasks);
    if tasks.is_ok() {
        app.board.mark_saved();
    }
    let keybinds = save_keybinds(&paths.keybinds, &app.keybinds);
    if let Err(e) = &tasks {
        tracing::error!(error = %e, "saving tasks at shutdown failed");
    }
    if let Err(e) = &keybinds {
        tracing::error!(error = %e, "saving keybinds at shutdown failed");
    }
    tasks.and(keybinds)
}
