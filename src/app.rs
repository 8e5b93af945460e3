use crate::config::AppConfig;
use crate::domain::{Column, Command};
use crate::engine::{self, EngineError, EntryStore, NavState, Navigator};
use crate::scan::ScannedFile;
use std::path::{Path, PathBuf};

const MAX_LOG_LINES: usize = 500;

/// All mutable application state. Owned by the event loop and mutated only
/// inside the handler for the current event; the renderer reads it between
/// events.
pub struct App {
    pub config: AppConfig,
    store: EntryStore,
    nav: Navigator,
    pub logs: Vec<String>,
    pub show_help: bool,
    pub busy: bool,
    pub should_quit: bool,
    home_dir: PathBuf,
    target_dir: PathBuf,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let target_dir = home_dir.join(&config.target_dir);
        Self {
            config,
            store: EntryStore::default(),
            nav: Navigator::default(),
            logs: Vec::new(),
            show_help: false,
            busy: false,
            should_quit: false,
            home_dir,
            target_dir,
        }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn active_column(&self) -> Column {
        self.nav.active_column()
    }

    pub fn nav_state(&self, column: Column) -> NavState {
        self.nav.state(column)
    }

    pub fn active_len(&self) -> usize {
        self.store.partition_len(self.active_column().is_managed())
    }

    pub fn column_items(&self, column: Column) -> Vec<String> {
        self.store
            .partition(column.is_managed())
            .into_iter()
            .map(|(_, entry)| entry.label.clone())
            .collect()
    }

    /// Replaces the store with a fresh scan result. Classification does not
    /// survive a rescan; navigation starts over from the unmanaged column.
    pub fn apply_scan(&mut self, files: Vec<ScannedFile>) {
        self.store = EntryStore::load(files.into_iter().map(|file| (file.label, file.path)));
        self.nav.reset();
        self.log(format!("scanned {} candidate file(s)", self.store.len()));
    }

    /// Single synchronous dispatch over the closed command set. Rescan is the
    /// one command that needs the task channel and is handled by the caller.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::SwitchColumn => {
                self.nav.switch_column();
            }
            Command::MoveUp => self.nav.move_up(),
            Command::MoveDown => {
                let n = self.active_len();
                self.nav.move_down(n);
            }
            Command::Toggle => self.toggle_selected(),
            Command::EmitPlan => self.emit_plan(),
            Command::Rescan => {}
        }
    }

    fn toggle_selected(&mut self) {
        let cursor = self.nav.state(self.active_column()).cursor;
        match engine::toggle(&mut self.store, &mut self.nav, cursor) {
            Ok(store_index) => {
                let entry = &self.store.all()[store_index];
                let destination = if entry.managed { "managed" } else { "unmanaged" };
                self.log(format!("{} -> {destination}", entry.label));
            }
            // Empty partition; nothing to move and nothing to tell the user.
            Err(EngineError::NoSelection) => {}
            // Unreachable through the partition view; absorbed in release.
            Err(EngineError::IndexOutOfRange { .. }) => {}
        }
    }

    fn emit_plan(&mut self) {
        let operations = engine::plan(&self.store, &self.target_dir);
        if operations.is_empty() {
            self.log("plan: no files are managed yet".to_string());
            return;
        }
        for operation in &operations {
            let [first, second] = operation.describe();
            self.log(first);
            self.log(second);
        }
        self.log(format!(
            "plan: {} link(s) listed, nothing executed",
            operations.len()
        ));
    }

    /// Called by the renderer each frame with the list rows it can show, so
    /// the scroll window tracks the real terminal size.
    pub fn sync_viewport(&mut self, rows: usize) {
        self.nav.set_viewport_height(rows);
        let n = self.active_len();
        self.nav.reclamp(n);
    }

    pub fn log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            let to_trim = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(0..to_trim);
        }
    }
}
