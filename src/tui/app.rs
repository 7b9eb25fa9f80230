use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::drag::{GestureConfig, GestureNormalizer, HitMap, Point, RowRef};
use crate::io::config_io::read_config;
use crate::io::kv::KvStore;
use crate::io::persist::{PersistSink, SaveStatus, load_hierarchy};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::{StoreEvent, StoreWatcher};
use crate::model::{Config, Filter, Hierarchy, InputMode, ItemId};
use crate::ops::{HierarchyStore, StoreError};

use super::input;
use super::render;
use super::theme::Theme;

/// Poll interval while no touch is waiting to arm
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new top-level item
    AddItem,
    /// Typing a new sub-item under `parent`
    AddSub { parent: ItemId },
}

/// One row of the list as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub row: RowRef,
    pub text: String,
    pub done: bool,
}

/// Visible rows for `filter`: each matching item followed by all of its
/// sub-items (sub-items are never filtered).
pub fn flatten_rows(hierarchy: &Hierarchy, filter: Filter) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    for item in hierarchy.visible(filter) {
        rows.push(FlatRow {
            row: RowRef::Item(item.id.clone()),
            text: item.text.clone(),
            done: item.done,
        });
        for sub in &item.subs {
            rows.push(FlatRow {
                row: RowRef::Sub {
                    id: sub.id.clone(),
                    parent: item.id.clone(),
                },
                text: sub.text.clone(),
                done: sub.done,
            });
        }
    }
    rows
}

/// Backing storage for a live session
pub struct Storage {
    pub kv: KvStore,
    pub key: String,
    pub watcher: Option<StoreWatcher>,
    pub save_status: SaveStatus,
}

/// Main application state
pub struct App {
    pub store: HierarchyStore,
    pub filter: Filter,
    pub mode: Mode,
    pub input_mode: InputMode,
    pub gestures: GestureNormalizer,
    /// Regions drawn in the last frame; mouse coordinates refer to these
    pub hits: HitMap,
    /// Index into the flattened visible rows
    pub cursor: usize,
    pub scroll_offset: usize,
    pub edit_buffer: String,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// One-shot message for the status row, cleared on the next key
    pub status: Option<String>,
    /// Pointer press on a row that has not moved yet
    pub press: Option<Point>,
    pub should_quit: bool,
    pub storage: Option<Storage>,
}

impl App {
    pub fn new(store: HierarchyStore, config: &Config) -> Self {
        App {
            store,
            filter: Filter::All,
            mode: Mode::Navigate,
            input_mode: config.drag.input,
            gestures: GestureNormalizer::new(GestureConfig::from(&config.drag)),
            hits: HitMap::new(),
            cursor: 0,
            scroll_offset: 0,
            edit_buffer: String::new(),
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            status: None,
            press: None,
            should_quit: false,
            storage: None,
        }
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        self.store.hierarchy()
    }

    pub fn flat_rows(&self) -> Vec<FlatRow> {
        flatten_rows(self.hierarchy(), self.filter)
    }

    pub fn selected_row(&self) -> Option<RowRef> {
        self.flat_rows().into_iter().nth(self.cursor).map(|r| r.row)
    }

    /// Put the cursor on the row holding the record `id`, wherever it is now
    pub fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.flat_rows().iter().position(|r| r.row.id() == id) {
            self.cursor = idx;
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.flat_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.flat_rows().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Drop any gesture in flight along with its drag visuals
    pub fn cancel_gesture(&mut self) {
        self.gestures.cancel();
        self.press = None;
    }

    /// Switching modality mid-gesture would orphan the session
    pub fn toggle_input_mode(&mut self) {
        self.cancel_gesture();
        self.input_mode = self.input_mode.toggled();
        self.status = Some(format!("input: {}", self.input_mode.label()));
        info!(mode = self.input_mode.label(), "input modality switched");
    }

    /// Surface a store error in the status row. Errors are never fatal.
    pub fn report<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "operation failed");
                self.status = Some(e.to_string());
                None
            }
        }
    }

    pub fn toggle_row(&mut self, row: &RowRef) {
        let result = match row {
            RowRef::Item(id) => self.store.toggle_item_done(id),
            RowRef::Sub { id, parent } => self.store.toggle_sub_done(parent, id),
        };
        self.report(result);
        self.clamp_cursor();
    }

    pub fn delete_row(&mut self, row: &RowRef) {
        let result = match row {
            RowRef::Item(id) => self.store.delete_item(id),
            RowRef::Sub { id, parent } => self.store.delete_sub(parent, id),
        };
        self.report(result);
        self.clamp_cursor();
    }

    /// Text entry swallows mouse input, so a live drag would never see
    /// its release.
    pub fn begin_add_item(&mut self) {
        self.cancel_gesture();
        self.mode = Mode::AddItem;
        self.edit_buffer.clear();
    }

    pub fn begin_add_sub(&mut self, parent: ItemId) {
        self.cancel_gesture();
        self.mode = Mode::AddSub { parent };
        self.edit_buffer.clear();
    }

    /// Enter in text entry. Blank text keeps the prompt open.
    pub fn commit_edit(&mut self) {
        if self.edit_buffer.trim().is_empty() {
            return;
        }
        let mode = std::mem::replace(&mut self.mode, Mode::Navigate);
        let text = std::mem::take(&mut self.edit_buffer);
        let added = match &mode {
            Mode::AddItem => {
                let result = self.store.add_item(&text).map(|id| id.to_string());
                self.report(result)
            }
            Mode::AddSub { parent } => {
                let result = self.store.add_sub(parent, &text).map(|id| id.to_string());
                self.report(result)
            }
            Mode::Navigate => None,
        };
        if let Some(id) = added {
            self.select_id(&id);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Navigate;
        self.edit_buffer.clear();
    }

    /// Pick up writes to the store made by another instance. Our own
    /// saves come back through the watcher too; those match and are
    /// skipped.
    pub fn poll_storage(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let Some(StoreEvent::Changed) = storage.watcher.as_ref().and_then(|w| w.poll()) else {
            return;
        };
        let loaded = load_hierarchy(&storage.kv, &storage.key);
        if &loaded == self.store.hierarchy() {
            return;
        }
        // The layout the session was built on is gone
        self.cancel_gesture();
        self.store.reload(loaded);
        self.clamp_cursor();
        self.status = Some("reloaded: store changed on disk".into());
    }

    /// Most recent failed save, if the last save failed
    pub fn save_error(&self) -> Option<String> {
        self.storage.as_ref()?.save_status.last_error()
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            filter: self.filter,
            cursor: self.cursor,
            input: Some(self.input_mode),
        }
    }

    pub fn apply_ui_state(&mut self, state: UiState) {
        self.filter = state.filter;
        self.cursor = state.cursor;
        if let Some(input) = state.input {
            self.input_mode = input;
        }
        self.clamp_cursor();
    }
}

/// Save UI state to .state.json
fn save_ui_state(app: &App, dir: &Path) {
    if let Err(e) = write_ui_state(dir, &app.ui_state()) {
        warn!(error = %e, "could not save ui state");
    }
}

/// Run the TUI application against the data directory
pub fn run(data_dir: &Path, input: Option<InputMode>) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let kv = KvStore::open(data_dir)?;
    let key = config.storage.key.clone();
    let hierarchy = load_hierarchy(&kv, &key);
    info!(dir = %data_dir.display(), items = hierarchy.items.len(), "starting");

    let sink = PersistSink::new(kv.clone(), key.clone());
    let save_status = sink.status();
    let store = HierarchyStore::new(hierarchy, Box::new(sink));

    let watcher = StoreWatcher::start(data_dir)
        .map_err(|e| warn!(error = %e, "store watcher unavailable"))
        .ok();

    let mut app = App::new(store, &config).with_storage(Storage {
        kv,
        key,
        watcher,
        save_status,
    });

    // Saved state wins over config; the launcher flag wins over both
    if let Some(state) = read_ui_state(data_dir) {
        app.apply_ui_state(state);
    }
    if let Some(input) = input {
        app.input_mode = input;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, data_dir);

    save_ui_state(&app, data_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    state_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Wake up in time to arm a held touch
        let timeout = app.gestures.arm_deadline().map_or(IDLE_POLL, |deadline| {
            deadline
                .saturating_duration_since(Instant::now())
                .min(IDLE_POLL)
        });

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    // Debounced state save: every ~5 key presses
                    save_counter += 1;
                    if save_counter >= 5 {
                        save_ui_state(app, state_dir);
                        save_counter = 0;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse, Instant::now()),
                Event::Resize(..) => input::handle_resize(app),
                _ => {}
            }
        }

        input::tick(app, Instant::now());
        app.poll_storage();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
