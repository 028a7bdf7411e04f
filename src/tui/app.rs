use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, Utc};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::io::history_io::{read_history, write_history};
use crate::io::logging::init_tui_logging;
use crate::io::project_io::discover_project;
use crate::io::settings_io::load_settings;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store::DirStore;
use crate::model::SlotId;
use crate::ops::apply::EditTarget;
use crate::ops::calendar::{MonthWeek, YearMonth, month_weeks};
use crate::ops::check::WeekReport;
use crate::ops::config_panel::{ConfigField, ConfigSession};
use crate::ops::editor::{EditorSession, TextColor};
use crate::ops::workspace::Workspace;
use crate::util::markup::markup_to_editable;

use super::input;
use super::render;
use super::theme::Theme;

/// How long a notice stays in the status row
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Longest the event loop waits for input
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Editor modal open on a day slot or week footer
    Edit,
    /// Master schedule and resident configuration
    Config,
    /// Compliance report overlay
    Check,
    /// One-line edit of a header label
    Label,
}

/// Which part of the grid the cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPart {
    Slot(SlotId),
    Footer,
}

impl CellPart {
    fn index(self) -> usize {
        match self {
            CellPart::Slot(slot) => slot.index(),
            CellPart::Footer => 3,
        }
    }

    fn from_index(idx: usize) -> Self {
        SlotId::from_index(idx).map_or(CellPart::Footer, CellPart::Slot)
    }
}

/// Cursor over the month grid: week row, weekday column, and slot (or the row's footer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    pub row: usize,
    pub col: usize,
    pub part: CellPart,
}

impl Default for GridCursor {
    fn default() -> Self {
        GridCursor {
            row: 0,
            col: 0,
            part: CellPart::Slot(SlotId::Slot1),
        }
    }
}

/// The open editor modal
pub struct EditorState {
    pub session: EditorSession,
    /// Edit-box text: inline tags kept, line breaks as `\n`
    pub buffer: String,
    /// Byte offset into `buffer`
    pub cursor: usize,
    /// Resident picker position
    pub picked: usize,
    /// Next inline text color offered by the color command
    pub text_color: usize,
}

impl EditorState {
    /// Reload the edit box after the session changed the markup
    pub fn sync_from_session(&mut self) {
        self.buffer = markup_to_editable(self.session.markup());
        self.cursor = self.buffer.len();
    }

    pub fn next_text_color(&mut self) -> TextColor {
        let color = TextColor::ALL[self.text_color % TextColor::ALL.len()];
        self.text_color = (self.text_color + 1) % TextColor::ALL.len();
        color
    }
}

/// The open configuration panel
pub struct ConfigState {
    pub session: ConfigSession,
    pub fields: Vec<ConfigField>,
    pub selected: usize,
    /// Text box for the selected field while it is being edited
    pub editing: Option<String>,
    /// Name being typed for a new resident
    pub new_resident: Option<String>,
    /// Resident picker position
    pub picked: usize,
}

impl ConfigState {
    pub fn field(&self) -> ConfigField {
        self.fields[self.selected.min(self.fields.len() - 1)]
    }
}

/// Header labels editable in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// The "updated" date label
    Updated,
    Facility,
}

/// The open label edit box
pub struct LabelEdit {
    pub kind: LabelKind,
    pub buffer: String,
}

/// Main application state
pub struct App {
    pub workspace: Workspace<DirStore>,
    pub data_dir: PathBuf,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    pub month: YearMonth,
    pub today: NaiveDate,
    pub cursor: GridCursor,
    pub editor: Option<EditorState>,
    pub config: Option<ConfigState>,
    pub label: Option<LabelEdit>,
    pub reports: Vec<WeekReport>,
    /// Transient status message and when it was posted
    pub notice: Option<(String, Instant)>,
}

impl App {
    pub fn new(workspace: Workspace<DirStore>, today: NaiveDate) -> Self {
        let data_dir = workspace.store().dir().to_path_buf();
        let month = workspace
            .settings()
            .ui
            .start_month
            .as_deref()
            .and_then(YearMonth::parse)
            .unwrap_or_else(|| YearMonth::of(today));
        App {
            workspace,
            data_dir,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::default(),
            show_help: false,
            month,
            today,
            cursor: GridCursor::default(),
            editor: None,
            config: None,
            label: None,
            reports: Vec::new(),
            notice: None,
        }
    }

    pub fn weeks(&self) -> Vec<MonthWeek> {
        month_weeks(self.month)
    }

    /// Change the displayed month, keeping the cursor inside the grid
    pub fn set_month(&mut self, month: YearMonth) {
        self.month = month;
        let rows = self.weeks().len();
        self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
    }

    /// Show the month containing today, cursor on today's first slot
    pub fn jump_to_today(&mut self) {
        self.set_month(YearMonth::of(self.today));
        if let Some((row, col)) = self.locate(self.today) {
            self.cursor = GridCursor {
                row,
                col,
                part: CellPart::Slot(SlotId::Slot1),
            };
        }
    }

    fn locate(&self, date: NaiveDate) -> Option<(usize, usize)> {
        self.weeks().iter().find_map(|week| {
            week.days
                .iter()
                .position(|d| d.and_then(|d| self.month.date(d)) == Some(date))
                .map(|col| (week.index, col))
        })
    }

    /// The date under the cursor, if the cursor is on a day of this month
    pub fn cursor_date(&self) -> Option<NaiveDate> {
        let weeks = self.weeks();
        let day = weeks.get(self.cursor.row)?.days.get(self.cursor.col).copied()??;
        self.month.date(day)
    }

    /// What Enter would edit
    pub fn cursor_target(&self) -> Option<EditTarget> {
        match self.cursor.part {
            CellPart::Slot(slot) => self
                .cursor_date()
                .map(|date| EditTarget::Day { date, slot }),
            CellPart::Footer => {
                let weeks = self.weeks();
                let week = weeks.get(self.cursor.row)?;
                Some(EditTarget::Week {
                    sunday: week.sunday,
                    week_index: week.index,
                })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Editor
    // -----------------------------------------------------------------------

    pub fn open_editor(&mut self, now: Instant) {
        let Some(target) = self.cursor_target() else {
            self.notify("no day here", now);
            return;
        };
        let session = self.workspace.edit(target);
        let mut state = EditorState {
            session,
            buffer: String::new(),
            cursor: 0,
            picked: 0,
            text_color: 1,
        };
        state.sync_from_session();
        self.editor = Some(state);
        self.mode = Mode::Edit;
    }

    /// Confirm the editor: apply, persist, and record the edit
    pub fn save_editor(&mut self, now: Instant) {
        let Some(state) = self.editor.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        let edit = state.session.finish();
        match self.workspace.apply_edit(&edit) {
            Ok(()) => {
                self.persist_history();
                self.notify(format!("saved {}", edit.target), now);
            }
            Err(e) => {
                warn!(error = %e, "could not save edit");
                self.notify(format!("save failed: {}", e), now);
            }
        }
    }

    /// Close the editor without applying anything
    pub fn cancel_editor(&mut self) {
        self.editor = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Configuration panel
    // -----------------------------------------------------------------------

    pub fn open_config(&mut self) {
        self.config = Some(ConfigState {
            session: self.workspace.open_config(),
            fields: ConfigField::all(),
            selected: 0,
            editing: None,
            new_resident: None,
            picked: 0,
        });
        self.mode = Mode::Config;
    }

    pub fn save_config(&mut self, now: Instant) {
        let Some(mut state) = self.config.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        if state.editing.take().is_some() {
            state.session.blur();
        }
        match self.workspace.save_config(state.session) {
            Ok(()) => {
                self.persist_history();
                self.notify("configuration saved", now);
            }
            Err(e) => {
                warn!(error = %e, "could not save configuration");
                self.notify(format!("save failed: {}", e), now);
            }
        }
    }

    /// Close the panel, dropping the draft
    pub fn discard_config(&mut self) {
        self.config = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Header labels
    // -----------------------------------------------------------------------

    pub fn open_label(&mut self, kind: LabelKind) {
        let board = self.workspace.board();
        let buffer = match kind {
            LabelKind::Updated => board.update_label.clone(),
            LabelKind::Facility => board.facility_name.clone(),
        };
        self.label = Some(LabelEdit { kind, buffer });
        self.mode = Mode::Label;
    }

    /// Persist the label. A blank one keeps the box open.
    pub fn save_label(&mut self, now: Instant) {
        let Some((kind, text)) = self
            .label
            .as_ref()
            .map(|edit| (edit.kind, edit.buffer.trim().to_string()))
        else {
            return;
        };
        if text.is_empty() {
            self.notify("label cannot be empty", now);
            return;
        }
        let result = match kind {
            LabelKind::Updated => self.workspace.set_update_label(&text),
            LabelKind::Facility => self.workspace.set_facility_name(&text),
        };
        self.label = None;
        self.mode = Mode::Navigate;
        match result {
            Ok(()) => self.notify(format!("label set to {}", text), now),
            Err(e) => {
                warn!(error = %e, "could not save label");
                self.notify(format!("save failed: {}", e), now);
            }
        }
    }

    pub fn cancel_label(&mut self) {
        self.label = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Global actions
    // -----------------------------------------------------------------------

    pub fn undo(&mut self, now: Instant) {
        match self.workspace.undo() {
            Ok(true) => {
                self.persist_history();
                self.notify("undone", now);
            }
            Ok(false) => self.notify("nothing to undo", now),
            Err(e) => self.notify(format!("undo failed: {}", e), now),
        }
    }

    pub fn redo(&mut self, now: Instant) {
        match self.workspace.redo() {
            Ok(true) => {
                self.persist_history();
                self.notify("redone", now);
            }
            Ok(false) => self.notify("nothing to redo", now),
            Err(e) => self.notify(format!("redo failed: {}", e), now),
        }
    }

    pub fn run_check(&mut self) {
        self.reports = self.workspace.check(self.month);
        self.mode = Mode::Check;
    }

    /// Write a backup next to the data directory
    pub fn export_backup(&mut self, now: Instant) {
        let doc = self.workspace.export(Utc::now());
        let dir = self.data_dir.parent().unwrap_or(&self.data_dir);
        let path = dir.join(doc.file_name());
        let result = doc
            .to_json()
            .map_err(io::Error::other)
            .and_then(|json| std::fs::write(&path, json));
        match result {
            Ok(()) => {
                info!(path = %path.display(), "exported backup");
                self.notify(format!("exported {}", path.display()), now);
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.notify(format!("export failed: {}", e), now);
            }
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        self.notice = Some((message.into(), now));
    }

    /// Advance timers: debounced editor commits and notice expiry
    pub fn tick(&mut self, now: Instant) {
        if let Some(state) = &mut self.editor {
            state.session.tick(now);
        }
        if let Some((_, posted)) = &self.notice
            && now.saturating_duration_since(*posted) >= NOTICE_TTL
        {
            self.notice = None;
        }
    }

    /// How long to wait for input before the next tick is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.editor
            .as_ref()
            .and_then(|state| state.session.deadline())
            .map_or(POLL_INTERVAL, |deadline| {
                deadline.saturating_duration_since(now).min(POLL_INTERVAL)
            })
    }

    fn persist_history(&self) {
        if let Err(e) = write_history(&self.data_dir, self.workspace.history()) {
            warn!(error = %e, "could not write history");
        }
    }
}

/// Restore month and cursor from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(&app.data_dir) else {
        return;
    };
    if let Some(month) = state.month.as_deref().and_then(YearMonth::parse) {
        app.set_month(month);
    }
    if let Some((row, col, part)) = state.cursor {
        let rows = app.weeks().len();
        app.cursor = GridCursor {
            row: row.min(rows.saturating_sub(1)),
            col: col.min(6),
            part: CellPart::from_index(part),
        };
    }
}

/// Save month and cursor to .state.json
pub fn save_ui_state(app: &App) {
    let state = UiState {
        month: Some(app.month.to_string()),
        cursor: Some((app.cursor.row, app.cursor.col, app.cursor.part.index())),
    };
    if let Err(e) = write_ui_state(&app.data_dir, &state) {
        warn!(error = %e, "could not save ui state");
    }
}

/// Run the TUI application
pub fn run(project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match project_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let paths = discover_project(&start)?;
    let _log_guard = init_tui_logging(&paths.log_dir())?;

    let settings = load_settings(&paths.data_dir)?;
    let today = Local::now().date_naive();
    let mut workspace = Workspace::open(DirStore::new(paths.data_dir.clone()), settings, today);
    if let Some(history) = read_history(&paths.data_dir, workspace.settings().history.limit) {
        workspace.adopt_history(history);
    }
    info!(project = %paths.root.display(), "starting tui");

    let mut app = App::new(workspace, today);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// An app over an empty project in `dir`, for tests
#[cfg(test)]
pub fn test_app(dir: &std::path::Path) -> App {
    use crate::model::Settings;

    let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
    let workspace = Workspace::open(DirStore::new(dir), Settings::default(), today);
    let mut app = App::new(workspace, today);
    app.set_month(YearMonth::new(2026, 3).unwrap());
    app
}
