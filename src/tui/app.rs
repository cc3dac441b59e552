use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::state_io;
use crate::model::{AppConfig, Task, TaskId, TodoState};
use crate::ops::{ContextRegistry, FilteredView, OpError, TaskStore, VisualIndex};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::input;
use super::keymap::KeyMap;
use super::render;
use super::theme::Theme;
use super::undo::UndoHistory;

/// One external input to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// New terminal width and height
    Resize(u16, u16),
}

/// Side effects requested by a step, performed by the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write the current state through to the state file
    Save,
    Quit,
}

/// A task picked up in moving mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveState {
    pub task_id: TaskId,
    /// Master list before the first swap, pushed to history on drop
    pub origin: Vec<Task>,
}

/// What a text prompt commits to on Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    AddTask,
    EditTask(TaskId),
    AddContext,
    RenameContext,
    AddTag(TaskId),
    DeleteConfirm,
}

/// Single-line text prompt. `cursor` is a byte offset on a grapheme boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub purpose: InputPurpose,
    pub prompt: String,
    pub buffer: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(purpose: InputPurpose, prompt: impl Into<String>, initial: &str) -> Self {
        TextInput {
            purpose,
            prompt: prompt.into(),
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// The buffer as submitted: surrounding whitespace removed
    pub fn value(&self) -> &str {
        self.buffer.trim()
    }
}

pub const DATE_FIELD_LABELS: [&str; 3] = ["Day", "Month", "Year"];
const DATE_FIELD_WIDTHS: [usize; 3] = [2, 2, 4];

/// Three-field due date dialog (day, month, year)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInput {
    pub task_id: TaskId,
    pub fields: [String; 3],
    pub focus: usize,
}

impl DateInput {
    pub fn new(task_id: TaskId, date: NaiveDate) -> Self {
        DateInput {
            task_id,
            fields: [
                format!("{:02}", date.day()),
                format!("{:02}", date.month()),
                format!("{:04}", date.year()),
            ],
            focus: 0,
        }
    }

    /// Digits only, up to the field's width
    pub fn insert(&mut self, c: char) {
        let field = &mut self.fields[self.focus];
        if c.is_ascii_digit() && field.len() < DATE_FIELD_WIDTHS[self.focus] {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// `YYYY-MM-DD`, with short day and month fields zero-padded
    pub fn compose(&self) -> String {
        let [day, month, year] = &self.fields;
        format!("{year}-{month:0>2}-{day:0>2}")
    }
}

/// Checkbox list of a task's tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRemoval {
    pub task_id: TaskId,
    pub tags: Vec<String>,
    pub marked: Vec<bool>,
    pub cursor: usize,
}

impl TagRemoval {
    pub fn new(task: &Task) -> Self {
        let tags: Vec<String> = task.tags.iter().cloned().collect();
        TagRemoval {
            task_id: task.id,
            marked: vec![false; tags.len()],
            tags,
            cursor: 0,
        }
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.cursor + 1 < self.tags.len() {
            self.cursor += 1;
        }
    }

    pub fn toggle(&mut self) {
        if let Some(mark) = self.marked.get_mut(self.cursor) {
            *mark = !*mark;
        }
    }

    pub fn marked_indices(&self) -> Vec<usize> {
        self.marked
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
            .collect()
    }
}

/// Current interaction mode. Modal variants own their buffers and the
/// identity of the task they act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal { moving: Option<MoveState> },
    Kanban { scroll_x: usize, scroll_y: usize },
    Stats,
    TextInput(TextInput),
    DateInput(DateInput),
    TagRemoval(TagRemoval),
}

/// Payload-free mode discriminant, the row key of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Normal,
    Moving,
    Kanban,
    Stats,
    TextInput,
    DateInput,
    TagRemoval,
}

impl ModeKind {
    pub const ALL: [ModeKind; 7] = [
        ModeKind::Normal,
        ModeKind::Moving,
        ModeKind::Kanban,
        ModeKind::Stats,
        ModeKind::TextInput,
        ModeKind::DateInput,
        ModeKind::TagRemoval,
    ];

    pub fn is_modal(self) -> bool {
        matches!(
            self,
            ModeKind::TextInput | ModeKind::DateInput | ModeKind::TagRemoval
        )
    }
}

impl Mode {
    pub fn normal() -> Self {
        Mode::Normal { moving: None }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Normal { moving: None } => ModeKind::Normal,
            Mode::Normal { moving: Some(_) } => ModeKind::Moving,
            Mode::Kanban { .. } => ModeKind::Kanban,
            Mode::Stats => ModeKind::Stats,
            Mode::TextInput(_) => ModeKind::TextInput,
            Mode::DateInput(_) => ModeKind::DateInput,
            Mode::TagRemoval(_) => ModeKind::TagRemoval,
        }
    }
}

/// The whole interactive session, threaded by value through [`update`]
#[derive(Debug, Clone)]
pub struct App {
    pub store: TaskStore,
    pub contexts: ContextRegistry,
    pub cursor: VisualIndex,
    pub mode: Mode,
    pub history: UndoHistory,
    /// Transient status line text, cleared on the next key
    pub message: Option<String>,
    pub show_help: bool,
    pub viewport: (u16, u16),
    pub today: NaiveDate,
    pub theme: Theme,
    pub keymap: KeyMap,
    pub show_key_hints: bool,
    effects: Vec<Effect>,
}

impl App {
    /// Build a session from loaded state. The registry is reconciled with
    /// the task list before anything is shown.
    pub fn new(state: TodoState, config: &AppConfig) -> Self {
        let store = TaskStore::from_parts(state.tasks, state.next_id);
        let mut contexts = ContextRegistry::from_parts(state.contexts, state.current_context);
        contexts.synchronize(&store);
        App {
            store,
            contexts,
            cursor: VisualIndex(0),
            mode: Mode::normal(),
            history: UndoHistory::new(config.history.max_depth),
            message: None,
            show_help: false,
            viewport: (80, 24),
            today: Local::now().date_naive(),
            theme: Theme::from_config(&config.ui),
            keymap: KeyMap::default(),
            show_key_hints: config.ui.show_key_hints,
            effects: Vec::new(),
        }
    }

    /// The aggregate handed to the save collaborator
    pub fn to_state(&self) -> TodoState {
        TodoState {
            tasks: self.store.snapshot(),
            contexts: self.contexts.names().map(str::to_string).collect(),
            current_context: self.contexts.current().to_string(),
            next_id: self.store.next_id(),
        }
    }

    /// The current context's rows, rebuilt from the master list
    pub fn view(&self) -> FilteredView {
        FilteredView::of(&self.store, self.contexts.current())
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.view().resolve(self.cursor)
    }

    /// Task under the cursor; `None` on an empty view
    pub fn current_task(&self) -> Option<&Task> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.view().clamp(self.cursor);
    }

    /// Run a mutating operation with undo bookkeeping. A snapshot is taken
    /// up front and pushed only when the operation reports a change; errors
    /// become the status message and leave history untouched.
    pub fn commit(&mut self, op: impl FnOnce(&mut App) -> Result<bool, OpError>) -> bool {
        let snapshot = self.store.snapshot();
        match op(self) {
            Ok(true) => {
                self.history.push(snapshot);
                self.request(Effect::Save);
                true
            }
            Ok(false) => false,
            Err(e) => {
                self.set_error(e);
                false
            }
        }
    }

    /// Pop the latest snapshot, reconcile contexts and re-anchor the cursor.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.pop() else {
            self.set_error(OpError::NothingToUndo);
            return;
        };
        self.store.restore(snapshot);
        self.contexts.synchronize(&self.store);
        self.cursor = VisualIndex(0);
        tracing::debug!(remaining = self.history.len(), "undo");
        self.request(Effect::Save);
    }

    pub fn set_error(&mut self, err: OpError) {
        tracing::debug!(%err, "rejected");
        self.message = Some(err.to_string());
    }

    pub fn request(&mut self, effect: Effect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }

    pub fn open_text_input(&mut self, purpose: InputPurpose, prompt: impl Into<String>, initial: &str) {
        self.mode = Mode::TextInput(TextInput::new(purpose, prompt, initial));
    }

    pub fn return_to_normal(&mut self) {
        self.mode = Mode::normal();
    }
}

/// One step of the state machine: consume an event, return the next state
/// and the effects to perform.
pub fn update(mut app: App, event: AppEvent) -> (App, Vec<Effect>) {
    match event {
        AppEvent::Resize(width, height) => app.viewport = (width, height),
        AppEvent::Key(key) if key.kind == KeyEventKind::Press => {
            app.message = None;
            input::handle_key(&mut app, key);
            app.clamp_cursor();
        }
        AppEvent::Key(_) => {}
    }
    let effects = std::mem::take(&mut app.effects);
    (app, effects)
}

/// Run the TUI against the state file at `state_path`
pub fn run(mut app: App, state_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
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

    let size = terminal.size()?;
    app.viewport = (size.width, size.height);

    let result = run_event_loop(&mut terminal, app, state_path);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    state_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, &app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let event = match event::read()? {
            Event::Key(key) => AppEvent::Key(key),
            Event::Resize(width, height) => AppEvent::Resize(width, height),
            _ => continue,
        };

        app.today = Local::now().date_naive();
        let (next, effects) = update(app, event);
        app = next;

        for effect in effects {
            match effect {
                Effect::Save => {
                    if let Err(e) = state_io::save(state_path, &app.to_state()) {
                        tracing::error!(error = %e, "save failed");
                        app.message = Some(format!("Save failed: {}", e));
                    }
                }
                Effect::Quit => return Ok(()),
            }
        }
    }
}
