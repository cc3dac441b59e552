use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A logical input, independent of which key produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Toggle,
    Add,
    Edit,
    Delete,
    AddContext,
    RenameContext,
    DeleteContext,
    CyclePriority,
    AddTag,
    RemoveTag,
    SetDueDate,
    ClearDueDate,
    Kanban,
    Stats,
    Undo,
    Move,
    Help,
    Quit,
    Back,
    Confirm,
    // Text entry
    Insert(char),
    Backspace,
    DeleteForward,
    Home,
    End,
    NextField,
    PrevField,
}

/// One row of the key table
#[derive(Debug, Clone)]
pub struct Binding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
}

/// Help overlay entry: key label, description, section
pub struct HelpEntry {
    pub keys: &'static str,
    pub description: &'static str,
    pub section: &'static str,
}

pub const HELP_ENTRIES: &[HelpEntry] = &[
    HelpEntry { keys: "\u{2191}\u{2193}/jk", description: "Move cursor", section: "Navigation" },
    HelpEntry { keys: "\u{2190}\u{2192}/hl", description: "Previous / next context", section: "Navigation" },
    HelpEntry { keys: "space", description: "Toggle done", section: "Tasks" },
    HelpEntry { keys: "a", description: "Add task", section: "Tasks" },
    HelpEntry { keys: "e", description: "Edit task", section: "Tasks" },
    HelpEntry { keys: "d", description: "Delete task", section: "Tasks" },
    HelpEntry { keys: "m", description: "Move task (m/Enter drop, Esc cancel)", section: "Tasks" },
    HelpEntry { keys: "n", description: "New context", section: "Contexts" },
    HelpEntry { keys: "r", description: "Rename context", section: "Contexts" },
    HelpEntry { keys: "D", description: "Delete context", section: "Contexts" },
    HelpEntry { keys: "p", description: "Cycle priority", section: "Details" },
    HelpEntry { keys: "t / T", description: "Add / remove tags", section: "Details" },
    HelpEntry { keys: "u / U", description: "Set / clear due date", section: "Details" },
    HelpEntry { keys: "v", description: "Kanban board", section: "Views" },
    HelpEntry { keys: "s", description: "Statistics", section: "Views" },
    HelpEntry { keys: "z", description: "Undo", section: "General" },
    HelpEntry { keys: "?", description: "Toggle help", section: "General" },
    HelpEntry { keys: "q", description: "Quit", section: "General" },
];

/// Key table for the command-style modes (normal, kanban, stats, tag removal)
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<Binding>,
}

fn bind(code: KeyCode, action: Action) -> Binding {
    Binding {
        code,
        modifiers: KeyModifiers::NONE,
        action,
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        use Action::*;
        use KeyCode::Char;
        let mut bindings = vec![
            bind(KeyCode::Up, Up),
            bind(Char('k'), Up),
            bind(KeyCode::Down, Down),
            bind(Char('j'), Down),
            bind(KeyCode::Left, Left),
            bind(Char('h'), Left),
            bind(KeyCode::Right, Right),
            bind(Char('l'), Right),
            bind(Char(' '), Toggle),
            bind(Char('a'), Add),
            bind(Char('e'), Edit),
            bind(Char('d'), Delete),
            bind(Char('n'), AddContext),
            bind(Char('r'), RenameContext),
            bind(Char('D'), DeleteContext),
            bind(Char('p'), CyclePriority),
            bind(Char('t'), AddTag),
            bind(Char('T'), RemoveTag),
            bind(Char('u'), SetDueDate),
            bind(Char('U'), ClearDueDate),
            bind(Char('v'), Kanban),
            bind(Char('s'), Stats),
            bind(Char('z'), Undo),
            bind(Char('m'), Move),
            bind(Char('?'), Help),
            bind(Char('q'), Quit),
            bind(KeyCode::Esc, Back),
            bind(KeyCode::Enter, Confirm),
        ];
        bindings.push(Binding {
            code: Char('c'),
            modifiers: KeyModifiers::CONTROL,
            action: Quit,
        });
        KeyMap { bindings }
    }
}

/// Shift is already folded into the character for `Char` keys
fn normalize(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(_) => KeyEvent {
            modifiers: key.modifiers.difference(KeyModifiers::SHIFT),
            ..key
        },
        _ => key,
    }
}

impl KeyMap {
    /// Resolve a key in a command-style mode
    pub fn command(&self, key: KeyEvent) -> Option<Action> {
        let key = normalize(key);
        self.bindings
            .iter()
            .find(|b| b.code == key.code && b.modifiers == key.modifiers)
            .map(|b| b.action)
    }

    /// Resolve a key while a text or date field has focus. Printable
    /// characters become input; only editing keys keep their meaning.
    pub fn text_entry(key: KeyEvent) -> Option<Action> {
        let key = normalize(key);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(Action::Back),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Action::Insert(c))
            }
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Delete => Some(Action::DeleteForward),
            KeyCode::Left => Some(Action::Left),
            KeyCode::Right => Some(Action::Right),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            _ => None,
        }
    }
}
