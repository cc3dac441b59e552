use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::state_io::{self, LOG_FILE_NAME};
use crate::logging;
use crate::model::{AppConfig, TodoState};
use crate::ops::{ContextRegistry, TaskStore, stats};
use crate::tui::{self, App};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    match &cli.command {
        None => cmd_tui(&cli),
        Some(cmd) => {
            logging::init(cli.log_level, cli.log_file.as_deref())?;
            let config = load_config(&cli)?;
            let path = config_io::resolve_state_path(cli.state_file.as_deref(), &config);
            match cmd {
                Commands::List(args) => cmd_list(&path, args, json),
                Commands::Add(args) => cmd_add(&path, args, json),
                Commands::Contexts => cmd_contexts(&path, json),
                Commands::Stats => cmd_stats(&path, json),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(cli: &Cli) -> Result<AppConfig, config_io::ConfigError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(config_io::default_config_path);
    config_io::read_config(&path)
}

/// Task list and registry loaded from disk, reconciled and ready to use
struct Session {
    store: TaskStore,
    contexts: ContextRegistry,
}

impl Session {
    fn open(path: &Path) -> Self {
        let loaded = state_io::load_or_default(path);
        if let Some(warning) = &loaded.warning {
            eprintln!("warning: {}", warning);
        }
        Session::from_state(loaded.state)
    }

    fn from_state(state: TodoState) -> Self {
        let store = TaskStore::from_parts(state.tasks, state.next_id);
        let mut contexts = ContextRegistry::from_parts(state.contexts, state.current_context);
        contexts.synchronize(&store);
        Session { store, contexts }
    }

    fn to_state(&self) -> TodoState {
        TodoState {
            tasks: self.store.snapshot(),
            contexts: self.contexts.names().map(str::to_string).collect(),
            current_context: self.contexts.current().to_string(),
            next_id: self.store.next_id(),
        }
    }

    /// Contexts selected by `list`: one named, all, or the current one
    fn select_contexts(&self, args: &ListArgs) -> Result<Vec<String>, String> {
        if args.all {
            return Ok(self.contexts.names().map(str::to_string).collect());
        }
        match &args.context {
            Some(name) if self.contexts.contains(name) => Ok(vec![name.clone()]),
            Some(name) => Err(format!("no such context: {}", name)),
            None => Ok(vec![self.contexts.current().to_string()]),
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

fn cmd_tui(cli: &Cli) -> CmdResult {
    let config = load_config(cli)?;
    let path = config_io::resolve_state_path(cli.state_file.as_deref(), &config);

    // The terminal belongs to the UI, so logs always go to a file
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| default_log_path(&path));
    logging::init(cli.log_level, Some(&log_path))?;
    tracing::info!(state = %path.display(), "starting interactive session");

    let loaded = state_io::load_or_default(&path);
    let mut app = App::new(loaded.state, &config);
    app.message = loaded.warning;
    tui::run(app, &path)
}

fn default_log_path(state_path: &Path) -> PathBuf {
    match state_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(LOG_FILE_NAME),
        _ => PathBuf::from(LOG_FILE_NAME),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(path: &Path, args: &ListArgs, json: bool) -> CmdResult {
    let session = Session::open(path);
    let selected = session.select_contexts(args)?;

    if json {
        let results: Vec<TaskListJson> = selected
            .iter()
            .map(|name| TaskListJson {
                context: name.clone(),
                tasks: session.store.tasks_in(name).map(task_to_json).collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for (i, name) in selected.iter().enumerate() {
            if i > 0 {
                println!();
            }
            if selected.len() > 1 {
                println!("{}", format_context_header(name));
            }
            let mut empty = true;
            for task in session.store.tasks_in(name) {
                println!("{}", format_task_line(task));
                empty = false;
            }
            if empty {
                println!("(no tasks)");
            }
        }
    }
    Ok(())
}

fn cmd_contexts(path: &Path, json: bool) -> CmdResult {
    let session = Session::open(path);
    let infos: Vec<ContextInfoJson> = session
        .contexts
        .names()
        .map(|name| {
            let (total, open) = session
                .store
                .tasks_in(name)
                .fold((0, 0), |(n, o), t| (n + 1, o + usize::from(!t.checked)));
            ContextInfoJson {
                name: name.to_string(),
                current: name == session.contexts.current(),
                open,
                total,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        let name_w = infos
            .iter()
            .map(|i| i.name.chars().count())
            .max()
            .unwrap_or(0);
        for info in &infos {
            println!("{}", format_context_info(info, name_w));
        }
    }
    Ok(())
}

fn cmd_stats(path: &Path, json: bool) -> CmdResult {
    let session = Session::open(path);
    let today = Local::now().date_naive();
    let stats = stats::compute(&session.store, &session.contexts, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(path: &Path, args: &AddArgs, json: bool) -> CmdResult {
    let mut session = Session::open(path);
    let context = args
        .context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(session.contexts.current())
        .to_string();

    let id = session
        .store
        .add(args.text.trim(), &context)
        .ok_or("task text cannot be empty")?;
    session.contexts.synchronize(&session.store);
    tracing::debug!(task = %id, context = %context, "added task");
    state_io::save(path, &session.to_state())?;

    if json {
        let added = AddedJson { id: id.0, context };
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        println!("added {} to {}", id, context);
    }
    Ok(())
}
