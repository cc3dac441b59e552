use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::TodoState;

pub const STATE_FILE_NAME: &str = "todo.json";
pub const LOG_FILE_NAME: &str = "ctodo.log";

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize state: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Result of a forgiving load: always a usable state, plus a one-shot
/// message for the user when something had to be discarded.
#[derive(Debug)]
pub struct Loaded {
    pub state: TodoState,
    pub warning: Option<String>,
}

/// Read the state file. `Ok(None)` means there is no file yet.
pub fn load(path: &Path) -> Result<Option<TodoState>, StateError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StateError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let state = serde_json::from_slice(&bytes).map_err(|e| StateError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(state))
}

/// Load the state, falling back to the default state when the file is
/// missing or unusable. An existing file that can't be loaded is copied
/// aside as `.bak` so the next save doesn't destroy it.
pub fn load_or_default(path: &Path) -> Loaded {
    match load(path) {
        Ok(Some(state)) => {
            tracing::info!(path = %path.display(), tasks = state.tasks.len(), "loaded state");
            Loaded {
                state,
                warning: None,
            }
        }
        Ok(None) => {
            tracing::info!(path = %path.display(), "no state file, starting empty");
            Loaded {
                state: TodoState::default(),
                warning: None,
            }
        }
        Err(e) => {
            let bak = backup_path(path);
            let warning = match fs::copy(path, &bak) {
                Ok(_) => format!(
                    "{} (backed up as {}); starting with an empty list",
                    e,
                    bak.display()
                ),
                Err(copy_err) => {
                    tracing::warn!(error = %copy_err, "could not back up state file");
                    format!("{}; starting with an empty list", e)
                }
            };
            tracing::warn!(error = %e, "falling back to default state");
            Loaded {
                state: TodoState::default(),
                warning: Some(warning),
            }
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Write the state through to disk, creating the directory if needed.
pub fn save(path: &Path, state: &TodoState) -> Result<(), StateError> {
    let json = serde_json::to_string_pretty(state)?;
    let write_err = |source| StateError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    atomic_write(path, json.as_bytes()).map_err(write_err)?;
    tracing::info!(path = %path.display(), tasks = state.tasks.len(), "saved state");
    Ok(())
}

/// Write to a temp file in the same directory, then rename over the target.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
