use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Verbosity selected with `--log-level`; `RUST_LOG` takes precedence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only error conditions
    Error,
    /// Errors and warnings
    #[default]
    Warn,
    /// Load/save and other lifecycle events
    Info,
    /// Every committed operation
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not open log file {path}: {source}")]
    OpenError { path: PathBuf, source: io::Error },
    #[error("could not initialise logging: {0}")]
    InitError(String),
}

/// Install the global subscriber. With a `log_file` the output is appended
/// there without ANSI colors; otherwise it goes to stderr.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<(), LogError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    result.map_err(|e| LogError::InitError(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, LogError> {
    let open_err = |source| LogError::OpenError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(open_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;
    use tempfile::TempDir;

    #[test]
    fn level_names_match_filter_directives() {
        for level in LogLevel::value_variants() {
            let name = level.to_possible_value().unwrap();
            assert_eq!(name.get_name(), level.as_str());
        }
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }

    #[test]
    fn log_file_parent_is_created() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("logs").join("ctodo.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
