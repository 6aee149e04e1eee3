use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a plotting run
///
/// Expected absences (a missing status file, behavior, or checkpoint list) are not errors, they are
/// reported as [`Skip`](crate::report::Skip)s instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A status file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A status file is not valid JSON, or a checkpoint is missing `steps`/`reward`
    #[error("malformed training status in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The terminal could not be set up, drawn to, or restored
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// A global logger was already installed
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// Writing the chart image failed
    #[error("export failed: {0}")]
    Export(String),
}
