//! Workspace-wide error type for the CMT dependency analyzer.
//!
//! Most
//! failures are recoverable at the point they're produced (a bad CMT
//! file becomes a diagnostic plus a resilient `ModuleInfo`, not an
//! abort), so this enum exists mainly for the handful of call sites
//! that genuinely cannot proceed (CLI argument errors, unwritable
//! output, a cache file that can't be locked).

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias. Library code should return this and
/// propagate failures with `?`; only the CLI binary decides how to
/// exit.
pub type Result<T, E = CmtError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum CmtError {
    /// A module name failed the validation rule in the data model
    /// (non-empty, uppercase-ASCII first character, `[A-Za-z0-9_']*`
    /// tail).
    #[error("invalid module name: {0:?}")]
    InvalidModuleName(String),

    /// Decoding a CMT file failed. Recoverable: callers that can
    /// synthesize a resilient `ModuleInfo` should do so instead of
    /// propagating this.
    #[error("failed to decode CMT file {path}: {message}")]
    InvalidCmtFile { path: PathBuf, message: String },

    /// An I/O failure on a path, directory, or the cache file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The on-disk cache could not be read or written.
    #[error("cache error at {path}: {message}")]
    Cache { path: PathBuf, message: String },

    /// Bad CLI input: unknown option, no input paths, or mutually
    /// exclusive flags supplied together.
    #[error("{0}")]
    InvalidArgs(String),

    /// The requested output file could not be created or written.
    #[error("failed to write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CmtError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CmtError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CmtError::InvalidCmtFile {
            path: path.into(),
            message: message.into(),
        }
    }
}
