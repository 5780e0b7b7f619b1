//! Error types for the font registry engine.
//!
//! Every failure the engine can report maps to one variant here, so the
//! presentation layer only ever sees a typed reason it can render as a
//! `(success, message)` pair.

use crate::types::Scope;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for font registry operations.
#[derive(Debug, Error)]
pub enum FontError {
    // Install validation errors
    #[error("Font file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported font format \"{extension}\"; only .ttf, .otf and .ttc are supported")]
    UnsupportedFormat { extension: String },

    #[error("Font is already installed in the {scope} fonts directory")]
    AlreadyInstalled { scope: Scope },

    // Privilege errors, scope-dependent wording
    #[error("System font changes require administrator privileges; run elevated")]
    ElevationRequired,

    #[error("Permission denied")]
    PermissionDenied,

    // Registry errors
    #[error("Registry entry not found: {name}")]
    RegistryEntryMissing { name: String },

    #[error("Registry error: {message}")]
    Registry { message: String },

    // Mutation catch-alls, detail is the underlying OS message
    #[error("Install failed: {message}")]
    InstallFailed { message: String },

    #[error("Uninstall failed: {message}")]
    UninstallFailed { message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for font registry operations.
pub type Result<T> = std::result::Result<T, FontError>;

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl FontError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        FontError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Map a privilege failure to the scope-dependent variant: writes to the
    /// machine scope need elevation, user-scope failures are plain denials.
    pub fn privilege(scope: Scope) -> Self {
        match scope {
            Scope::System => FontError::ElevationRequired,
            Scope::User => FontError::PermissionDenied,
        }
    }

    /// Check whether this error is an expected "something else got there
    /// first" miss rather than a fault. External processes may delete a
    /// registry value or font file between our existence check and action.
    pub fn is_expected_miss(&self) -> bool {
        matches!(
            self,
            FontError::FileNotFound(_) | FontError::RegistryEntryMissing { .. }
        )
    }
}
