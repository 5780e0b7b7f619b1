//! Scope-aware path resolution.
//!
//! The single source of truth for turning a registry value's stored string
//! into an absolute path. Enumerator, Installer and Uninstaller all resolve
//! through here so the scope roots behave identically everywhere.

use crate::config::EngineConfig;
use crate::types::Scope;
use std::path::{Path, PathBuf};

/// Resolve a registry value's stored string to an absolute path.
///
/// A stored string that is already absolute is used verbatim; a bare filename
/// is joined with the scope root.
pub fn resolve_font_path(stored: &str, root: &Path) -> PathBuf {
    let stored_path = Path::new(stored);
    if stored_path.is_absolute() {
        stored_path.to_path_buf()
    } else {
        root.join(stored_path)
    }
}

/// Lowercased string form of a path, used for dedup keys and prefix
/// classification. Windows paths compare case-insensitively.
pub fn normalized_path_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

/// Classify a resolved path's scope by its actual location: anything under
/// the system font directory is `System`, everything else is `User`. The
/// originating hive is deliberately ignored so a system font recorded in the
/// user hive still reads as `System`.
pub fn scope_of_path(path: &Path, config: &EngineConfig) -> Scope {
    let key = normalized_path_key(path);
    let system_prefix = normalized_path_key(&config.system_fonts_dir);
    if key.starts_with(&system_prefix) {
        Scope::System
    } else {
        Scope::User
    }
}
