//! Core data types: scopes, font formats, catalog records and outcomes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Installation scope of a font: machine-wide or current user only.
///
/// The scope determines which registry hive is read/written, which directory
/// is the install root, and whether a write requires elevated privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Machine-wide fonts (HKLM hive, `%WINDIR%\Fonts`). Writes need elevation.
    System,
    /// Per-user fonts (HKCU hive, `%LOCALAPPDATA%\Microsoft\Windows\Fonts`).
    User,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::System => "system",
            Scope::User => "user",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system" => Some(Scope::System),
            "user" => Some(Scope::User),
            _ => None,
        }
    }

    /// Whether mutating this scope requires administrator privileges.
    pub fn requires_elevation(&self) -> bool {
        matches!(self, Scope::System)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three accepted font container formats, identified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    TrueType,
    OpenType,
    /// TrueType collection (`.ttc`).
    Collection,
}

impl FontFormat {
    /// Identify a format from a file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ttf" => Some(FontFormat::TrueType),
            "otf" => Some(FontFormat::OpenType),
            "ttc" => Some(FontFormat::Collection),
            _ => None,
        }
    }

    /// Identify a format from a file path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FontFormat::TrueType => "ttf",
            FontFormat::OpenType => "otf",
            FontFormat::Collection => "ttc",
        }
    }

    /// The human-readable annotation appended to a registry value name.
    ///
    /// Collections get a bare name; that matches what the Windows font dialog
    /// historically wrote for `.ttc` entries.
    pub fn registry_annotation(&self) -> &'static str {
        match self {
            FontFormat::TrueType => " (TrueType)",
            FontFormat::OpenType => " (OpenType)",
            FontFormat::Collection => "",
        }
    }
}

/// One entry in the merged font catalog.
///
/// Records are ephemeral: rebuilt on every enumeration from the two hives and
/// the filesystem, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecord {
    /// Display name as stored in the registry value key. May carry a format
    /// annotation suffix such as `" (TrueType)"`.
    pub name: String,
    /// The registry value's literal stored string: a bare filename or an
    /// absolute path.
    pub file: String,
    /// Resolved absolute filesystem path. Guaranteed to exist at enumeration
    /// time.
    pub path: PathBuf,
    /// Scope classified by the resolved path's actual location, not by which
    /// hive produced the record.
    pub scope: Scope,
}

/// The `(success, message)` pair handed to the presentation layer for every
/// install/uninstall call. No other return shape is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub success: bool,
    pub message: String,
}

impl MutationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(err: crate::error::FontError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
        }
    }
}

/// Per-item outcome of a batch install/uninstall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemReport {
    /// The source path (install) or display name (uninstall) of the item.
    pub subject: String,
    pub outcome: MutationOutcome,
}

/// Aggregated result of a batch mutation. One item failing never aborts the
/// remaining items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<BatchItemReport>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn push(&mut self, subject: impl Into<String>, outcome: MutationOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.items.push(BatchItemReport {
            subject: subject.into(),
            outcome,
        });
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
