//! Engine configuration: registry locations, broadcast timing and scope roots.

use crate::error::{FontError, Result};
use crate::types::Scope;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Registry locations consumed by the engine.
pub struct RegistryConfig;

impl RegistryConfig {
    /// The fonts key, identical under both HKLM and HKCU.
    pub const FONTS_SUBKEY: &'static str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";
}

/// Change-broadcast configuration.
pub struct NotifyConfig;

impl NotifyConfig {
    /// Bounded wait for the `WM_FONTCHANGE` broadcast; after this the
    /// notifier gives up silently.
    pub const BROADCAST_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Scope root directories, resolved once at engine construction and passed by
/// reference into every operation. There is no hidden singleton: hosts that
/// want different roots construct a different config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Machine font directory (`%WINDIR%\Fonts`).
    pub system_fonts_dir: PathBuf,
    /// Per-user font directory (`%LOCALAPPDATA%\Microsoft\Windows\Fonts`).
    pub user_fonts_dir: PathBuf,
}

impl EngineConfig {
    /// Resolve the scope roots from the environment and create the user font
    /// directory if it does not exist yet.
    ///
    /// # Errors
    /// Returns a `Config` error when `%WINDIR%` or the local app-data
    /// directory cannot be determined (non-Windows environments).
    pub fn from_environment() -> Result<Self> {
        let windir = std::env::var_os("WINDIR").ok_or_else(|| FontError::Config {
            message: "Could not determine the Windows directory (WINDIR not set)".to_string(),
        })?;
        let system_fonts_dir = PathBuf::from(windir).join("Fonts");

        let local_data = dirs::data_local_dir().ok_or_else(|| FontError::Config {
            message: "Could not determine the local app data directory".to_string(),
        })?;
        let user_fonts_dir = local_data
            .join("Microsoft")
            .join("Windows")
            .join("Fonts");

        let config = Self {
            system_fonts_dir,
            user_fonts_dir,
        };
        config.ensure_user_dir()?;
        Ok(config)
    }

    /// Build a config from explicit roots. No directories are created; hosts
    /// and tests own the filesystem layout.
    pub fn from_roots(system_fonts_dir: impl Into<PathBuf>, user_fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            system_fonts_dir: system_fonts_dir.into(),
            user_fonts_dir: user_fonts_dir.into(),
        }
    }

    /// Create the user font directory if absent. The system directory is
    /// owned by the OS and never created here.
    pub fn ensure_user_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.user_fonts_dir)
            .map_err(|e| FontError::io_with_path(e, &self.user_fonts_dir))
    }

    /// The install root for a scope.
    pub fn root_for(&self, scope: Scope) -> &Path {
        match scope {
            Scope::System => &self.system_fonts_dir,
            Scope::User => &self.user_fonts_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_for_selects_scope_directory() {
        let config = EngineConfig::from_roots("/sys/fonts", "/user/fonts");
        assert_eq!(config.root_for(Scope::System), Path::new("/sys/fonts"));
        assert_eq!(config.root_for(Scope::User), Path::new("/user/fonts"));
    }

    #[test]
    fn test_ensure_user_dir_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("deep").join("fonts");
        let config = EngineConfig::from_roots(temp_dir.path().join("sys"), &user);

        config.ensure_user_dir().unwrap();
        assert!(user.is_dir());
        // System root is never created
        assert!(!config.system_fonts_dir.exists());
    }

    #[test]
    fn test_ensure_user_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = EngineConfig::from_roots(temp_dir.path().join("sys"), temp_dir.path());

        config.ensure_user_dir().unwrap();
        config.ensure_user_dir().unwrap();
    }

    #[test]
    fn test_fonts_subkey_is_hive_relative() {
        // The same subkey is used under both hives; it must not name a hive.
        assert!(!RegistryConfig::FONTS_SUBKEY.starts_with("HKEY"));
        assert!(RegistryConfig::FONTS_SUBKEY.ends_with("Fonts"));
    }
}
