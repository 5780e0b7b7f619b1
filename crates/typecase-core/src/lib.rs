//! Typecase Core - Headless engine for Windows font registry management.
//!
//! This crate reconciles the two Windows font registries (machine and user
//! hives of `SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts`) against the
//! filesystem and keeps both in sync through install/uninstall operations.
//! It can be used programmatically without any UI layer; presentation is an
//! external collaborator that only ever sees catalogs and
//! `(success, message)` outcomes.
//!
//! # Example
//!
//! ```rust,ignore
//! use typecase_library::{FontEngine, Scope};
//!
//! fn main() -> typecase_library::Result<()> {
//!     let engine = FontEngine::new()?;
//!
//!     for font in engine.list_fonts() {
//!         println!("{} [{}] -> {}", font.name, font.scope, font.path.display());
//!     }
//!
//!     let outcome = engine.install("C:\\Downloads\\FiraCode.ttf".as_ref(), Scope::User);
//!     println!("{}: {}", outcome.success, outcome.message);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod hive;
pub mod install;
pub mod naming;
pub mod notify;
pub mod platform;
pub mod resolve;
pub mod types;
pub mod uninstall;

// Re-export commonly used types
pub use config::{EngineConfig, NotifyConfig, RegistryConfig};
pub use error::{FontError, Result};
pub use hive::{MemoryHive, RegistryHive};
#[cfg(windows)]
pub use hive::WindowsHive;
pub use notify::{ChangeNotifier, SystemNotifier};
pub use platform::is_elevated;
pub use types::{BatchItemReport, BatchReport, FontFormat, FontRecord, MutationOutcome, Scope};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The font registry engine: one configuration, one hive per scope, one
/// change notifier.
///
/// Scope roots are resolved once at construction and referenced everywhere
/// after; there is no hidden global state. Enumeration, install and uninstall
/// all go through the same path resolution, so the roots are a single source
/// of truth.
///
/// The engine performs no internal locking across operations: the registries
/// and the filesystem are OS-arbitrated shared resources, and the calling
/// layer is responsible for serializing a "mutate, then re-enumerate"
/// sequence.
pub struct FontEngine {
    config: EngineConfig,
    system_hive: Arc<dyn RegistryHive>,
    user_hive: Arc<dyn RegistryHive>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl FontEngine {
    /// Create an engine wired to the real Windows font store: environment
    /// resolved roots, HKLM/HKCU hives and the `WM_FONTCHANGE` broadcaster.
    ///
    /// The per-user font directory is created if it does not exist yet.
    #[cfg(windows)]
    pub fn new() -> Result<Self> {
        let config = EngineConfig::from_environment()?;
        Ok(Self::with_parts(
            config,
            Arc::new(WindowsHive::new(Scope::System)),
            Arc::new(WindowsHive::new(Scope::User)),
            Arc::new(SystemNotifier::new()),
        ))
    }

    /// The Windows font store does not exist on this platform. Hosts that
    /// want the engine against their own store wire one up via
    /// [`FontEngine::with_parts`].
    #[cfg(not(windows))]
    pub fn new() -> Result<Self> {
        Err(FontError::Config {
            message: "The Windows font registry is unavailable on this platform; \
                      use FontEngine::with_parts with custom hives"
                .to_string(),
        })
    }

    /// Create an engine from explicit parts. This is the seam hosts and
    /// tests use to substitute hive backends or a silent notifier.
    pub fn with_parts(
        config: EngineConfig,
        system_hive: Arc<dyn RegistryHive>,
        user_hive: Arc<dyn RegistryHive>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            config,
            system_hive,
            user_hive,
            notifier,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hive selection is the single scope branch in the engine.
    fn hive_for(&self, scope: Scope) -> &dyn RegistryHive {
        match scope {
            Scope::System => self.system_hive.as_ref(),
            Scope::User => self.user_hive.as_ref(),
        }
    }

    /// Enumerate the merged, deduplicated, sorted font catalog. Never fails;
    /// an unreadable hive degrades to a partial result.
    pub fn list_fonts(&self) -> Vec<FontRecord> {
        catalog::list_fonts(
            &self.config,
            self.system_hive.as_ref(),
            self.user_hive.as_ref(),
        )
    }

    /// Enumerate and filter by a case-insensitive substring over name and
    /// stored file value.
    pub fn search_fonts(&self, query: &str) -> Vec<FontRecord> {
        catalog::search_fonts(&self.list_fonts(), query)
    }

    /// Install one font file into a scope.
    pub fn install(&self, source: &Path, scope: Scope) -> MutationOutcome {
        match install::install_font(
            &self.config,
            self.hive_for(scope),
            self.notifier.as_ref(),
            source,
            scope,
        ) {
            Ok(message) => MutationOutcome::ok(message),
            Err(e) => MutationOutcome::failure(e),
        }
    }

    /// Install several font files into one scope with per-file outcomes.
    pub fn install_batch(&self, sources: &[PathBuf], scope: Scope) -> BatchReport {
        install::install_batch(
            &self.config,
            self.hive_for(scope),
            self.notifier.as_ref(),
            sources,
            scope,
        )
    }

    /// Uninstall a font by its registry display name and stored file value.
    pub fn uninstall(&self, name: &str, stored_file: &str, scope: Scope) -> MutationOutcome {
        match uninstall::uninstall_font(
            &self.config,
            self.hive_for(scope),
            self.notifier.as_ref(),
            name,
            stored_file,
            scope,
        ) {
            Ok(message) => MutationOutcome::ok(message),
            Err(e) => MutationOutcome::failure(e),
        }
    }

    /// Uninstall several `(name, stored_file)` entries with per-item outcomes.
    pub fn uninstall_batch(&self, entries: &[(String, String)], scope: Scope) -> BatchReport {
        uninstall::uninstall_batch(
            &self.config,
            self.hive_for(scope),
            self.notifier.as_ref(),
            entries,
            scope,
        )
    }
}
