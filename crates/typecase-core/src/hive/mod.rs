//! Registry hive abstraction.
//!
//! The two font registries (machine and user) are structurally identical, so
//! the engine talks to them through one small trait and picks a hive with a
//! single branch at the call boundary. Opening a hive is construction; the
//! trait covers the three operations the engine needs.
//!
//! Backends:
//! - [`WindowsHive`] — the real Win32 registry (Windows only)
//! - [`MemoryHive`] — an in-memory hive for headless use and tests

use crate::error::Result;

pub mod memory;
#[cfg(windows)]
pub mod windows;

pub use memory::MemoryHive;
#[cfg(windows)]
pub use windows::WindowsHive;

/// One scope's font registry key, enumerated as name/string-value pairs.
pub trait RegistryHive: Send + Sync {
    /// List all values as `(name, data)` pairs, in the hive's native
    /// enumeration order.
    fn enumerate(&self) -> Result<Vec<(String, String)>>;

    /// Create or overwrite a string value.
    fn set_value(&self, name: &str, data: &str) -> Result<()>;

    /// Delete a value. Returns `RegistryEntryMissing` when the value does not
    /// exist.
    fn delete_value(&self, name: &str) -> Result<()>;
}
