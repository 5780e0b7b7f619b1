//! In-memory registry hive.
//!
//! Backs the engine where no real registry exists: tests, non-Windows hosts
//! embedding the engine against their own store. Values keep insertion order
//! so enumeration-order-sensitive behavior (dedup precedence, catalog
//! sorting) can be exercised deterministically.

use crate::error::{FontError, Result};
use crate::hive::RegistryHive;
use std::sync::Mutex;

/// An insertion-ordered, thread-safe in-memory hive.
#[derive(Debug, Default)]
pub struct MemoryHive {
    values: Mutex<Vec<(String, String)>>,
}

impl MemoryHive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through the engine, mimicking registry
    /// state left behind by other software.
    pub fn seed(&self, name: impl Into<String>, data: impl Into<String>) {
        let mut values = self.lock();
        let name = name.into();
        let data = data.into();
        if let Some(entry) = values.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = data;
        } else {
            values.push((name, data));
        }
    }

    /// Look up a value's data by name.
    pub fn get(&self, name: &str) -> Option<String> {
        self.lock()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.clone())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, String)>> {
        // A poisoned lock means a panic mid-mutation in another test thread;
        // the underlying Vec is still structurally sound.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RegistryHive for MemoryHive {
    fn enumerate(&self) -> Result<Vec<(String, String)>> {
        Ok(self.lock().clone())
    }

    fn set_value(&self, name: &str, data: &str) -> Result<()> {
        self.seed(name, data);
        Ok(())
    }

    fn delete_value(&self, name: &str) -> Result<()> {
        let mut values = self.lock();
        let before = values.len();
        values.retain(|(n, _)| n != name);
        if values.len() == before {
            return Err(FontError::RegistryEntryMissing {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
