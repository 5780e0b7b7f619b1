//! Font enumeration: merge the two hives into one deduplicated catalog.

use crate::config::EngineConfig;
use crate::hive::RegistryHive;
use crate::resolve::{normalized_path_key, resolve_font_path, scope_of_path};
use crate::types::{FontRecord, Scope};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Enumerate all installed fonts from both hives, reconciled against the
/// filesystem.
///
/// Never fails: each hive is read independently, and a hive that cannot be
/// opened or enumerated degrades to a partial catalog under a warning rather
/// than an error. Stale registry values (no backing file) are dropped.
/// Records are deduplicated on `(name, lowercased path)` with the system
/// hive winning, classified by the resolved path's actual location, and
/// sorted by name.
pub fn list_fonts(
    config: &EngineConfig,
    system_hive: &dyn RegistryHive,
    user_hive: &dyn RegistryHive,
) -> Vec<FontRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut records = Vec::new();

    for (hive_scope, hive) in [(Scope::System, system_hive), (Scope::User, user_hive)] {
        let values = match hive.enumerate() {
            Ok(values) => values,
            Err(e) => {
                warn!("Failed to read the {} font hive (non-fatal): {}", hive_scope, e);
                continue;
            }
        };

        for (name, stored) in values {
            let path = resolve_font_path(&stored, config.root_for(hive_scope));
            if !path.exists() {
                debug!("Skipping stale {} registry entry: {}", hive_scope, name);
                continue;
            }

            let key = (name.clone(), normalized_path_key(&path));
            if !seen.insert(key) {
                continue;
            }

            records.push(FontRecord {
                scope: scope_of_path(&path, config),
                name,
                file: stored,
                path,
            });
        }
    }

    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

/// Filter a catalog by a case-insensitive substring match over display name
/// and stored file value. An empty query returns everything.
pub fn search_fonts(records: &[FontRecord], query: &str) -> Vec<FontRecord> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle) || r.file.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
