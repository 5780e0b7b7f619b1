//! Font removal: unregister, delete, announce.

use crate::config::EngineConfig;
use crate::error::{FontError, Result};
use crate::hive::RegistryHive;
use crate::notify::ChangeNotifier;
use crate::resolve::resolve_font_path;
use crate::types::{BatchReport, MutationOutcome, Scope};
use tracing::debug;

/// Uninstall a font from a scope by its registry display name and stored
/// file value.
///
/// The registry value goes first: a crash afterwards leaves at most an inert
/// orphan file, never a dangling registry entry that would resurface as a
/// phantom catalog record. A backing file that is already gone is not an
/// error; removal of the registry value alone counts as success.
pub fn uninstall_font(
    config: &EngineConfig,
    hive: &dyn RegistryHive,
    notifier: &dyn ChangeNotifier,
    name: &str,
    stored_file: &str,
    scope: Scope,
) -> Result<String> {
    let message = uninstall_one(config, hive, name, stored_file, scope)?;
    notifier.notify_font_change();
    Ok(message)
}

/// Uninstall several `(name, stored_file)` entries from one scope,
/// independently per item, with a single change broadcast if anything
/// succeeded.
pub fn uninstall_batch(
    config: &EngineConfig,
    hive: &dyn RegistryHive,
    notifier: &dyn ChangeNotifier,
    entries: &[(String, String)],
    scope: Scope,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (name, stored_file) in entries {
        let outcome = match uninstall_one(config, hive, name, stored_file, scope) {
            Ok(message) => MutationOutcome::ok(message),
            Err(e) => MutationOutcome::failure(e),
        };
        report.push(name.clone(), outcome);
    }
    if report.succeeded > 0 {
        notifier.notify_font_change();
    }
    report
}

fn uninstall_one(
    config: &EngineConfig,
    hive: &dyn RegistryHive,
    name: &str,
    stored_file: &str,
    scope: Scope,
) -> Result<String> {
    hive.delete_value(name)?;

    let path = resolve_font_path(stored_file, config.root_for(scope));
    if let Err(e) = std::fs::remove_file(&path) {
        match e.kind() {
            // The registry entry may have pointed at an already-removed file,
            // or another process beat us to it. Either way the value is gone.
            std::io::ErrorKind::NotFound => {
                debug!("Backing file already gone: {}", path.display());
            }
            std::io::ErrorKind::PermissionDenied => return Err(FontError::privilege(scope)),
            _ => {
                return Err(FontError::UninstallFailed {
                    message: e.to_string(),
                })
            }
        }
    }

    debug!("Uninstalled \"{}\" from the {} scope", name, scope);
    Ok(format!("Font removed from the {} scope", scope))
}
