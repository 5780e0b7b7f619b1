//! Font installation: validate, copy, register, announce.

use crate::config::EngineConfig;
use crate::error::{FontError, Result};
use crate::hive::RegistryHive;
use crate::naming::display_name;
use crate::notify::ChangeNotifier;
use crate::types::{BatchReport, FontFormat, MutationOutcome, Scope};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Install a single font file into a scope.
///
/// Validation order (first failure short-circuits): source exists, extension
/// is in the allow-list, destination filename is free. Only then is the file
/// copied and the registry value written, followed by one change broadcast.
pub fn install_font(
    config: &EngineConfig,
    hive: &dyn RegistryHive,
    notifier: &dyn ChangeNotifier,
    source: &Path,
    scope: Scope,
) -> Result<String> {
    let message = install_one(config, hive, source, scope)?;
    notifier.notify_font_change();
    Ok(message)
}

/// Install several fonts into one scope. Each file is processed
/// independently; one failure never aborts the rest. The change broadcast
/// fires once, after the loop, if anything succeeded.
pub fn install_batch(
    config: &EngineConfig,
    hive: &dyn RegistryHive,
    notifier: &dyn ChangeNotifier,
    sources: &[PathBuf],
    scope: Scope,
) -> BatchReport {
    let mut report = BatchReport::default();
    for source in sources {
        let outcome = match install_one(config, hive, source, scope) {
            Ok(message) => MutationOutcome::ok(message),
            Err(e) => MutationOutcome::failure(e),
        };
        report.push(source.display().to_string(), outcome);
    }
    if report.succeeded > 0 {
        notifier.notify_font_change();
    }
    report
}

fn install_one(
    config: &EngineConfig,
    hive: &dyn RegistryHive,
    source: &Path,
    scope: Scope,
) -> Result<String> {
    if !source.exists() {
        return Err(FontError::FileNotFound(source.to_path_buf()));
    }

    let format = FontFormat::from_path(source).ok_or_else(|| FontError::UnsupportedFormat {
        extension: source
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })?;

    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| FontError::InstallFailed {
            message: format!("Source path has no filename: {}", source.display()),
        })?;

    let target = config.root_for(scope).join(&filename);
    if target.exists() {
        // Never overwrite an installed font file.
        return Err(FontError::AlreadyInstalled { scope });
    }

    // Copy first, register second. The two steps are not atomic: an
    // interruption in between leaves an orphan file that no catalog entry
    // exposes, an accepted inconsistency window.
    std::fs::copy(source, &target).map_err(|e| map_install_io(e, scope))?;
    copy_modified_time(source, &target).map_err(|e| map_install_io(e, scope))?;

    // Value name is the derived display name; value data is the plain
    // filename, never the absolute path, so the record stays portable if the
    // scope root ever moves.
    let name = display_name(&filename, format);
    hive.set_value(&name, &filename)?;

    debug!(
        "Installed \"{}\" as {} scope font ({})",
        name,
        scope,
        target.display()
    );
    Ok(format!("Font installed to the {} scope", scope))
}

// `fs::copy` carries contents and permissions only; the installed file also
// keeps the source's modification time.
fn copy_modified_time(source: &Path, target: &Path) -> std::io::Result<()> {
    let modified = std::fs::metadata(source)?.modified()?;
    let file = std::fs::OpenOptions::new().write(true).open(target)?;
    file.set_modified(modified)
}

fn map_install_io(err: std::io::Error, scope: Scope) -> FontError {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        FontError::privilege(scope)
    } else {
        FontError::InstallFailed {
            message: err.to_string(),
        }
    }
}
