//! End-to-end engine behavior against in-memory hives and a real temp
//! filesystem.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use typecase_library::{
    ChangeNotifier, EngineConfig, FontEngine, MemoryHive, Scope,
};

/// Notifier test double counting broadcasts.
#[derive(Default)]
struct CountingNotifier {
    count: AtomicUsize,
}

impl CountingNotifier {
    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ChangeNotifier for CountingNotifier {
    fn notify_font_change(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

struct Fixture {
    engine: FontEngine,
    system_hive: Arc<MemoryHive>,
    user_hive: Arc<MemoryHive>,
    notifier: Arc<CountingNotifier>,
    system_dir: PathBuf,
    user_dir: PathBuf,
    temp: TempDir,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let system_dir = temp.path().join("system-fonts");
    let user_dir = temp.path().join("user-fonts");
    std::fs::create_dir_all(&system_dir).unwrap();
    std::fs::create_dir_all(&user_dir).unwrap();

    let system_hive = Arc::new(MemoryHive::new());
    let user_hive = Arc::new(MemoryHive::new());
    let notifier = Arc::new(CountingNotifier::default());

    let engine = FontEngine::with_parts(
        EngineConfig::from_roots(&system_dir, &user_dir),
        system_hive.clone(),
        user_hive.clone(),
        notifier.clone(),
    );

    Fixture {
        engine,
        system_hive,
        user_hive,
        notifier,
        system_dir,
        user_dir,
        temp,
    }
}

fn write_font(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, b"\x00\x01\x00\x00fake-font-bytes").unwrap();
    path
}

#[test]
fn test_round_trip_install_list_uninstall() {
    let fx = fixture();
    let source = write_font(fx.temp.path(), "X.ttf");

    // Install into the user scope
    let outcome = fx.engine.install(&source, Scope::User);
    assert!(outcome.success, "{}", outcome.message);

    // The catalog now carries exactly one record with the TrueType
    // annotation, the bare filename as stored value, and user scope.
    let fonts = fx.engine.list_fonts();
    assert_eq!(fonts.len(), 1);
    let record = &fonts[0];
    assert!(record.name.ends_with(" (TrueType)"));
    assert_eq!(record.file, "X.ttf");
    assert_eq!(record.scope, Scope::User);
    assert!(record.path.is_file());

    // Uninstall using the returned (name, file) pair
    let outcome = fx.engine.uninstall(&record.name, &record.file, Scope::User);
    assert!(outcome.success, "{}", outcome.message);

    assert!(fx.engine.list_fonts().is_empty());
    assert!(!fx.user_dir.join("X.ttf").exists());
}

#[test]
fn test_install_idempotence_guard() {
    let fx = fixture();
    let source = write_font(fx.temp.path(), "Fira.ttf");

    assert!(fx.engine.install(&source, Scope::User).success);
    let second = fx.engine.install(&source, Scope::User);

    assert!(!second.success);
    assert!(second.message.contains("already installed"));
    assert_eq!(fx.user_hive.len(), 1);
    assert_eq!(fx.engine.list_fonts().len(), 1);
}

#[test]
fn test_dedup_across_hives_yields_single_record() {
    let fx = fixture();
    write_font(&fx.system_dir, "arial.ttf");
    let absolute = fx.system_dir.join("arial.ttf").to_string_lossy().to_string();

    // Both registries record the same font at the same resolved path.
    fx.system_hive.seed("Arial (TrueType)", "arial.ttf");
    fx.user_hive.seed("Arial (TrueType)", &absolute);

    let fonts = fx.engine.list_fonts();
    assert_eq!(fonts.len(), 1);
    assert_eq!(fonts[0].scope, Scope::System);
}

#[test]
fn test_scope_follows_resolved_path_not_source_hive() {
    let fx = fixture();
    write_font(&fx.system_dir, "corp.ttf");
    let absolute = fx.system_dir.join("corp.ttf").to_string_lossy().to_string();

    // Recorded only in the user hive, but living under the system root.
    fx.user_hive.seed("Corp (TrueType)", &absolute);

    let fonts = fx.engine.list_fonts();
    assert_eq!(fonts.len(), 1);
    assert_eq!(fonts[0].scope, Scope::System);
}

#[test]
fn test_stale_registry_entries_never_surface() {
    let fx = fixture();
    fx.system_hive.seed("Ghost (TrueType)", "ghost.ttf");
    fx.user_hive.seed("Phantom (OpenType)", "phantom.otf");

    assert!(fx.engine.list_fonts().is_empty());
}

#[test]
fn test_uninstall_tolerates_externally_deleted_file() {
    let fx = fixture();
    let source = write_font(fx.temp.path(), "Gone.ttf");
    assert!(fx.engine.install(&source, Scope::User).success);

    // Someone else deletes the file behind our back.
    std::fs::remove_file(fx.user_dir.join("Gone.ttf")).unwrap();

    let outcome = fx.engine.uninstall("Gone (TrueType)", "Gone.ttf", Scope::User);
    assert!(outcome.success, "{}", outcome.message);
    assert!(fx.user_hive.is_empty());
}

#[test]
fn test_uninstall_unknown_name_reports_missing_entry() {
    let fx = fixture();
    let outcome = fx.engine.uninstall("Nope (TrueType)", "nope.ttf", Scope::User);

    assert!(!outcome.success);
    assert!(outcome.message.contains("Registry entry not found"));
}

#[test]
fn test_catalog_sorted_regardless_of_hive_order() {
    let fx = fixture();
    for file in ["zz.ttf", "aa.ttf", "mm.ttf"] {
        write_font(&fx.user_dir, file);
    }
    // Seed deliberately unsorted.
    fx.user_hive.seed("ZZ Top (TrueType)", "zz.ttf");
    fx.user_hive.seed("MM Mono (TrueType)", "mm.ttf");
    fx.user_hive.seed("AA Display (TrueType)", "aa.ttf");

    let names: Vec<String> = fx.engine.list_fonts().into_iter().map(|r| r.name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_notifier_fires_once_per_successful_mutation() {
    let fx = fixture();
    let source = write_font(fx.temp.path(), "Tick.ttf");

    assert!(fx.engine.install(&source, Scope::User).success);
    assert_eq!(fx.notifier.count(), 1);

    // A failed mutation must not announce anything.
    assert!(!fx.engine.install(&source, Scope::User).success);
    assert_eq!(fx.notifier.count(), 1);

    assert!(fx.engine.uninstall("Tick (TrueType)", "Tick.ttf", Scope::User).success);
    assert_eq!(fx.notifier.count(), 2);
}

#[test]
fn test_batch_install_aggregates_and_notifies_once() {
    let fx = fixture();
    let a = write_font(fx.temp.path(), "A.ttf");
    let missing = fx.temp.path().join("missing.ttf");
    let c = write_font(fx.temp.path(), "C.otf");

    let report = fx.engine.install_batch(&[a, missing, c], Scope::User);

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.items.len(), 3);
    assert_eq!(fx.notifier.count(), 1);
    assert_eq!(fx.engine.list_fonts().len(), 2);
}

#[test]
fn test_batch_with_no_successes_stays_silent() {
    let fx = fixture();
    let report = fx
        .engine
        .install_batch(&[fx.temp.path().join("nope.ttf")], Scope::User);

    assert_eq!(report.succeeded, 0);
    assert_eq!(fx.notifier.count(), 0);
}

#[test]
fn test_batch_uninstall_independent_outcomes() {
    let fx = fixture();
    for file in ["one.ttf", "two.ttf"] {
        let source = write_font(fx.temp.path(), file);
        assert!(fx.engine.install(&source, Scope::User).success);
    }
    let notifications_before = fx.notifier.count();

    let entries = vec![
        ("one (TrueType)".to_string(), "one.ttf".to_string()),
        ("ghost (TrueType)".to_string(), "ghost.ttf".to_string()),
        ("two (TrueType)".to_string(), "two.ttf".to_string()),
    ];
    let report = fx.engine.uninstall_batch(&entries, Scope::User);

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(fx.notifier.count(), notifications_before + 1);
    assert!(fx.engine.list_fonts().is_empty());
}

#[test]
fn test_search_filters_the_live_catalog() {
    let fx = fixture();
    for file in ["FiraCode.ttf", "Arial.ttf"] {
        let source = write_font(fx.temp.path(), file);
        assert!(fx.engine.install(&source, Scope::User).success);
    }

    let hits = fx.engine.search_fonts("fira");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].file, "FiraCode.ttf");
    assert_eq!(fx.engine.search_fonts("").len(), 2);
}

#[test]
fn test_outcomes_serialize_for_host_consumption() {
    let fx = fixture();
    let outcome = fx.engine.install(&fx.temp.path().join("x.woff"), Scope::User);

    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"success\":false"));
}
