//! Tests for plan execution: ordering, skip-on-failure, dry-run

mod common;

use common::{ScriptedFetcher, ScriptedUi};
use crafttui::{add_with_dependencies, installer, Catalog, InstallPlan, Mod, VersionEntry};

fn version() -> VersionEntry {
    VersionEntry {
        url: "https://dl.example.org/server-1.0.jar".to_string(),
        code: "r10".to_string(),
        label: "Stable 1.0".to_string(),
    }
}

fn mod_entry(name: &str, url: &[&str], depends: &[&str]) -> Mod {
    Mod {
        name: name.to_string(),
        mod_name: String::new(),
        author: String::new(),
        desc: String::new(),
        url: url.iter().map(|u| u.to_string()).collect(),
        filename: format!("{}.jar", name.to_lowercase()),
        depends: depends.iter().map(|d| d.to_string()).collect(),
    }
}

fn plan_of(mods: Vec<Mod>, picks: &[&str]) -> InstallPlan {
    let mut catalog = Catalog::new(mods);
    let mut plan = InstallPlan::new();
    for name in picks {
        let chosen = catalog.remove(name).expect("pick must be in catalog");
        add_with_dependencies(&mut plan, &mut catalog, chosen);
    }
    plan
}

#[test]
fn test_execute_downloads_server_then_mods_in_plan_order() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::new();
    let mut ui = ScriptedUi::new(Vec::new(), true);
    let plan = plan_of(
        vec![
            mod_entry("A", &["https://dl.example.org/a.jar"], &[]),
            mod_entry("B", &["https://dl.example.org/b.jar"], &["A"]),
        ],
        &["B"],
    );

    let report =
        installer::execute(&fetcher, &mut ui, &version(), &plan, dir.path(), false).unwrap();

    assert_eq!(report.installed, vec!["server-1.0.jar", "a.jar", "b.jar"]);
    assert_eq!(
        fetcher.downloaded_urls(),
        vec![
            "https://dl.example.org/server-1.0.jar",
            "https://dl.example.org/a.jar",
            "https://dl.example.org/b.jar",
        ]
    );
    assert!(dir.path().join("server-1.0.jar").exists());
}

#[test]
fn test_failed_mod_download_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::new().with_failing("https://dl.example.org/a.jar");
    let mut ui = ScriptedUi::new(Vec::new(), true);
    let plan = plan_of(
        vec![
            mod_entry("A", &["https://dl.example.org/a.jar"], &[]),
            mod_entry("B", &["https://dl.example.org/b.jar"], &[]),
        ],
        &["A", "B"],
    );

    let report =
        installer::execute(&fetcher, &mut ui, &version(), &plan, dir.path(), false).unwrap();

    assert_eq!(report.installed, vec!["server-1.0.jar", "b.jar"]);
    assert_eq!(report.skipped, vec!["A"]);
    assert!(ui.status_containing("could not download 'A'"));
    assert!(!dir.path().join("a.jar").exists());
    assert!(dir.path().join("b.jar").exists());
}

#[test]
fn test_failed_server_download_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::new().with_failing("https://dl.example.org/server-1.0.jar");
    let mut ui = ScriptedUi::new(Vec::new(), true);
    let plan = plan_of(
        vec![mod_entry("A", &["https://dl.example.org/a.jar"], &[])],
        &["A"],
    );

    let result = installer::execute(&fetcher, &mut ui, &version(), &plan, dir.path(), false);

    assert!(result.is_err());
    // No mods were attempted after the server failed
    assert!(fetcher.files.borrow().is_empty());
}

#[test]
fn test_mod_without_url_is_skipped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::new();
    let mut ui = ScriptedUi::new(Vec::new(), true);
    let plan = plan_of(vec![mod_entry("A", &[], &[])], &["A"]);

    let report =
        installer::execute(&fetcher, &mut ui, &version(), &plan, dir.path(), false).unwrap();

    assert_eq!(report.skipped, vec!["A"]);
    assert!(ui.status_containing("has no download URL"));
}

#[test]
fn test_dry_run_creates_no_target_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing");
    let fetcher = ScriptedFetcher::new();
    let mut ui = ScriptedUi::new(Vec::new(), true);
    let plan = plan_of(
        vec![mod_entry("A", &["https://dl.example.org/a.jar"], &[])],
        &["A"],
    );

    let report = installer::execute(&fetcher, &mut ui, &version(), &plan, &target, true).unwrap();

    assert!(report.installed.is_empty());
    assert!(fetcher.files.borrow().is_empty());
    assert!(!target.exists());
}
