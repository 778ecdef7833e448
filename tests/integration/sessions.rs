//! Session loading from files
//!
//! Tests the shipped demo files and the seed-world format end to end.

use std::path::{Path, PathBuf};

use tagtale_engine::SimulationConfig;
use tagtale_foundation::ErrorKind;
use tagtale_language::pretty::pretty_print_all;
use tagtale_language::parse_str;
use tagtale_runtime::{Session, dump_world, parse_world};

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn demo_files_load() {
    let session = Session::load(&demo("tavern.rules"), Some(demo("tavern.world").as_path())).unwrap();
    assert_eq!(session.rules().len(), 5);
    assert_eq!(session.world().entity_count(), 5);
    assert!(session.world().entity_by_name("Bomrek").is_some());
}

#[test]
fn demo_rules_run_against_the_builtin_world() {
    let mut session = Session::load(&demo("tavern.rules"), None).unwrap();
    let mut lines: Vec<String> = Vec::new();
    let summary = session
        .run(SimulationConfig::seeded(3).with_ticks(20), &mut lines)
        .unwrap();

    assert_eq!(summary.ticks, 20);
    assert_eq!(summary.fired, lines.len());
    assert!(lines.iter().any(|l| l.contains("Urist")));
}

#[test]
fn dumped_rules_reload_identically() {
    let session = Session::load(&demo("tavern.rules"), None).unwrap();
    let dumped = pretty_print_all(session.rules());
    assert_eq!(parse_str(&dumped).unwrap(), session.rules());
}

#[test]
fn dumped_world_reloads_identically() {
    let session = Session::load(&demo("tavern.rules"), Some(demo("tavern.world").as_path())).unwrap();
    let dumped = dump_world(session.world());
    let reloaded = parse_world(&dumped).unwrap();
    assert_eq!(dump_world(&reloaded), dumped);
}

#[test]
fn missing_world_file_names_the_file() {
    let err = Session::load(&demo("tavern.rules"), Some(demo("nowhere.world").as_path())).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    let source = err.context.and_then(|c| c.source).unwrap();
    assert!(source.ends_with("nowhere.world"));
}
