use hpsa_common::error::FixtureError;
use hpsa_common::fixture::{ElementTable, Fixtures, ProfileTable};
use hpsa_common::names::{dashboard, welcome};
use hpsa_common::selector::Selector;
use std::fs;
use tempfile::TempDir;

const WELCOME_JSON: &str = r#"{
  "Welcome": [
    { "Name": "let's get start", "Class": "welcome-start-btn", "NTH": 0 },
    { "Name": "warranty option", "Class": "mat-radio-outer-circle", "NTH": 2 },
    { "Name": "Close pin popup", "Class": "pin-popup-close" }
  ]
}"#;

const DASHBOARD_JSON: &str = r#"{
  "dashboard": [
    { "name": "WarrantyCard", "class": "warranty-card", "nth": 0 },
    { "name": "CheckSystemMemory", "class": "resource-tile", "nth": 3 },
    { "name": "CheckSystemMemory", "class": "duplicate-ignored", "nth": 9 },
    { "name": "ExceptionBtn", "class": "", "nth": 0 }
  ]
}"#;

const PROFILE_JSON: &str = r#"{
  "profile": [
    { "id": "1", "username": "tester@example.com", "password": "hunter2" }
  ]
}"#;

fn write_fixture_dir(with_profile: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hpsa.json"), WELCOME_JSON).unwrap();
    fs::write(dir.path().join("dashboard.json"), DASHBOARD_JSON).unwrap();
    if with_profile {
        fs::write(dir.path().join("profile.json"), PROFILE_JSON).unwrap();
    }
    dir
}

#[test]
fn test_capitalised_keys_load() {
    let table = ElementTable::from_json("welcome", WELCOME_JSON).unwrap();
    assert_eq!(table.len(), 3);

    let option = table.get(welcome::WARRANTY_OPTION).unwrap();
    assert_eq!(option.selector, Selector::class("mat-radio-outer-circle"));
    assert_eq!(option.nth, 2);

    // Missing NTH defaults to the first match.
    let close = table.get(welcome::CLOSE_PIN_POPUP).unwrap();
    assert_eq!(close.nth, 0);
}

#[test]
fn test_first_definition_wins() {
    let table = ElementTable::from_json("dashboard", DASHBOARD_JSON).unwrap();
    let memory = table.get(dashboard::CHECK_SYSTEM_MEMORY).unwrap();
    assert_eq!(memory.selector, Selector::class("resource-tile"));
    assert_eq!(memory.nth, 3);
}

#[test]
fn test_missing_name_is_configuration_error() {
    let table = ElementTable::from_json("dashboard", DASHBOARD_JSON).unwrap();
    match table.get(dashboard::FEEDBACK) {
        Err(FixtureError::MissingElement { table, name }) => {
            assert_eq!(table, "dashboard");
            assert_eq!(name, "Feedback");
        }
        other => panic!("expected MissingElement, got {:?}", other),
    }
}

#[test]
fn test_blank_class_is_rejected() {
    let table = ElementTable::from_json("dashboard", DASHBOARD_JSON).unwrap();
    assert!(matches!(
        table.get(dashboard::EXCEPTION_BTN),
        Err(FixtureError::EmptySelector { .. })
    ));
}

#[test]
fn test_malformed_json_reports_parse_error() {
    let result = ElementTable::from_json("welcome", r#"{"welcome": [{"name": 1}]}"#);
    assert!(matches!(result, Err(FixtureError::Parse { .. })));
}

#[test]
fn test_other_tables_key_is_rejected() {
    let result = ElementTable::from_json("welcome", DASHBOARD_JSON);
    match result {
        Err(FixtureError::MissingTable { table, .. }) => assert_eq!(table, "welcome"),
        other => panic!("expected MissingTable, got {:?}", other),
    }
}

#[test]
fn test_swapped_fixture_files_fail_to_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hpsa.json"), DASHBOARD_JSON).unwrap();
    fs::write(dir.path().join("dashboard.json"), WELCOME_JSON).unwrap();

    let err = Fixtures::load_from_dir(dir.path()).unwrap_err();
    match err {
        FixtureError::MissingTable { path, table } => {
            assert_eq!(path, dir.path().join("hpsa.json"));
            assert_eq!(table, "welcome");
        }
        other => panic!("expected MissingTable, got {:?}", other),
    }
}

#[test]
fn test_load_from_dir() {
    let dir = write_fixture_dir(true);
    let fixtures = Fixtures::load_from_dir(dir.path()).unwrap();
    assert_eq!(fixtures.welcome.label(), "welcome");
    assert_eq!(fixtures.dashboard.label(), "dashboard");

    let profile = fixtures.profiles.get("1").unwrap();
    assert_eq!(profile.username, "tester@example.com");
    assert!(!format!("{:?}", profile).contains("hunter2"));
}

#[test]
fn test_profile_file_is_optional() {
    let dir = write_fixture_dir(false);
    let fixtures = Fixtures::load_from_dir(dir.path()).unwrap();
    assert!(fixtures.profiles.is_empty());
    assert!(matches!(
        fixtures.profiles.get("1"),
        Err(FixtureError::MissingProfile(id)) if id == "1"
    ));
}

#[test]
fn test_missing_table_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Fixtures::load_from_dir(dir.path());
    assert!(matches!(result, Err(FixtureError::Io { .. })));
}

#[test]
fn test_profile_table_load() {
    let dir = write_fixture_dir(true);
    let table = ProfileTable::load(&dir.path().join("profile.json")).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("1").unwrap().password, "hunter2");
}
