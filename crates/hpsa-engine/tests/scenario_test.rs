mod common;

use common::{MockDriver, StaticDevice, fast_config, fixtures};
use hpsa_common::error::FixtureError;
use hpsa_common::names::{dashboard, welcome};
use hpsa_engine::actions::FlowError;
use hpsa_engine::config::schema::PollConfig;
use hpsa_engine::scenario::{Scenario, ScenarioError, ScenarioRunner};
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_walkthrough_passes_and_closes_driver() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    let report = runner.run(&mut driver, Scenario::Walkthrough).await.unwrap();

    assert_eq!(driver.launches(), 1);
    assert_eq!(driver.closes(), 1);
    assert_eq!(report.scenario, Scenario::Walkthrough);
    assert_eq!(report.failed_steps().count(), 0);
    assert!(
        dir.path()
            .join("HPSA_hpsa01walkthrough_scrollToNetWork.png")
            .exists()
    );
    assert!(
        report
            .screenshots
            .contains(&dir.path().join("HPSA_hpsa01walkthrough_warrantyCard.png"))
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["scenario"], "walkthrough");
    assert!(json["elapsed_ms"].is_u64());
}

#[tokio::test]
async fn test_ready_driver_is_not_relaunched() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app().ready();

    runner.run(&mut driver, Scenario::Walkthrough).await.unwrap();

    assert_eq!(driver.launches(), 0);
    assert_eq!(driver.closes(), 1);
}

#[tokio::test]
async fn test_launch_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app().failing_launch();

    let err = runner.run(&mut driver, Scenario::BatteryTest).await.unwrap_err();

    assert!(matches!(err, ScenarioError::Launch { scenario: Scenario::BatteryTest, .. }));
    assert!(driver.calls().is_empty());
}

#[tokio::test]
async fn test_identity_shown_matches_vpd() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    let report = runner.run(&mut driver, Scenario::CheckSnPn).await.unwrap();

    let names: Vec<_> = report.steps.iter().map(|s| s.name.as_str()).collect();
    assert!(names.ends_with(&[
        dashboard::DEVICE_NAME,
        dashboard::SERIAL_NUMBER,
        dashboard::PRODUCT_NUMBER
    ]));
}

#[tokio::test]
async fn test_sku_is_looked_up_in_display_form() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app().missing("4A8Y2UT#ABA");

    let err = runner.run(&mut driver, Scenario::CheckSnPn).await.unwrap_err();

    match err {
        ScenarioError::Failed { source, steps, .. } => {
            assert_eq!(source.code(), "ELEMENT_NOT_FOUND");
            assert_eq!(steps.last().unwrap().name, dashboard::PRODUCT_NUMBER);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(driver.closes(), 1);
}

#[tokio::test]
async fn test_battery_exception_popup_fails_scenario() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app().present(dashboard::EXCEPTION_BTN);

    let err = runner.run(&mut driver, Scenario::BatteryTest).await.unwrap_err();

    assert_eq!(err.code(), "EXCEPTION_POPUP");
    assert!(dir.path().join("hpsa04batterytest_Exception.png").exists());
    assert!(dir.path().join("HPSA_hpsa04batterytest_batteryCheck.png").exists());
}

#[tokio::test]
async fn test_sign_in_without_profile_fails_before_ui() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    let err = runner.run(&mut driver, Scenario::SignInMainPage).await.unwrap_err();

    assert!(matches!(
        err,
        ScenarioError::Failed {
            source: FlowError::Fixture(FixtureError::MissingProfile(_)),
            ..
        }
    ));
    assert!(driver.clicks().is_empty());
}

#[tokio::test]
async fn test_sign_welcome_enters_credentials() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(true);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    runner.run(&mut driver, Scenario::SignWelcome).await.unwrap();

    let calls = driver.calls();
    let create = calls
        .iter()
        .position(|c| c == "click:CreateAccount#0")
        .unwrap();
    assert_eq!(calls[create + 1], "type:tester@example.com");
    assert_eq!(calls[create + 3], "type:hunter2");
}

#[tokio::test]
async fn test_welcome_pages_captured_after_seeding_storage() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    let report = runner
        .run(&mut driver, Scenario::ScreenshotNoOptionWelcome)
        .await
        .unwrap();

    let calls = driver.calls();
    assert_eq!(calls[0], format!("navigate:{}", config.app.url));
    assert!(calls.contains(&"storage:HP_ENV=pro".to_string()));
    assert!(calls.contains(&"storage:test_lang=en-US".to_string()));
    assert_eq!(report.screenshots.len(), 13);
    assert!(
        dir.path()
            .join("HPSA_hpsa08screenshotnooptionwelcome_Pinpopup.png")
            .exists()
    );
    // Only the window caption is out of reach.
    let failed: Vec<_> = report.failed_steps().map(|s| s.name.as_str()).collect();
    assert_eq!(failed, vec!["close browser"]);
}

#[tokio::test]
async fn test_stress_cpu_restarts_check() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    let report = runner.run(&mut driver, Scenario::StressCpu).await.unwrap();

    let runs = driver
        .clicks()
        .iter()
        .filter(|c| *c == "RunBatteryCheck#0")
        .count();
    assert_eq!(runs, 2);
    assert_eq!(report.steps.last().unwrap().name, "Run CPU check");
}

#[tokio::test(start_paused = true)]
async fn test_cpu_check_waits_for_result() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app();

    let report = runner.run(&mut driver, Scenario::CpuCheck).await.unwrap();

    assert!(report.elapsed >= Duration::from_secs(120));
    assert!(dir.path().join("HPSA_hpsa05cpucheck_checkCPU.png").exists());
    assert!(!dir.path().join("hpsa05cpucheck_Exception.png").exists());
}

#[tokio::test]
async fn test_scenario_deadline() {
    let dir = TempDir::new().unwrap();
    let mut config = fast_config(dir.path());
    config.timing.welcome = PollConfig::new(10, 60_000);
    config.timing.scenario_timeout_ms = 100;
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app().missing(welcome::LETS_START);

    let err = runner.run(&mut driver, Scenario::Walkthrough).await.unwrap_err();

    assert!(matches!(
        err,
        ScenarioError::DeadlineExceeded { deadline, .. } if deadline == Duration::from_millis(100)
    ));
    assert_eq!(err.scenario(), Scenario::Walkthrough);
    // Steps finished before the deadline are kept.
    assert_eq!(err.steps().first().unwrap().name, "install");
    assert_eq!(driver.closes(), 1);
}

#[tokio::test]
async fn test_missing_ordinal_tile_fails_walkthrough() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let fixtures = fixtures(false);
    let device = StaticDevice::sample();
    let runner = ScenarioRunner::new(&config, &fixtures, &device);
    let mut driver = MockDriver::for_app().missing(dashboard::CHECK_SYSTEM_MEMORY);

    let err = runner.run(&mut driver, Scenario::Walkthrough).await.unwrap_err();

    match err {
        ScenarioError::Failed { source, steps, .. } => {
            assert_eq!(source.code(), "ELEMENT_NOT_FOUND");
            let last = steps.last().unwrap();
            assert_eq!(last.name, dashboard::CHECK_SYSTEM_MEMORY);
            assert!(!last.success);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        !dir.path()
            .join("HPSA_hpsa01walkthrough_checkSystemMemory.png")
            .exists()
    );
    assert_eq!(driver.closes(), 1);
}
