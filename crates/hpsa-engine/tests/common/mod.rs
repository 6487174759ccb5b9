#![allow(dead_code)]

use async_trait::async_trait;
use hpsa_common::names::{dashboard, welcome};
use hpsa_common::{Fixtures, NameMatch, Selector};
use hpsa_engine::config::HpsaConfig;
use hpsa_engine::config::schema::{PollConfig, SignInDelays};
use hpsa_engine::device::{DeviceError, DeviceInfo};
use hpsa_engine::driver::{DriverError, NavigationResult, UiDriver};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Elements are identified by class, or by name when no class is set.
pub fn key(selector: &Selector) -> String {
    match (&selector.class, &selector.name) {
        (Some(class), _) => class.clone(),
        (None, Some(NameMatch::Exact(name))) | (None, Some(NameMatch::Contains(name))) => {
            name.clone()
        }
        _ => selector.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub ready: bool,
    pub launches: u32,
    pub closes: u32,
    pub calls: Vec<String>,
    pub missing: HashSet<String>,
    pub appear_after: HashMap<String, u32>,
    pub checks: HashMap<String, u32>,
    pub fail_scroll: bool,
    pub fail_launch: bool,
}

/// Every element is present unless marked missing or delayed.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// No exception popup and no browser window caption.
    pub fn for_app() -> Self {
        Self::new()
            .missing(dashboard::EXCEPTION_BTN)
            .missing("FrameCaptionButton")
    }

    pub fn missing(self, key: &str) -> Self {
        self.state.lock().unwrap().missing.insert(key.to_string());
        self
    }

    pub fn present(self, key: &str) -> Self {
        self.state.lock().unwrap().missing.remove(key);
        self
    }

    /// `key` shows up once it has been looked for `checks` times.
    pub fn appearing_after(self, key: &str, checks: u32) -> Self {
        self.state
            .lock()
            .unwrap()
            .appear_after
            .insert(key.to_string(), checks);
        self
    }

    pub fn failing_scroll(self) -> Self {
        self.state.lock().unwrap().fail_scroll = true;
        self
    }

    pub fn failing_launch(self) -> Self {
        self.state.lock().unwrap().fail_launch = true;
        self
    }

    pub fn ready(self) -> Self {
        self.state.lock().unwrap().ready = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("click:").map(str::to_string))
            .collect()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn launches(&self) -> u32 {
        self.state.lock().unwrap().launches
    }

    pub fn closes(&self) -> u32 {
        self.state.lock().unwrap().closes
    }

    fn is_present(&self, selector: &Selector) -> bool {
        let key = key(selector);
        let mut state = self.state.lock().unwrap();
        if state.missing.contains(&key) {
            return false;
        }
        match state.appear_after.get(&key).copied() {
            Some(after) => {
                let seen = state.checks.entry(key).or_insert(0);
                *seen += 1;
                *seen > after
            }
            None => true,
        }
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn interact(&self, verb: &str, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        if !self.is_present(selector) {
            return Err(DriverError::not_found(key(selector)));
        }
        self.record(format!("{}:{}#{}", verb, key(selector), nth));
        Ok(())
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn launch(&mut self) -> Result<(), DriverError> {
        let state = self.state.get_mut().unwrap();
        state.launches += 1;
        if state.fail_launch {
            return Err(DriverError::Other("no browser".into()));
        }
        state.ready = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        let state = self.state.get_mut().unwrap();
        state.closes += 1;
        state.ready = false;
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.state.lock().unwrap().ready
    }

    async fn navigate(&self, url: &str) -> Result<NavigationResult, DriverError> {
        self.record(format!("navigate:{}", url));
        Ok(NavigationResult {
            url: url.to_string(),
            title: "HP Support Assistant".to_string(),
        })
    }

    async fn reload(&self) -> Result<NavigationResult, DriverError> {
        self.record("reload".to_string());
        Ok(NavigationResult::default())
    }

    async fn exists(&self, selector: &Selector, _nth: usize) -> Result<bool, DriverError> {
        Ok(self.is_present(selector))
    }

    async fn click(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        self.interact("click", selector, nth)
    }

    async fn focus(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        self.interact("focus", selector, nth)
    }

    async fn make_visible(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        self.interact("reveal", selector, nth)
    }

    async fn hover(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        self.interact("hover", selector, nth)
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        self.record(format!("type:{}", text));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), DriverError> {
        self.record(format!("key:{}", key));
        Ok(())
    }

    async fn scroll_down(&self) -> Result<(), DriverError> {
        if self.state.lock().unwrap().fail_scroll {
            return Err(DriverError::Input("wheel event rejected".into()));
        }
        self.record("scroll".to_string());
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.record("screenshot".to_string());
        Ok(b"\x89PNG".to_vec())
    }

    async fn set_local_storage(&self, key: &str, value: &str) -> Result<(), DriverError> {
        self.record(format!("storage:{}={}", key, value));
        Ok(())
    }
}

/// Fixed VPD values.
pub struct StaticDevice(pub HashMap<String, String>);

impl StaticDevice {
    pub fn sample() -> Self {
        Self(HashMap::from([
            ("model_name".to_string(), "HP Chromebook 14".to_string()),
            ("serial_number".to_string(), "5CD1234XYZ".to_string()),
            ("sku_number".to_string(), "4A8Y2UT-ABA".to_string()),
        ]))
    }
}

#[async_trait]
impl DeviceInfo for StaticDevice {
    async fn read_vpd(&self, field: &str) -> Result<String, DeviceError> {
        self.0
            .get(field)
            .cloned()
            .ok_or_else(|| DeviceError::Empty(field.to_string()))
    }
}

const WELCOME_NAMES: &[&str] = &[
    welcome::LETS_START,
    welcome::LAUNCH_SUPPORT_ASSISTANT,
    welcome::SELECT_REGION,
    welcome::DROP_MENU,
    welcome::SELECT_REGION_US,
    welcome::CONTINUE,
    welcome::DONT_SHOW_AGAIN,
    welcome::CONTINUE_AS_GUEST,
    welcome::WARRANTY_OPTION,
    welcome::USAGE_DATA,
    welcome::IMPROVE_MY_EXPERIENCE,
    welcome::CREATE_ACCOUNT,
    welcome::DETAILS,
    welcome::LETS_SHARE_LATER,
    welcome::CLOSE_PIN_POPUP,
    welcome::SPECIFICATIONS,
    welcome::SPECIFICATIONS_LIST,
    welcome::SPECIFICATIONS_CLOSE,
    welcome::NETWORK,
    welcome::CREATE_ACCOUNT_OR_SIGN_IN,
    welcome::USERNAME,
    welcome::PROFILE,
    welcome::SIGN_OUT,
    welcome::SIGN_OUT_CONFIRM,
    welcome::LOGGED_IN,
];

const DASHBOARD_NAMES: &[&str] = &[
    dashboard::WARRANTY_CARD,
    dashboard::WARRANTY_BACK,
    dashboard::ADDITIONAL_INFORMATION,
    dashboard::WARRANTY_CARD_GET_DETAIL,
    dashboard::WARRANTY_CARD_GET_DETAIL_YES,
    dashboard::BATTERY_CHECK,
    dashboard::BATTERY_CHECK_BACK,
    dashboard::RUN_BATTERY_CHECK,
    dashboard::RUN_BATTERY_CHECK_DISABLED,
    dashboard::CHECK_CPU,
    dashboard::CHECK_CPU_BACK,
    dashboard::CPU_CHECK_PASS_IMAGE,
    dashboard::CHECK_SYSTEM_MEMORY,
    dashboard::CHECK_SYSTEM_MEMORY_BACK,
    dashboard::CHECK_CONNECTIVITY,
    dashboard::CHECK_CONNECTIVITY_BACK,
    dashboard::COMPONENT_TEST,
    dashboard::COMPONENT_TEST_BACK,
    dashboard::CHECK_STORAGE,
    dashboard::CHECK_STORAGE_BACK,
    dashboard::SETTINGS,
    dashboard::ABOUT_HPSA,
    dashboard::SEE_ALL,
    dashboard::FEEDBACK,
    dashboard::ONE_STAR,
    dashboard::TWO_STARS,
    dashboard::THREE_STARS,
    dashboard::FOUR_STARS,
    dashboard::FIVE_STARS,
    dashboard::FEEDBACK_TEXTBOX_UNSELECT,
    dashboard::FEEDBACK_LINK,
    dashboard::FEEDBACK_CANCEL,
    dashboard::DEVICE_NAME,
    dashboard::SERIAL_NUMBER,
    dashboard::PRODUCT_NUMBER,
    dashboard::EXCEPTION_BTN,
    dashboard::VIRTUAL_AGENT,
    dashboard::VIRTUAL_AGENT_DOWN,
    dashboard::VIRTUAL_AGENT_UP,
    dashboard::VIRTUAL_AGENT_CLOSE,
];

/// Ordinals differing from the first match.
fn nth_of(name: &str) -> usize {
    match name {
        welcome::WARRANTY_OPTION => 1,
        welcome::USAGE_DATA => 2,
        welcome::SIGN_OUT => 1,
        welcome::NETWORK => 3,
        dashboard::CHECK_SYSTEM_MEMORY => 2,
        dashboard::ABOUT_HPSA => 1,
        dashboard::FIVE_STARS => 4,
        _ => 0,
    }
}

fn table(key: &str, names: &[&str]) -> serde_json::Value {
    let entries: Vec<_> = names
        .iter()
        .map(|name| json!({ "name": name, "class": name, "nth": nth_of(name) }))
        .collect();
    let mut file = serde_json::Map::new();
    file.insert(key.to_string(), serde_json::Value::Array(entries));
    serde_json::Value::Object(file)
}

/// A fixture directory in which every element's class equals its name.
pub fn fixture_dir(with_profile: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("hpsa.json"),
        table("welcome", WELCOME_NAMES).to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("dashboard.json"),
        table("dashboard", DASHBOARD_NAMES).to_string(),
    )
    .unwrap();
    if with_profile {
        let profiles = json!({
            "profile": [{ "id": "1", "username": "tester@example.com", "password": "hunter2" }]
        });
        std::fs::write(dir.path().join("profile.json"), profiles.to_string()).unwrap();
    }
    dir
}

pub fn fixtures(with_profile: bool) -> Fixtures {
    let dir = fixture_dir(with_profile);
    Fixtures::load_from_dir(dir.path()).unwrap()
}

/// Short budgets so failing waits finish quickly in real time.
pub fn fast_config(screenshot_dir: &Path) -> HpsaConfig {
    let mut config = HpsaConfig::default();
    config.paths.screenshot_dir = screenshot_dir.to_path_buf();
    config.timing.welcome = PollConfig::new(10, 50);
    config.timing.dashboard = PollConfig::new(10, 50);
    config.timing.element = PollConfig::new(5, 20);
    config.timing.input = PollConfig::new(10, 50);
    config.timing.install = PollConfig::new(10, 50);
    config.timing.attempt_timeout_ms = None;
    config.timing.scroll.scrolls_per_retry = 3;
    config.timing.sign_in = SignInDelays {
        page_load_ms: 0,
        password_page_ms: 0,
        completion_ms: 0,
    };
    config
}
