use crate::poll::{PollOptions, ScrollOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HpsaConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default = "default_local_storage")]
    pub local_storage: BTreeMap<String, String>,
}

impl Default for HpsaConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            browser: BrowserConfig::default(),
            paths: PathsConfig::default(),
            timing: TimingConfig::default(),
            account: AccountConfig::default(),
            local_storage: default_local_storage(),
        }
    }
}

impl HpsaConfig {
    /// Local storage entries to seed, with `test_lang` following the browser
    /// language unless set explicitly.
    pub fn local_storage_entries(&self) -> BTreeMap<String, String> {
        let mut entries = self.local_storage.clone();
        entries
            .entry("test_lang".to_string())
            .or_insert_with(|| self.browser.language.clone());
        entries
    }
}

fn default_local_storage() -> BTreeMap<String, String> {
    [
        ("HP_ENV", "pro"),
        ("HP_Disable_Firebase", "true"),
        ("isFullDebug", "true"),
        ("HP_Survey", "false"),
        ("HP_Survey_Delay", "5000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_url")]
    pub url: String,
    #[serde(default)]
    pub install: InstallConfig,
    /// Text typed into the feedback box by the walkthrough, if any.
    #[serde(default)]
    pub feedback_text: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: default_app_url(),
            install: InstallConfig::default(),
            feedback_text: None,
        }
    }
}

fn default_app_url() -> String {
    "https://hpcs-appschr-itg.hpcloud.hp.com".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// The install icon lives in the browser's own toolbar; only drivers that
    /// can reach browser UI should enable this.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_install_icon_class")]
    pub icon_class: String,
    #[serde(default = "default_install_button_name")]
    pub button_name: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            icon_class: default_install_icon_class(),
            button_name: default_install_button_name(),
        }
    }
}

fn default_install_icon_class() -> String {
    "PwaInstallView".to_string()
}

fn default_install_button_name() -> String {
    "Install".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub visible: bool,
    /// Overrides the Chromium binary; `CHROME_BIN` is consulted when unset.
    #[serde(default)]
    pub chrome_bin: Option<PathBuf>,
    #[serde(default)]
    pub extension_dir: Option<PathBuf>,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    /// Class of the top-level window caption used by `close_last_browser`.
    #[serde(default = "default_caption_class")]
    pub caption_class: String,
    #[serde(default)]
    pub user_data_dir: Option<PathBuf>,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            visible: false,
            chrome_bin: None,
            extension_dir: None,
            proxy: None,
            language: default_language(),
            caption_class: default_caption_class(),
            user_data_dir: None,
            extra_args: Vec::new(),
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_caption_class() -> String {
    "FrameCaptionButton".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `hpsa.json`, `dashboard.json` and `profile.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("/var/hpsa_test_pictures")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Profile id used by the sign-in scenarios.
    #[serde(default = "default_profile_id")]
    pub profile_id: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            profile_id: default_profile_id(),
        }
    }
}

fn default_profile_id() -> String {
    "1".to_string()
}

/// Interval and budget for one family of polled actions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_poll_timeout_ms")]
    pub timeout_ms: u64,
}

impl PollConfig {
    pub const fn new(interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            interval_ms,
            timeout_ms,
        }
    }

    pub fn options(&self) -> PollOptions {
        PollOptions::new(
            Duration::from_millis(self.interval_ms),
            Duration::from_millis(self.timeout_ms),
        )
    }
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_poll_timeout_ms() -> u64 {
    60000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_scroll_retries")]
    pub retries: u32,
    #[serde(default = "default_scrolls_per_retry")]
    pub scrolls_per_retry: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            retries: default_scroll_retries(),
            scrolls_per_retry: default_scrolls_per_retry(),
        }
    }
}

impl From<ScrollConfig> for ScrollOptions {
    fn from(config: ScrollConfig) -> Self {
        ScrollOptions {
            retries: config.retries,
            scrolls_per_retry: config.scrolls_per_retry,
        }
    }
}

fn default_scroll_retries() -> u32 {
    4
}

fn default_scrolls_per_retry() -> u32 {
    100
}

/// Fixed pauses of the sign-in flow, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInDelays {
    #[serde(default = "default_sign_in_page_ms")]
    pub page_load_ms: u64,
    #[serde(default = "default_password_page_ms")]
    pub password_page_ms: u64,
    #[serde(default = "default_sign_in_completion_ms")]
    pub completion_ms: u64,
}

impl Default for SignInDelays {
    fn default() -> Self {
        Self {
            page_load_ms: default_sign_in_page_ms(),
            password_page_ms: default_password_page_ms(),
            completion_ms: default_sign_in_completion_ms(),
        }
    }
}

fn default_sign_in_page_ms() -> u64 {
    20000
}

fn default_password_page_ms() -> u64 {
    5000
}

fn default_sign_in_completion_ms() -> u64 {
    10000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Onboarding clicks.
    #[serde(default = "default_welcome_poll")]
    pub welcome: PollConfig,
    /// Dashboard clicks.
    #[serde(default = "default_dashboard_poll")]
    pub dashboard: PollConfig,
    /// Wait for an element inside a single attempt.
    #[serde(default = "default_element_poll")]
    pub element: PollConfig,
    #[serde(default = "default_input_poll")]
    pub input: PollConfig,
    /// Install icon search, reloading between attempts.
    #[serde(default = "default_install_poll")]
    pub install: PollConfig,
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: Option<u64>,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub sign_in: SignInDelays,
    /// Overall deadline for one scenario.
    #[serde(default = "default_scenario_timeout_ms")]
    pub scenario_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            welcome: default_welcome_poll(),
            dashboard: default_dashboard_poll(),
            element: default_element_poll(),
            input: default_input_poll(),
            install: default_install_poll(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            scroll: ScrollConfig::default(),
            sign_in: SignInDelays::default(),
            scenario_timeout_ms: default_scenario_timeout_ms(),
        }
    }
}

impl TimingConfig {
    /// `poll` with the configured per-attempt limit applied.
    pub fn options(&self, poll: PollConfig) -> PollOptions {
        let options = poll.options();
        match self.attempt_timeout_ms {
            Some(ms) => options.with_attempt_timeout(Duration::from_millis(ms)),
            None => options,
        }
    }

    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_millis(self.scenario_timeout_ms)
    }
}

fn default_welcome_poll() -> PollConfig {
    PollConfig::new(60000, 60000)
}

fn default_dashboard_poll() -> PollConfig {
    PollConfig::new(1000, 180000)
}

fn default_element_poll() -> PollConfig {
    PollConfig::new(300, 15000)
}

fn default_input_poll() -> PollConfig {
    PollConfig::new(30000, 60000)
}

fn default_install_poll() -> PollConfig {
    PollConfig::new(1000, 180000)
}

fn default_attempt_timeout_ms() -> Option<u64> {
    Some(90000)
}

fn default_scenario_timeout_ms() -> u64 {
    30 * 60 * 1000
}
