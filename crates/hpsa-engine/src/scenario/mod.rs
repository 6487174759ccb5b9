//! End-to-end scenarios and the runner that drives them.

mod account;
mod diagnostics;
pub mod runner;
mod tour;

use crate::config::HpsaConfig;
use crate::device::DeviceInfo;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use runner::{ScenarioError, ScenarioReport, ScenarioRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Onboarding, then every dashboard feature with captures.
    Walkthrough,
    /// Model, serial and product number shown match the device's VPD.
    CheckSnPn,
    BatteryTest,
    CpuCheck,
    /// Sign in from the onboarding wizard.
    SignWelcome,
    /// Sign in from the dashboard after guest onboarding.
    SignInMainPage,
    /// Dashboard captures after declining every sharing option.
    ScreenshotNoOption,
    /// Virtual agent captures after declining every sharing option.
    ScreenshotNoOptionVa,
    /// Captures of every onboarding page.
    ScreenshotNoOptionWelcome,
    StressCpu,
    SmokeExtension,
}

impl Scenario {
    pub const ALL: [Scenario; 11] = [
        Scenario::Walkthrough,
        Scenario::CheckSnPn,
        Scenario::BatteryTest,
        Scenario::CpuCheck,
        Scenario::SignWelcome,
        Scenario::SignInMainPage,
        Scenario::ScreenshotNoOption,
        Scenario::ScreenshotNoOptionVa,
        Scenario::ScreenshotNoOptionWelcome,
        Scenario::StressCpu,
        Scenario::SmokeExtension,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Walkthrough => "walkthrough",
            Scenario::CheckSnPn => "check-sn-pn",
            Scenario::BatteryTest => "battery-test",
            Scenario::CpuCheck => "cpu-check",
            Scenario::SignWelcome => "sign-welcome",
            Scenario::SignInMainPage => "sign-in-main-page",
            Scenario::ScreenshotNoOption => "screenshot-no-option",
            Scenario::ScreenshotNoOptionVa => "screenshot-no-option-va",
            Scenario::ScreenshotNoOptionWelcome => "screenshot-no-option-welcome",
            Scenario::StressCpu => "stress-cpu",
            Scenario::SmokeExtension => "smoke-extension",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Walkthrough => "Onboard as guest and capture every dashboard feature",
            Scenario::CheckSnPn => "Verify model name, serial number and SKU against VPD",
            Scenario::BatteryTest => "Run the battery check and look for an exception popup",
            Scenario::CpuCheck => "Run the CPU check and wait for the pass image",
            Scenario::SignWelcome => "Create an account from the onboarding wizard",
            Scenario::SignInMainPage => "Sign in from the dashboard after onboarding",
            Scenario::ScreenshotNoOption => "Capture the dashboard with data sharing declined",
            Scenario::ScreenshotNoOptionVa => "Capture the virtual agent with data sharing declined",
            Scenario::ScreenshotNoOptionWelcome => "Capture every onboarding page",
            Scenario::StressCpu => "Start the CPU check again as soon as it allows",
            Scenario::SmokeExtension => "Sign in, open specifications and sign out",
        }
    }

    /// Whether `localStorage` is seeded before the app loads.
    pub fn seeds_local_storage(&self) -> bool {
        matches!(
            self,
            Scenario::ScreenshotNoOption
                | Scenario::ScreenshotNoOptionVa
                | Scenario::ScreenshotNoOptionWelcome
                | Scenario::StressCpu
        )
    }

    /// Whether the window left from setup is closed before onboarding.
    pub fn closes_last_browser(&self) -> bool {
        self.seeds_local_storage()
    }

    /// Whether a sign-in profile is needed.
    pub fn needs_profile(&self) -> bool {
        matches!(
            self,
            Scenario::SignWelcome | Scenario::SignInMainPage | Scenario::SmokeExtension
        )
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown scenario {0:?}")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// What a scenario script may consult besides the UI.
pub(crate) struct ScriptEnv<'a> {
    pub config: &'a HpsaConfig,
    pub device: &'a dyn DeviceInfo,
}
