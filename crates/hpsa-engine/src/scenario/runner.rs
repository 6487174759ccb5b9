use super::{Scenario, ScriptEnv, account, diagnostics, tour};
use crate::actions::{FlowError, UiContext};
use crate::config::HpsaConfig;
use crate::device::DeviceInfo;
use crate::driver::{DriverError, UiDriver};
use crate::flows::{browser, install};
use crate::screenshot::ScreenshotStore;
use hpsa_common::{ActionResult, Fixtures};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to launch the browser for {scenario}: {source}")]
    Launch {
        scenario: Scenario,
        #[source]
        source: DriverError,
    },

    #[error("Scenario {scenario} failed: {source}")]
    Failed {
        scenario: Scenario,
        /// Steps recorded up to and including the failing one.
        steps: Vec<ActionResult>,
        #[source]
        source: FlowError,
    },

    #[error("Scenario {scenario} did not finish within {deadline:?}")]
    DeadlineExceeded {
        scenario: Scenario,
        deadline: Duration,
        /// Steps recorded before the deadline hit.
        steps: Vec<ActionResult>,
    },
}

impl ScenarioError {
    pub fn scenario(&self) -> Scenario {
        match self {
            ScenarioError::Launch { scenario, .. }
            | ScenarioError::Failed { scenario, .. }
            | ScenarioError::DeadlineExceeded { scenario, .. } => *scenario,
        }
    }

    /// Steps recorded before the scenario stopped.
    pub fn steps(&self) -> &[ActionResult] {
        match self {
            ScenarioError::Launch { .. } => &[],
            ScenarioError::Failed { steps, .. } | ScenarioError::DeadlineExceeded { steps, .. } => {
                steps
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ScenarioError::Launch { source, .. } => source.code(),
            ScenarioError::Failed { source, .. } => source.code(),
            ScenarioError::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
        }
    }
}

/// What a completed scenario did.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub steps: Vec<ActionResult>,
    pub screenshots: Vec<PathBuf>,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl ScenarioReport {
    /// Tolerated steps that did not succeed.
    pub fn failed_steps(&self) -> impl Iterator<Item = &ActionResult> {
        self.steps.iter().filter(|step| !step.success)
    }
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Runs scenarios against a driver, one at a time.
pub struct ScenarioRunner<'a> {
    config: &'a HpsaConfig,
    fixtures: &'a Fixtures,
    device: &'a dyn DeviceInfo,
    screenshots: ScreenshotStore,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(config: &'a HpsaConfig, fixtures: &'a Fixtures, device: &'a dyn DeviceInfo) -> Self {
        Self {
            config,
            fixtures,
            device,
            screenshots: ScreenshotStore::new(&config.paths.screenshot_dir),
        }
    }

    pub fn screenshots(&self) -> &ScreenshotStore {
        &self.screenshots
    }

    /// Launch the driver if needed, run `scenario` under the scenario
    /// deadline and close the driver whatever the outcome.
    pub async fn run<D>(&self, driver: &mut D, scenario: Scenario) -> Result<ScenarioReport, ScenarioError>
    where
        D: UiDriver + ?Sized,
    {
        info!("Running scenario {}", scenario);
        let started = Instant::now();

        if !driver.is_ready().await {
            driver
                .launch()
                .await
                .map_err(|source| ScenarioError::Launch { scenario, source })?;
        }

        let deadline = self.config.timing.scenario_timeout();
        // The context outlives the timed future so a timeout keeps its steps.
        let mut ctx = UiContext::new(
            &*driver,
            self.fixtures,
            &self.screenshots,
            &self.config.timing,
        );
        let outcome = tokio::time::timeout(deadline, self.script(&mut ctx, scenario)).await;
        let (steps, screenshots) = ctx.into_parts();

        if let Err(e) = driver.close().await {
            warn!("Failed to close the browser: {}", e);
        }

        match outcome {
            Err(_) => {
                error!("Scenario {} exceeded {:?}", scenario, deadline);
                Err(ScenarioError::DeadlineExceeded {
                    scenario,
                    deadline,
                    steps,
                })
            }
            Ok(Err(source)) => {
                error!("Scenario {} failed: {}", scenario, source);
                Err(ScenarioError::Failed {
                    scenario,
                    steps,
                    source,
                })
            }
            Ok(Ok(())) => {
                let report = ScenarioReport {
                    scenario,
                    steps,
                    screenshots,
                    elapsed: started.elapsed(),
                };
                info!(
                    steps = report.steps.len(),
                    tolerated_failures = report.failed_steps().count(),
                    "Scenario {} passed in {:?}",
                    scenario,
                    report.elapsed
                );
                Ok(report)
            }
        }
    }

    async fn script<D>(&self, ctx: &mut UiContext<'_, D>, scenario: Scenario) -> Result<(), FlowError>
    where
        D: UiDriver + ?Sized,
    {
        let config = self.config;
        let env = ScriptEnv {
            config,
            device: self.device,
        };

        if scenario.seeds_local_storage() {
            browser::prepare_local_storage(ctx, &config.app.url, &config.local_storage_entries())
                .await?;
        }
        install::install_app(ctx, &config.app.url, &config.app.install).await?;
        if scenario.closes_last_browser() {
            browser::close_last_browser(ctx, &config.browser.caption_class).await?;
        }

        match scenario {
            Scenario::Walkthrough => tour::walkthrough(ctx, &env).await,
            Scenario::CheckSnPn => diagnostics::check_sn_pn(ctx, &env).await,
            Scenario::BatteryTest => diagnostics::battery_test(ctx, &env).await,
            Scenario::CpuCheck => diagnostics::cpu_check(ctx, &env).await,
            Scenario::SignWelcome => account::sign_welcome(ctx, &env).await,
            Scenario::SignInMainPage => account::sign_in_main_page(ctx, &env).await,
            Scenario::ScreenshotNoOption => tour::screenshot_no_option(ctx, &env).await,
            Scenario::ScreenshotNoOptionVa => tour::screenshot_no_option_va(ctx, &env).await,
            Scenario::ScreenshotNoOptionWelcome => {
                tour::screenshot_no_option_welcome(ctx, &env).await
            }
            Scenario::StressCpu => diagnostics::stress_cpu(ctx, &env).await,
            Scenario::SmokeExtension => account::smoke_extension(ctx, &env).await,
        }
    }
}
