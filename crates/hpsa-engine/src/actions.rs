//! Step helpers shared by every flow and scenario.
//!
//! Each helper resolves a symbolic element through the fixture tables, runs
//! the find-and-interact sequence under the poll executor and records an
//! [`ActionResult`]. Whether a failure ends the scenario is decided per call
//! with [`FailurePolicy`].

use crate::config::schema::TimingConfig;
use crate::device::DeviceError;
use crate::driver::{DriverError, UiDriver};
use crate::poll::{
    PollError, PollOptions, PollOutcome, ScrollError, ScrollOptions, poll_while,
    scroll_until_found,
};
use crate::screenshot::{ScreenshotError, ScreenshotStore};
use hpsa_common::error::FixtureError;
use hpsa_common::names::{dashboard, welcome};
use hpsa_common::{ActionResult, ElementDescriptor, Fixtures, Role, Selector};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Which fixture table a symbolic name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Welcome,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// A failure aborts the scenario.
    Required,
    /// A failure is logged and recorded; the scenario continues.
    Tolerated,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("{name} failed after {attempts} attempt(s): {source}")]
    Action {
        name: String,
        attempts: u32,
        #[source]
        source: PollError<DriverError>,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Screenshot(#[from] ScreenshotError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Exception popup recorded in {}", .0.display())]
    ExceptionRaised(PathBuf),
}

impl FlowError {
    pub fn code(&self) -> &'static str {
        match self {
            FlowError::Fixture(_) => "FIXTURE_ERROR",
            FlowError::Action { source, .. } => match source {
                PollError::Failed(e) => e.code(),
                PollError::AttemptTimedOut(_) => "TIMEOUT",
            },
            FlowError::Driver(e) => e.code(),
            FlowError::Screenshot(_) => "SCREENSHOT_ERROR",
            FlowError::Device(_) => "DEVICE_ERROR",
            FlowError::ExceptionRaised(_) => "EXCEPTION_POPUP",
        }
    }
}

pub struct UiContext<'a, D: ?Sized> {
    driver: &'a D,
    fixtures: &'a Fixtures,
    screenshots: &'a ScreenshotStore,
    timing: &'a TimingConfig,
    steps: Vec<ActionResult>,
    captured: Vec<PathBuf>,
}

impl<'a, D: UiDriver + ?Sized> UiContext<'a, D> {
    pub fn new(
        driver: &'a D,
        fixtures: &'a Fixtures,
        screenshots: &'a ScreenshotStore,
        timing: &'a TimingConfig,
    ) -> Self {
        Self {
            driver,
            fixtures,
            screenshots,
            timing,
            steps: Vec::new(),
            captured: Vec::new(),
        }
    }

    pub fn driver(&self) -> &'a D {
        self.driver
    }

    pub fn fixtures(&self) -> &'a Fixtures {
        self.fixtures
    }

    pub fn timing(&self) -> &'a TimingConfig {
        self.timing
    }

    pub fn steps(&self) -> &[ActionResult] {
        &self.steps
    }

    /// Recorded steps and the screenshots written, in order.
    pub fn into_parts(self) -> (Vec<ActionResult>, Vec<PathBuf>) {
        (self.steps, self.captured)
    }

    pub fn record(&mut self, result: ActionResult) {
        self.steps.push(result);
    }

    pub fn element(&self, table: Table, name: &str) -> Result<&'a ElementDescriptor, FlowError> {
        let fixtures = self.fixtures;
        let table = match table {
            Table::Welcome => &fixtures.welcome,
            Table::Dashboard => &fixtures.dashboard,
        };
        Ok(table.get(name)?)
    }

    /// Poll options used by [`click`](Self::click) for `table`.
    pub fn default_options(&self, table: Table) -> PollOptions {
        match table {
            Table::Welcome => self.timing.options(self.timing.welcome),
            Table::Dashboard => self.timing.options(self.timing.dashboard),
        }
    }

    fn element_wait(&self) -> PollOptions {
        self.timing.element.options()
    }

    // ============================================================
    // Clicks
    // ============================================================

    /// Click the first match of `name` under the table's default options.
    pub async fn click(
        &mut self,
        table: Table,
        name: &str,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let options = self.default_options(table);
        self.click_with(table, name, options, policy).await
    }

    /// Click the first match of `name` under explicit options.
    pub async fn click_with(
        &mut self,
        table: Table,
        name: &str,
        options: PollOptions,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let element = self.element(table, name)?;
        self.click_selector(&element.name, &element.selector, 0, options, policy)
            .await
    }

    /// Click the descriptor's own ordinal. Onboarding elements get a single
    /// attempt; dashboard elements use the dashboard budget.
    pub async fn click_nth(
        &mut self,
        table: Table,
        name: &str,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let element = self.element(table, name)?;
        let options = match table {
            Table::Welcome => PollOptions::once(),
            Table::Dashboard => self.default_options(table),
        };
        self.click_selector(&element.name, &element.selector, element.nth, options, policy)
            .await
    }

    /// Click a literal selector, recorded under `label`.
    pub async fn click_selector(
        &mut self,
        label: &str,
        selector: &Selector,
        nth: usize,
        options: PollOptions,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let driver = self.driver;
        let wait = self.element_wait();
        info!("Click {}", label);
        let outcome = poll_while(
            &options,
            || click_when_present(driver, selector, nth, wait),
            DriverError::is_transient,
        )
        .await;
        self.settle(label, outcome, policy)
    }

    /// Click; on failure write `screenshot` before returning the error.
    pub async fn click_or_capture(
        &mut self,
        table: Table,
        name: &str,
        screenshot: &str,
    ) -> Result<ActionResult, FlowError> {
        match self.click(table, name, FailurePolicy::Required).await {
            Err(err @ FlowError::Action { .. }) => {
                self.screenshot(screenshot).await;
                Err(err)
            }
            other => other,
        }
    }

    // ============================================================
    // Waits
    // ============================================================

    /// Wait until the first match exists; nothing is clicked.
    pub async fn wait_for(
        &mut self,
        table: Table,
        name: &str,
        options: PollOptions,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let element = self.element(table, name)?;
        self.wait_for_selector(&element.name, &element.selector, 0, options, policy)
            .await
    }

    /// Wait until the descriptor's own ordinal exists.
    pub async fn wait_for_nth(
        &mut self,
        table: Table,
        name: &str,
        options: PollOptions,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let element = self.element(table, name)?;
        self.wait_for_selector(&element.name, &element.selector, element.nth, options, policy)
            .await
    }

    pub async fn wait_for_selector(
        &mut self,
        label: &str,
        selector: &Selector,
        nth: usize,
        options: PollOptions,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let driver = self.driver;
        info!("Wait for {}", label);
        let outcome = poll_while(
            &options,
            || check_present(driver, selector, nth),
            DriverError::is_transient,
        )
        .await;
        self.settle(label, outcome, policy)
    }

    // ============================================================
    // Input
    // ============================================================

    /// Click the field, then type `text` into it.
    pub async fn input_text(
        &mut self,
        table: Table,
        name: &str,
        text: &str,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let element = self.element(table, name)?;
        let driver = self.driver;
        let wait = self.element_wait();
        let options = self.timing.options(self.timing.input);
        info!("Input text into {}", element.name);
        let outcome = poll_while(
            &options,
            || type_into(driver, &element.selector, 0, text, wait),
            DriverError::is_transient,
        )
        .await;
        self.settle(&element.name, outcome, policy)
    }

    /// Type into whatever has focus and press Enter.
    pub async fn type_and_submit(&mut self, label: &str, text: &str) -> Result<(), FlowError> {
        self.driver.type_text(text).await?;
        self.driver.press_key("Enter").await?;
        self.record(ActionResult::succeeded(label, 1));
        Ok(())
    }

    /// Open the region drop menu and choose the configured region.
    pub async fn select_region(&mut self) -> Result<ActionResult, FlowError> {
        let menu = self.element(Table::Welcome, welcome::DROP_MENU)?;
        let region = self.element(Table::Welcome, welcome::SELECT_REGION_US)?;
        let driver = self.driver;
        let wait = self.element_wait();
        info!("Select region");
        let outcome = poll_while(
            &PollOptions::once(),
            || async move {
                focus_when_present(driver, &menu.selector, 0, wait).await?;
                click_when_present(driver, &region.selector, 0, wait).await
            },
            DriverError::is_transient,
        )
        .await;
        self.settle(&region.name, outcome, FailurePolicy::Required)
    }

    // ============================================================
    // Scrolling
    // ============================================================

    /// Hover the first match of `container`, then scroll it until the
    /// `target` ordinal can be revealed and clicked.
    pub async fn scroll_to_element(
        &mut self,
        container: (Table, &str),
        target: (Table, &str),
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let container = self.element(container.0, container.1)?;
        let target = self.element(target.0, target.1)?;
        let driver = self.driver;
        let wait = self.element_wait();
        info!("Scroll {} to {}", container.name, target.name);

        if let Err(e) = wait_present(driver, &container.selector, 0, &wait).await {
            return self.fail(&target.name, 1, PollError::Failed(e), policy);
        }
        match driver.hover(&container.selector, 0).await {
            Ok(()) => {}
            Err(DriverError::NotSupported(_)) => debug!("Driver cannot hover, scrolling in place"),
            Err(e) => return self.fail(&target.name, 1, PollError::Failed(e), policy),
        }

        let options: ScrollOptions = self.timing.scroll.into();
        let mut attempts = 0u32;
        let result = scroll_until_found(driver, &options, || {
            attempts += 1;
            reveal_and_click(driver, &target.selector, target.nth, wait)
        })
        .await;

        match result {
            Ok(()) => {
                let result = ActionResult::succeeded(&target.name, attempts);
                self.steps.push(result.clone());
                Ok(result)
            }
            Err(ScrollError::Action(e)) | Err(ScrollError::Scroll(e)) => {
                self.fail(&target.name, attempts, PollError::Failed(e), policy)
            }
        }
    }

    // ============================================================
    // Diagnostics
    // ============================================================

    /// Capture the screen as `name`. Failures are logged, never fatal.
    pub async fn screenshot(&mut self, name: &str) -> Option<PathBuf> {
        match self.screenshots.capture(self.driver, name).await {
            Ok(path) => {
                self.captured.push(path.clone());
                Some(path)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// If the exception popup is showing, capture it as `name`. Returns
    /// whether the popup was seen.
    pub async fn find_exception(&mut self, name: &str) -> Result<bool, FlowError> {
        let element = self.element(Table::Dashboard, dashboard::EXCEPTION_BTN)?;
        let selector = element.selector.clone().role(Role::Button);
        let driver = self.driver;
        let options = self.element_wait();
        let outcome = poll_while(
            &options,
            || check_present(driver, &selector, element.nth),
            DriverError::is_transient,
        )
        .await;
        if outcome.is_success() {
            warn!("Exception popup is showing");
            self.screenshot(name).await;
            Ok(true)
        } else {
            debug!("No exception popup");
            Ok(false)
        }
    }

    pub fn exception_recorded(&self, name: &str) -> bool {
        self.screenshots.exists(name)
    }

    /// Fail the scenario if the exception popup shows up. The verdict is the
    /// presence of the capture on disk; a leftover capture from an earlier
    /// run is removed first.
    pub async fn check_exception(&mut self, name: &str) -> Result<(), FlowError> {
        let path = self.screenshots.path_for(name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Could not remove stale {}: {}", path.display(), e);
            }
        }
        self.find_exception(name).await?;
        if self.exception_recorded(name) {
            return Err(FlowError::ExceptionRaised(path));
        }
        Ok(())
    }

    pub async fn sleep(&self, duration: Duration, reason: &str) {
        info!("Waiting {:?} for {}", duration, reason);
        tokio::time::sleep(duration).await;
    }

    // ============================================================
    // Outcome bookkeeping
    // ============================================================

    pub(crate) fn settle<T>(
        &mut self,
        name: &str,
        outcome: PollOutcome<T, DriverError>,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        match outcome.result {
            Ok(_) => {
                debug!(step = name, attempts = outcome.attempts, "step done");
                let result = ActionResult::succeeded(name, outcome.attempts);
                self.steps.push(result.clone());
                Ok(result)
            }
            Err(source) => self.fail(name, outcome.attempts, source, policy),
        }
    }

    pub(crate) fn fail(
        &mut self,
        name: &str,
        attempts: u32,
        source: PollError<DriverError>,
        policy: FailurePolicy,
    ) -> Result<ActionResult, FlowError> {
        let result = ActionResult::failed(name, attempts, source.to_string());
        self.steps.push(result.clone());
        match policy {
            FailurePolicy::Required => Err(FlowError::Action {
                name: name.to_string(),
                attempts,
                source,
            }),
            FailurePolicy::Tolerated => {
                warn!(step = name, attempts, "Can not finish the action: {}", source);
                Ok(result)
            }
        }
    }
}

async fn check_present<D>(driver: &D, selector: &Selector, nth: usize) -> Result<(), DriverError>
where
    D: UiDriver + ?Sized,
{
    if driver.exists(selector, nth).await? {
        Ok(())
    } else {
        Err(DriverError::not_found(format!("{} #{}", selector, nth)))
    }
}

/// Wait for the element within `wait`, collapsing the poll outcome into the
/// last driver error.
pub(crate) async fn wait_present<D>(
    driver: &D,
    selector: &Selector,
    nth: usize,
    wait: &PollOptions,
) -> Result<(), DriverError>
where
    D: UiDriver + ?Sized,
{
    poll_while(
        wait,
        || check_present(driver, selector, nth),
        DriverError::is_transient,
    )
    .await
    .into_result()
    .map_err(|e| match e {
        PollError::Failed(e) => e,
        PollError::AttemptTimedOut(limit) => DriverError::Timeout {
            operation: format!("waiting {:?} for {}", limit, selector),
        },
    })
}

async fn click_when_present<D>(
    driver: &D,
    selector: &Selector,
    nth: usize,
    wait: PollOptions,
) -> Result<(), DriverError>
where
    D: UiDriver + ?Sized,
{
    wait_present(driver, selector, nth, &wait).await?;
    driver.click(selector, nth).await
}

async fn focus_when_present<D>(
    driver: &D,
    selector: &Selector,
    nth: usize,
    wait: PollOptions,
) -> Result<(), DriverError>
where
    D: UiDriver + ?Sized,
{
    wait_present(driver, selector, nth, &wait).await?;
    driver.focus(selector, nth).await
}

async fn type_into<D>(
    driver: &D,
    selector: &Selector,
    nth: usize,
    text: &str,
    wait: PollOptions,
) -> Result<(), DriverError>
where
    D: UiDriver + ?Sized,
{
    click_when_present(driver, selector, nth, wait).await?;
    driver.type_text(text).await
}

async fn reveal_and_click<D>(
    driver: &D,
    selector: &Selector,
    nth: usize,
    wait: PollOptions,
) -> Result<(), DriverError>
where
    D: UiDriver + ?Sized,
{
    wait_present(driver, selector, nth, &wait).await?;
    driver.make_visible(selector, nth).await?;
    driver.click(selector, nth).await
}
