use crate::actions::{FailurePolicy, FlowError, Table, UiContext, wait_present};
use crate::config::schema::InstallConfig;
use crate::driver::{DriverError, UiDriver};
use crate::poll::{PollError, PollOptions, PollOutcome, poll_while};
use hpsa_common::names::welcome;
use hpsa_common::{ActionResult, Role, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// How long one attempt waits for the install icon before reloading.
const ICON_WAIT: Duration = Duration::from_secs(30);
const ICON_INTERVAL: Duration = Duration::from_secs(2);

/// Budget for the installed app to open on its first page.
pub const APP_REGISTERED: PollOptions = PollOptions {
    interval: Duration::from_secs(1),
    timeout: Duration::from_secs(60),
    attempt_timeout: None,
};

#[derive(Debug, Error)]
enum IconAttempt {
    #[error("install icon not shown: {0}")]
    NotShown(DriverError),
    #[error("failed to reload page: {0}")]
    Reload(DriverError),
}

pub fn install_icon(config: &InstallConfig) -> Selector {
    Selector::class(&config.icon_class).role(Role::Button)
}

pub fn install_button(config: &InstallConfig) -> Selector {
    Selector::with_role(Role::Button).name(&config.button_name)
}

/// Open the app and install it from the browser's install icon.
///
/// The icon does not always appear on first load, so every miss reloads the
/// page. A failed reload ends the search at once.
pub async fn install_app<D>(
    ctx: &mut UiContext<'_, D>,
    url: &str,
    config: &InstallConfig,
) -> Result<ActionResult, FlowError>
where
    D: UiDriver + ?Sized,
{
    let driver = ctx.driver();
    info!("Opening {}", url);
    driver.navigate(url).await?;

    if !config.enabled {
        info!("App install disabled, using the page as loaded");
        let result = ActionResult::succeeded("install", 0).with_status("skipped");
        ctx.record(result.clone());
        return Ok(result);
    }

    let icon = install_icon(config);
    let button = install_button(config);
    let wait = PollOptions::new(ICON_INTERVAL, ICON_WAIT);
    let options = ctx.timing().options(ctx.timing().install);

    let outcome = poll_while(
        &options,
        || find_icon_or_reload(driver, &icon, &wait),
        |e| matches!(e, IconAttempt::NotShown(_)),
    )
    .await;

    let result = outcome.result.map_err(|e| match e {
        PollError::Failed(IconAttempt::NotShown(e)) | PollError::Failed(IconAttempt::Reload(e)) => {
            PollError::Failed(e)
        }
        PollError::AttemptTimedOut(limit) => PollError::AttemptTimedOut(limit),
    });
    ctx.settle(
        "install icon",
        PollOutcome {
            attempts: outcome.attempts,
            elapsed: outcome.elapsed,
            result,
        },
        FailurePolicy::Required,
    )?;

    let once = PollOptions::once();
    ctx.click_selector("install icon", &icon, 0, once, FailurePolicy::Required)
        .await?;
    ctx.click_selector(&config.button_name, &button, 0, once, FailurePolicy::Required)
        .await?;

    info!("Waiting for the installed app to open");
    ctx.wait_for(
        Table::Welcome,
        welcome::LETS_START,
        APP_REGISTERED,
        FailurePolicy::Required,
    )
    .await
}

async fn find_icon_or_reload<D>(
    driver: &D,
    icon: &Selector,
    wait: &PollOptions,
) -> Result<(), IconAttempt>
where
    D: UiDriver + ?Sized,
{
    match wait_present(driver, icon, 0, wait).await {
        Ok(()) => Ok(()),
        Err(e) => {
            info!("Install icon is not shown yet, reloading the page");
            driver.reload().await.map_err(IconAttempt::Reload)?;
            Err(IconAttempt::NotShown(e))
        }
    }
}
