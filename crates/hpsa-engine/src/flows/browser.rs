use crate::actions::{FailurePolicy, FlowError, UiContext};
use crate::driver::UiDriver;
use crate::poll::PollOptions;
use hpsa_common::{ActionResult, Role, Selector};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Seed the app's `localStorage` before it first loads.
pub async fn prepare_local_storage<D>(
    ctx: &mut UiContext<'_, D>,
    url: &str,
    entries: &BTreeMap<String, String>,
) -> Result<ActionResult, FlowError>
where
    D: UiDriver + ?Sized,
{
    let driver = ctx.driver();
    info!("Seeding {} localStorage entries on {}", entries.len(), url);
    driver.navigate(url).await?;
    for (key, value) in entries {
        debug!("localStorage {} = {}", key, value);
        driver.set_local_storage(key, value).await?;
    }
    let result = ActionResult::succeeded("local storage", 1);
    ctx.record(result.clone());
    Ok(result)
}

pub fn close_button(caption_class: &str) -> Selector {
    Selector::class(caption_class).role(Role::Button).name("Close")
}

/// Close the browser window left over from setup by its caption button.
///
/// Drivers that only see page content cannot reach window captions, so a
/// miss is logged and the run continues.
pub async fn close_last_browser<D>(
    ctx: &mut UiContext<'_, D>,
    caption_class: &str,
) -> Result<ActionResult, FlowError>
where
    D: UiDriver + ?Sized,
{
    let selector = close_button(caption_class);
    ctx.click_selector(
        "close browser",
        &selector,
        0,
        PollOptions::once(),
        FailurePolicy::Tolerated,
    )
    .await
}
