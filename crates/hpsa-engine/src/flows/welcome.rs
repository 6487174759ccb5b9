//! Onboarding wizard shown on the first launch of the app.
//!
//! Plain clicks are tolerated since the wizard skips pages depending on
//! device state. Ordinal clicks and the region choice are required.

use crate::actions::{FailurePolicy, FlowError, Table, UiContext};
use crate::driver::UiDriver;
use hpsa_common::names::welcome;

/// Pages up to and including the region choice.
pub const INTRO: [&str; 3] = [
    welcome::LETS_START,
    welcome::LAUNCH_SUPPORT_ASSISTANT,
    welcome::SELECT_REGION,
];

/// Clicks on the data sharing popup that decline every option.
pub const DECLINE_SHARING: [&str; 4] = [
    welcome::DETAILS,
    welcome::DETAILS,
    welcome::DETAILS,
    welcome::LETS_SHARE_LATER,
];

async fn click_all<D>(ctx: &mut UiContext<'_, D>, names: &[&str]) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    for name in names {
        ctx.click(Table::Welcome, name, FailurePolicy::Tolerated)
            .await?;
    }
    Ok(())
}

/// From the first page to the sign-in choice.
pub async fn pretest_to_signin<D>(ctx: &mut UiContext<'_, D>) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_all(ctx, &INTRO).await?;
    ctx.select_region().await?;
    click_all(ctx, &[welcome::CONTINUE]).await
}

/// From the data sharing choice to the dashboard.
pub async fn pretest_after_signin<D>(ctx: &mut UiContext<'_, D>) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    ctx.click_nth(Table::Welcome, welcome::WARRANTY_OPTION, FailurePolicy::Required)
        .await?;
    ctx.click_nth(Table::Welcome, welcome::USAGE_DATA, FailurePolicy::Required)
        .await?;
    click_all(
        ctx,
        &[welcome::IMPROVE_MY_EXPERIENCE, welcome::CLOSE_PIN_POPUP],
    )
    .await
}

/// Full onboarding as a guest, accepting the sharing options.
pub async fn pretest<D>(ctx: &mut UiContext<'_, D>) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    pretest_to_signin(ctx).await?;
    click_all(ctx, &[welcome::DONT_SHOW_AGAIN, welcome::CONTINUE_AS_GUEST]).await?;
    pretest_after_signin(ctx).await
}

/// Full onboarding as a guest, declining every sharing option.
pub async fn pretest_no_option<D>(ctx: &mut UiContext<'_, D>) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    pretest_to_signin(ctx).await?;
    click_all(ctx, &[welcome::DONT_SHOW_AGAIN, welcome::CONTINUE_AS_GUEST]).await?;
    click_all(ctx, &DECLINE_SHARING).await?;
    click_all(ctx, &[welcome::CLOSE_PIN_POPUP]).await
}
