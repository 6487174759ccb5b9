use crate::actions::{FailurePolicy, FlowError, Table, UiContext};
use crate::config::schema::SignInDelays;
use crate::driver::UiDriver;
use crate::poll::PollOptions;
use hpsa_common::Profile;
use hpsa_common::names::welcome;
use std::time::Duration;

/// Type the account credentials into the hosted sign-in page, which is
/// already opening. The page has no stable selectors, so input goes to
/// whatever holds focus after fixed pauses.
pub async fn enter_credentials<D>(
    ctx: &mut UiContext<'_, D>,
    profile: &Profile,
    delays: &SignInDelays,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    ctx.sleep(Duration::from_millis(delays.page_load_ms), "the sign-in page")
        .await;
    ctx.type_and_submit(welcome::USERNAME, &profile.username)
        .await?;
    ctx.sleep(
        Duration::from_millis(delays.password_page_ms),
        "the password page",
    )
    .await;
    ctx.type_and_submit("Password", &profile.password).await?;
    ctx.sleep(Duration::from_millis(delays.completion_ms), "sign-in to finish")
        .await;
    Ok(())
}

pub async fn sign_in<D>(
    ctx: &mut UiContext<'_, D>,
    profile: &Profile,
    delays: &SignInDelays,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    let options = PollOptions::once();
    ctx.click_with(
        Table::Welcome,
        welcome::CREATE_ACCOUNT_OR_SIGN_IN,
        options,
        FailurePolicy::Required,
    )
    .await?;
    enter_credentials(ctx, profile, delays).await
}

pub async fn sign_out<D>(ctx: &mut UiContext<'_, D>) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    let options = PollOptions::once();
    ctx.click_with(Table::Welcome, welcome::PROFILE, options, FailurePolicy::Required)
        .await?;
    let sign_out = ctx.element(Table::Welcome, welcome::SIGN_OUT)?;
    ctx.click_selector(
        &sign_out.name,
        &sign_out.selector,
        sign_out.nth,
        options,
        FailurePolicy::Required,
    )
    .await?;
    ctx.click_with(
        Table::Welcome,
        welcome::SIGN_OUT_CONFIRM,
        options,
        FailurePolicy::Required,
    )
    .await?;
    Ok(())
}
