//! Scenarios that sign in with a fixture profile.

use super::ScriptEnv;
use crate::actions::{FailurePolicy, FlowError, Table, UiContext};
use crate::config::schema::PollConfig;
use crate::driver::UiDriver;
use crate::flows::{sign, welcome};
use crate::poll::PollOptions;
use hpsa_common::Profile;
use hpsa_common::names::welcome as wel;

const SIGNED_IN: PollConfig = PollConfig::new(10_000, 2 * 60_000);
const SIGN_WELCOME_EXCEPTION: &str = "hpsa06signwelcome_Exception.png";

fn profile<'a, D>(ctx: &UiContext<'a, D>, env: &ScriptEnv<'_>) -> Result<&'a Profile, FlowError>
where
    D: UiDriver + ?Sized,
{
    Ok(ctx.fixtures().profiles.get(&env.config.account.profile_id)?)
}

/// Create an account from the onboarding wizard, then finish onboarding.
pub(super) async fn sign_welcome<D>(
    ctx: &mut UiContext<'_, D>,
    env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    let profile = profile(ctx, env)?;
    welcome::pretest_to_signin(ctx).await?;
    ctx.click_or_capture(Table::Welcome, wel::CREATE_ACCOUNT, SIGN_WELCOME_EXCEPTION)
        .await?;
    let delays = ctx.timing().sign_in;
    sign::enter_credentials(ctx, profile, &delays).await?;
    let options = ctx.timing().options(SIGNED_IN);
    ctx.wait_for_nth(
        Table::Welcome,
        wel::WARRANTY_OPTION,
        options,
        FailurePolicy::Tolerated,
    )
    .await?;
    ctx.check_exception(SIGN_WELCOME_EXCEPTION).await
}

pub(super) async fn sign_in_main_page<D>(
    ctx: &mut UiContext<'_, D>,
    env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    let profile = profile(ctx, env)?;
    welcome::pretest(ctx).await?;
    let delays = ctx.timing().sign_in;
    sign::sign_in(ctx, profile, &delays).await?;
    let options = ctx.timing().options(SIGNED_IN);
    ctx.wait_for(Table::Welcome, wel::LOGGED_IN, options, FailurePolicy::Tolerated)
        .await?;
    Ok(())
}

/// Sign in, scroll the specifications to the network entry, sign out.
pub(super) async fn smoke_extension<D>(
    ctx: &mut UiContext<'_, D>,
    env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    let profile = profile(ctx, env)?;
    welcome::pretest(ctx).await?;
    ctx.screenshot("HPSA_smokeextension_dashboard.png").await;
    let delays = ctx.timing().sign_in;
    sign::sign_in(ctx, profile, &delays).await?;

    ctx.click_with(
        Table::Welcome,
        wel::SPECIFICATIONS,
        PollOptions::once(),
        FailurePolicy::Required,
    )
    .await?;
    ctx.scroll_to_element(
        (Table::Welcome, wel::SPECIFICATIONS_LIST),
        (Table::Welcome, wel::NETWORK),
        FailurePolicy::Tolerated,
    )
    .await?;
    let options = ctx.default_options(Table::Dashboard);
    ctx.click_with(
        Table::Welcome,
        wel::SPECIFICATIONS_CLOSE,
        options,
        FailurePolicy::Tolerated,
    )
    .await?;
    sign::sign_out(ctx).await
}
