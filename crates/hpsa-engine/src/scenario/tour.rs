//! Guest walkthroughs of the dashboard and the onboarding wizard.

use super::ScriptEnv;
use crate::actions::{FailurePolicy, FlowError, Table, UiContext};
use crate::driver::UiDriver;
use crate::flows::{dashboard, shot_name, welcome};
use hpsa_common::names::dashboard as dash;
use hpsa_common::names::welcome as wel;
use std::time::Duration;

const WALKTHROUGH: &str = "HPSA_hpsa01walkthrough";
const NO_OPTION: &str = "HPSA_hpsa08screenshotnooption";
const NO_OPTION_VA: &str = "HPSA_hpsa08screenshotnooptionva";
const NO_OPTION_WELCOME: &str = "HPSA_hpsa08screenshotnooptionwelcome";

/// Pages opened in a new window take a while to render.
const EXTERNAL_PAGE_DELAY: Duration = Duration::from_secs(60);

pub(super) async fn walkthrough<D>(
    ctx: &mut UiContext<'_, D>,
    env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    welcome::pretest(ctx).await?;
    dashboard::warranty_card(ctx, WALKTHROUGH, true).await?;
    dashboard::resource_checks(ctx, WALKTHROUGH).await?;
    dashboard::settings_about(ctx, WALKTHROUGH).await?;
    dashboard::support(ctx, WALKTHROUGH).await?;
    dashboard::feedback_ratings(ctx, WALKTHROUGH, env.config.app.feedback_text.as_deref())
        .await?;
    dashboard::feedback_cancel(ctx, WALKTHROUGH).await?;
    dashboard::specifications_to_network(ctx, WALKTHROUGH).await
}

pub(super) async fn screenshot_no_option<D>(
    ctx: &mut UiContext<'_, D>,
    env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    welcome::pretest_no_option(ctx).await?;
    dashboard::warranty_consent(ctx, NO_OPTION).await?;
    dashboard::warranty_card(ctx, NO_OPTION, false).await?;
    dashboard::resource_checks(ctx, NO_OPTION).await?;
    dashboard::settings_about(ctx, NO_OPTION).await?;
    dashboard::support(ctx, NO_OPTION).await?;
    dashboard::specifications_to_network(ctx, NO_OPTION).await?;
    dashboard::feedback_ratings(ctx, NO_OPTION, env.config.app.feedback_text.as_deref())
        .await?;

    ctx.click(Table::Dashboard, dash::FEEDBACK_LINK, FailurePolicy::Tolerated)
        .await?;
    ctx.sleep(EXTERNAL_PAGE_DELAY, "the feedback page").await;
    ctx.screenshot(&shot_name(NO_OPTION, "feedbackLink")).await;
    Ok(())
}

pub(super) async fn screenshot_no_option_va<D>(
    ctx: &mut UiContext<'_, D>,
    _env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    welcome::pretest_no_option(ctx).await?;
    ctx.click(Table::Dashboard, dash::VIRTUAL_AGENT, FailurePolicy::Tolerated)
        .await?;
    ctx.sleep(EXTERNAL_PAGE_DELAY, "the virtual agent").await;
    ctx.screenshot(&shot_name(NO_OPTION_VA, "vapopup")).await;

    for (name, label) in [
        (dash::VIRTUAL_AGENT_DOWN, "vadown"),
        (dash::VIRTUAL_AGENT_UP, "vaup"),
        (dash::VIRTUAL_AGENT_CLOSE, "vaclose"),
    ] {
        ctx.click(Table::Dashboard, name, FailurePolicy::Tolerated)
            .await?;
        ctx.screenshot(&shot_name(NO_OPTION_VA, label)).await;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum WizardStep {
    Capture(&'static str),
    Click(&'static str),
    Region,
}

/// Every onboarding page is captured before it is left.
const WIZARD: [WizardStep; 25] = [
    WizardStep::Capture("LetsStart"),
    WizardStep::Click(wel::LETS_START),
    WizardStep::Capture("LaunchHPSA"),
    WizardStep::Capture("Welcome"),
    WizardStep::Click(wel::LAUNCH_SUPPORT_ASSISTANT),
    WizardStep::Capture("SelectRegion"),
    WizardStep::Click(wel::SELECT_REGION),
    WizardStep::Capture("RegionDrop"),
    WizardStep::Region,
    WizardStep::Capture("SelectUS"),
    WizardStep::Click(wel::CONTINUE),
    WizardStep::Capture("Continue"),
    WizardStep::Click(wel::DONT_SHOW_AGAIN),
    WizardStep::Capture("DonotShowagain"),
    WizardStep::Click(wel::CONTINUE_AS_GUEST),
    WizardStep::Capture("ContinueAsGuest"),
    WizardStep::Click(wel::DETAILS),
    WizardStep::Capture("Detail"),
    WizardStep::Click(wel::DETAILS),
    WizardStep::Click(wel::DETAILS),
    WizardStep::Capture("LetShareLater"),
    WizardStep::Click(wel::LETS_SHARE_LATER),
    WizardStep::Capture("Pinpopup"),
    WizardStep::Click(wel::CLOSE_PIN_POPUP),
    WizardStep::Capture("Dashboard"),
];

pub(super) async fn screenshot_no_option_welcome<D>(
    ctx: &mut UiContext<'_, D>,
    _env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    for step in WIZARD {
        match step {
            WizardStep::Capture(label) => {
                ctx.screenshot(&shot_name(NO_OPTION_WELCOME, label)).await;
            }
            WizardStep::Click(name) => {
                ctx.click(Table::Welcome, name, FailurePolicy::Tolerated)
                    .await?;
            }
            WizardStep::Region => {
                ctx.select_region().await?;
            }
        }
    }
    Ok(())
}
