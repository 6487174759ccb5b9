//! Device identity and hardware check scenarios.

use super::ScriptEnv;
use crate::actions::{FailurePolicy, FlowError, Table, UiContext};
use crate::config::schema::PollConfig;
use crate::device::{MODEL_NAME, SERIAL_NUMBER, SKU_NUMBER, sku_display};
use crate::driver::UiDriver;
use crate::flows::welcome;
use hpsa_common::names::dashboard as dash;
use hpsa_common::{Role, Selector};
use std::time::Duration;
use tracing::info;

const RUN_BUTTON_BACK: PollConfig = PollConfig::new(1000, 60_000);
const RUN_BUTTON_DISABLED: PollConfig = PollConfig::new(1000, 60_000);
const CPU_CHECK_DONE: PollConfig = PollConfig::new(1000, 5 * 60_000);
const CPU_PASS_IMAGE: PollConfig = PollConfig::new(10_000, 5 * 60_000);
const CPU_RERUN: PollConfig = PollConfig::new(10_000, 3 * 60_000);
const CPU_RESULT_DELAY: Duration = Duration::from_secs(120);

/// Accessible name of the run button once a CPU check may start again.
const RUN_CPU_CHECK: &str = "Run CPU check";

/// VPD field and the dashboard label showing it.
const IDENTITY_FIELDS: [(&str, &str); 3] = [
    (MODEL_NAME, dash::DEVICE_NAME),
    (SERIAL_NUMBER, dash::SERIAL_NUMBER),
    (SKU_NUMBER, dash::PRODUCT_NUMBER),
];

pub(super) async fn check_sn_pn<D>(
    ctx: &mut UiContext<'_, D>,
    env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    welcome::pretest(ctx).await?;
    let options = ctx.timing().options(ctx.timing().element);
    for (field, label) in IDENTITY_FIELDS {
        let mut value = env.device.read_vpd(field).await?;
        if field == SKU_NUMBER {
            value = sku_display(&value);
        }
        info!("{} is {:?}", field, value);
        let selector = Selector::with_role(Role::StaticText).name_containing(value);
        ctx.wait_for_selector(label, &selector, 0, options, FailurePolicy::Required)
            .await?;
    }
    Ok(())
}

pub(super) async fn battery_test<D>(
    ctx: &mut UiContext<'_, D>,
    _env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    welcome::pretest(ctx).await?;
    ctx.click(Table::Dashboard, dash::BATTERY_CHECK, FailurePolicy::Tolerated)
        .await?;
    ctx.screenshot("HPSA_hpsa04batterytest_batteryCheck.png").await;
    ctx.click(Table::Dashboard, dash::RUN_BATTERY_CHECK, FailurePolicy::Tolerated)
        .await?;
    let options = ctx.timing().options(RUN_BUTTON_BACK);
    ctx.wait_for(
        Table::Dashboard,
        dash::RUN_BATTERY_CHECK,
        options,
        FailurePolicy::Tolerated,
    )
    .await?;
    ctx.check_exception("hpsa04batterytest_Exception.png").await
}

async fn open_cpu_check<D>(ctx: &mut UiContext<'_, D>, shot: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    welcome::pretest(ctx).await?;
    ctx.click(Table::Dashboard, dash::CHECK_CPU, FailurePolicy::Tolerated)
        .await?;
    ctx.screenshot(shot).await;
    ctx.click(Table::Dashboard, dash::RUN_BATTERY_CHECK, FailurePolicy::Tolerated)
        .await?;
    Ok(())
}

pub(super) async fn cpu_check<D>(
    ctx: &mut UiContext<'_, D>,
    _env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    open_cpu_check(ctx, "HPSA_hpsa05cpucheck_checkCPU.png").await?;
    let timing = ctx.timing();

    // The run button greys out while the check is running.
    ctx.wait_for(
        Table::Dashboard,
        dash::RUN_BATTERY_CHECK_DISABLED,
        timing.options(RUN_BUTTON_DISABLED),
        FailurePolicy::Required,
    )
    .await?;
    ctx.wait_for(
        Table::Dashboard,
        dash::RUN_BATTERY_CHECK,
        timing.options(CPU_CHECK_DONE),
        FailurePolicy::Tolerated,
    )
    .await?;
    ctx.sleep(CPU_RESULT_DELAY, "the CPU check result").await;
    ctx.wait_for(
        Table::Dashboard,
        dash::CPU_CHECK_PASS_IMAGE,
        timing.options(CPU_PASS_IMAGE),
        FailurePolicy::Tolerated,
    )
    .await?;
    ctx.check_exception("hpsa05cpucheck_Exception.png").await
}

/// Start the CPU check, then start it again as soon as the run button is
/// offered once more.
pub(super) async fn stress_cpu<D>(
    ctx: &mut UiContext<'_, D>,
    _env: &ScriptEnv<'_>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    open_cpu_check(ctx, "HPSA_hpsa09stresscpu_checkCPU.png").await?;
    let run = ctx.element(Table::Dashboard, dash::RUN_BATTERY_CHECK)?;
    let selector = run.selector.clone().name(RUN_CPU_CHECK);
    let options = ctx.timing().options(CPU_RERUN);
    ctx.click_selector(RUN_CPU_CHECK, &selector, 0, options, FailurePolicy::Required)
        .await?;
    Ok(())
}
