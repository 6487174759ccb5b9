//! Dashboard tour steps. Each step clicks through one feature and captures
//! the screen after every click, named `<prefix>_<label>.png`.
//!
//! Clicks by first match are tolerated: the captures are what gets reviewed.
//! Clicks by fixture ordinal are required.

use super::shot_name;
use crate::actions::{FailurePolicy, FlowError, Table, UiContext};
use crate::driver::UiDriver;
use hpsa_common::names::{dashboard, welcome};

const TOLERATED: FailurePolicy = FailurePolicy::Tolerated;

/// A dashboard tile that opens a detail page with its own back button.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub open: &'static str,
    /// Open by the fixture's ordinal instead of the first match.
    pub by_ordinal: bool,
    pub back: &'static str,
    pub label: &'static str,
}

pub const RESOURCE_TILES: [Tile; 6] = [
    Tile {
        open: dashboard::CHECK_SYSTEM_MEMORY,
        by_ordinal: true,
        back: dashboard::CHECK_SYSTEM_MEMORY_BACK,
        label: "checkSystemMemory",
    },
    Tile {
        open: dashboard::BATTERY_CHECK,
        by_ordinal: false,
        back: dashboard::BATTERY_CHECK_BACK,
        label: "batteryCheck",
    },
    Tile {
        open: dashboard::COMPONENT_TEST,
        by_ordinal: true,
        back: dashboard::COMPONENT_TEST_BACK,
        label: "component",
    },
    Tile {
        open: dashboard::CHECK_STORAGE,
        by_ordinal: true,
        back: dashboard::CHECK_STORAGE_BACK,
        label: "checkStorage",
    },
    Tile {
        open: dashboard::CHECK_CPU,
        by_ordinal: false,
        back: dashboard::CHECK_CPU_BACK,
        label: "checkCPU",
    },
    Tile {
        open: dashboard::CHECK_CONNECTIVITY,
        by_ordinal: true,
        back: dashboard::CHECK_CONNECTIVITY_BACK,
        label: "checkConnectivity",
    },
];

const STAR_LABELS: [&str; 5] = [
    "feedbackOneStar",
    "feedbackTwoStar",
    "feedbackThreeStar",
    "feedbackFourStar",
    "feedbackFiveStar",
];

async fn click_and_capture<D>(
    ctx: &mut UiContext<'_, D>,
    name: &str,
    by_ordinal: bool,
    prefix: &str,
    label: &str,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    if by_ordinal {
        ctx.click_nth(Table::Dashboard, name, FailurePolicy::Required)
            .await?;
    } else {
        ctx.click(Table::Dashboard, name, TOLERATED).await?;
    }
    ctx.screenshot(&shot_name(prefix, label)).await;
    Ok(())
}

/// Open the tile, capture, go back, capture.
pub async fn visit_tile<D>(ctx: &mut UiContext<'_, D>, tile: &Tile, prefix: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(ctx, tile.open, tile.by_ordinal, prefix, tile.label).await?;
    let closed = format!("{}Close", tile.label);
    click_and_capture(ctx, tile.back, false, prefix, &closed).await
}

pub async fn resource_checks<D>(ctx: &mut UiContext<'_, D>, prefix: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    for tile in &RESOURCE_TILES {
        visit_tile(ctx, tile, prefix).await?;
    }
    Ok(())
}

/// Warranty card and its additional information. With `close` the card is
/// left through its back button.
pub async fn warranty_card<D>(ctx: &mut UiContext<'_, D>, prefix: &str, close: bool) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(ctx, dashboard::WARRANTY_CARD, false, prefix, "warrantyCard").await?;
    click_and_capture(
        ctx,
        dashboard::ADDITIONAL_INFORMATION,
        false,
        prefix,
        "additionalInformation",
    )
    .await?;
    if close {
        click_and_capture(ctx, dashboard::WARRANTY_BACK, false, prefix, "closeWarrantyCard")
            .await?;
    }
    Ok(())
}

/// The greyed-out warranty card shown when sharing was declined asks for
/// consent first.
pub async fn warranty_consent<D>(ctx: &mut UiContext<'_, D>, prefix: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(
        ctx,
        dashboard::WARRANTY_CARD_GET_DETAIL,
        true,
        prefix,
        "warrantyCardPopup",
    )
    .await?;
    click_and_capture(
        ctx,
        dashboard::WARRANTY_CARD_GET_DETAIL_YES,
        false,
        prefix,
        "warrantyCardPopupYES",
    )
    .await
}

pub async fn settings_about<D>(ctx: &mut UiContext<'_, D>, prefix: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(ctx, dashboard::SETTINGS, false, prefix, "settings").await?;
    click_and_capture(ctx, dashboard::ABOUT_HPSA, true, prefix, "about").await?;
    click_and_capture(ctx, dashboard::SETTINGS, false, prefix, "settingsClose").await
}

pub async fn support<D>(ctx: &mut UiContext<'_, D>, prefix: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(ctx, dashboard::SEE_ALL, false, prefix, "support").await
}

/// Open feedback, rate one to five stars, and type `text` when given.
pub async fn feedback_ratings<D>(
    ctx: &mut UiContext<'_, D>,
    prefix: &str,
    text: Option<&str>,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(ctx, dashboard::FEEDBACK, false, prefix, "feedback").await?;
    for (star, label) in dashboard::FEEDBACK_STARS.iter().zip(STAR_LABELS) {
        click_and_capture(ctx, star, true, prefix, label).await?;
    }
    if let Some(text) = text {
        ctx.input_text(
            Table::Dashboard,
            dashboard::FEEDBACK_TEXTBOX_UNSELECT,
            text,
            TOLERATED,
        )
        .await?;
        ctx.screenshot(&shot_name(prefix, "feedbackInput")).await;
    }
    Ok(())
}

pub async fn feedback_cancel<D>(ctx: &mut UiContext<'_, D>, prefix: &str) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    click_and_capture(ctx, dashboard::FEEDBACK_CANCEL, true, prefix, "feedbackClose").await
}

/// Open the specifications panel and scroll its list to the network entry.
pub async fn specifications_to_network<D>(
    ctx: &mut UiContext<'_, D>,
    prefix: &str,
) -> Result<(), FlowError>
where
    D: UiDriver + ?Sized,
{
    let options = ctx.default_options(Table::Dashboard);
    ctx.click_with(Table::Welcome, welcome::SPECIFICATIONS, options, TOLERATED)
        .await?;
    ctx.screenshot(&shot_name(prefix, "specifications")).await;
    ctx.scroll_to_element(
        (Table::Welcome, welcome::SPECIFICATIONS_LIST),
        (Table::Welcome, welcome::NETWORK),
        TOLERATED,
    )
    .await?;
    ctx.screenshot(&shot_name(prefix, "scrollToNetWork")).await;
    Ok(())
}
