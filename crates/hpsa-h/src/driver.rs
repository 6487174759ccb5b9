use crate::cdp::CdpClient;
use crate::locator::{LocateOp, Located, evaluate, locate, viewport_center};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, InsertTextParams,
};
use chromiumoxide::layout::Point;
use hpsa_common::Selector;
use hpsa_engine::config::schema::BrowserConfig;
use hpsa_engine::driver::{DriverError, NavigationResult, UiDriver};
use std::sync::Mutex;
use tracing::info;

/// Pixels moved by one wheel notch.
const WHEEL_STEP: f64 = 120.0;

/// Drives the app inside a CDP-controlled Chromium.
pub struct HeadlessDriver {
    config: BrowserConfig,
    client: Option<CdpClient>,
    /// Last hover position; wheel steps are delivered there.
    pointer: Mutex<Option<Point>>,
}

impl HeadlessDriver {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            client: None,
            pointer: Mutex::new(None),
        }
    }

    pub fn get_client(&self) -> Option<&CdpClient> {
        self.client.as_ref()
    }

    fn page(&self) -> Result<&Page, DriverError> {
        self.client
            .as_ref()
            .map(|client| &client.page)
            .ok_or(DriverError::NotReady)
    }

    async fn get_navigation_result(page: &Page) -> Result<NavigationResult, DriverError> {
        let title = page
            .get_title()
            .await
            .unwrap_or_default()
            .unwrap_or_default();
        let url = page
            .url()
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))?
            .unwrap_or_default();
        Ok(NavigationResult { url, title })
    }

    /// Locate the `nth` match and fail with `ElementNotFound` when absent.
    async fn require(
        &self,
        op: LocateOp,
        selector: &Selector,
        nth: usize,
    ) -> Result<Located, DriverError> {
        let located = locate(self.page()?, op, selector, nth).await?;
        if located.found {
            Ok(located)
        } else {
            Err(DriverError::not_found(describe(selector, nth)))
        }
    }

    async fn point_of(&self, selector: &Selector, nth: usize) -> Result<Point, DriverError> {
        let located = self.require(LocateOp::Point, selector, nth).await?;
        match (located.x, located.y) {
            (Some(x), Some(y)) => Ok(Point { x, y }),
            _ => Err(DriverError::ElementNotInteractable {
                selector: describe(selector, nth),
                reason: "no layout box".to_string(),
            }),
        }
    }

    fn last_pointer(&self) -> Option<Point> {
        match self.pointer.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn remember_pointer(&self, point: Point) {
        match self.pointer.lock() {
            Ok(mut guard) => *guard = Some(point),
            Err(poisoned) => *poisoned.into_inner() = Some(point),
        }
    }

    async fn dispatch_key(
        page: &Page,
        kind: DispatchKeyEventType,
        key: &str,
    ) -> Result<(), DriverError> {
        let key_down = matches!(kind, DispatchKeyEventType::KeyDown);
        let mut builder = DispatchKeyEventParams::builder().r#type(kind).key(key);
        if let Some((code, text, vk)) = key_details(key) {
            builder = builder.code(code).windows_virtual_key_code(vk);
            if let (true, Some(text)) = (key_down, text) {
                builder = builder.text(text);
            }
        }
        let event = builder
            .build()
            .map_err(|e| DriverError::Input(format!("Failed to build key event: {:?}", e)))?;
        page.execute(event)
            .await
            .map_err(|e| DriverError::Input(format!("press_key failed: {}", e)))?;
        Ok(())
    }
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

fn describe(selector: &Selector, nth: usize) -> String {
    if nth == 0 {
        selector.to_string()
    } else {
        format!("{} #{}", selector, nth)
    }
}

/// DOM code, inserted text and Windows virtual key code for the named keys
/// scenario scripts press.
fn key_details(key: &str) -> Option<(&'static str, Option<&'static str>, i64)> {
    match key {
        "Enter" => Some(("Enter", Some("\r"), 13)),
        "Tab" => Some(("Tab", None, 9)),
        "Escape" => Some(("Escape", None, 27)),
        "Backspace" => Some(("Backspace", None, 8)),
        "ArrowDown" => Some(("ArrowDown", None, 40)),
        "ArrowUp" => Some(("ArrowUp", None, 38)),
        "PageDown" => Some(("PageDown", None, 34)),
        _ => None,
    }
}

#[async_trait]
impl UiDriver for HeadlessDriver {
    async fn launch(&mut self) -> Result<(), DriverError> {
        info!("Launching Headless Driver (Chromium)...");
        let client = CdpClient::launch(&self.config)
            .await
            .map_err(|e| DriverError::Other(e.to_string()))?;
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        if let Some(client) = self.client.take() {
            client
                .close()
                .await
                .map_err(|e| DriverError::Other(e.to_string()))?;
        }
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    async fn navigate(&self, url: &str) -> Result<NavigationResult, DriverError> {
        let page = self.page()?;

        info!("Navigating to: {}", url);
        page.goto(url)
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))?;

        Self::get_navigation_result(page).await
    }

    async fn reload(&self) -> Result<NavigationResult, DriverError> {
        let page = self.page()?;
        page.reload()
            .await
            .map_err(|e| DriverError::Navigation(format!("reload failed: {}", e)))?;
        Self::get_navigation_result(page).await
    }

    async fn exists(&self, selector: &Selector, nth: usize) -> Result<bool, DriverError> {
        let located = locate(self.page()?, LocateOp::Exists, selector, nth).await?;
        Ok(located.found)
    }

    async fn click(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        let point = self.point_of(selector, nth).await?;
        self.page()?
            .click(point)
            .await
            .map_err(|e| DriverError::ElementNotInteractable {
                selector: describe(selector, nth),
                reason: e.to_string(),
            })?;
        self.remember_pointer(point);
        Ok(())
    }

    async fn focus(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        self.require(LocateOp::Focus, selector, nth).await?;
        Ok(())
    }

    async fn make_visible(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        self.require(LocateOp::Reveal, selector, nth).await?;
        Ok(())
    }

    async fn hover(&self, selector: &Selector, nth: usize) -> Result<(), DriverError> {
        let point = self.point_of(selector, nth).await?;
        self.page()?
            .move_mouse(point)
            .await
            .map_err(|e| DriverError::Input(format!("hover failed: {}", e)))?;
        self.remember_pointer(point);
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        self.page()?
            .execute(InsertTextParams::new(text))
            .await
            .map_err(|e| DriverError::Input(format!("type_text failed: {}", e)))?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), DriverError> {
        let page = self.page()?;
        Self::dispatch_key(page, DispatchKeyEventType::KeyDown, key).await?;
        Self::dispatch_key(page, DispatchKeyEventType::KeyUp, key).await
    }

    async fn scroll_down(&self) -> Result<(), DriverError> {
        let page = self.page()?;
        let point = match self.last_pointer() {
            Some(point) => point,
            None => {
                let (x, y) = viewport_center(page).await?;
                Point { x, y }
            }
        };

        let wheel = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseWheel)
            .x(point.x)
            .y(point.y)
            .delta_x(0.0)
            .delta_y(WHEEL_STEP)
            .build()
            .map_err(|e| DriverError::Input(format!("Failed to build wheel event: {:?}", e)))?;
        page.execute(wheel)
            .await
            .map_err(|e| DriverError::Input(format!("scroll failed: {}", e)))?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        let bytes = self
            .page()?
            .screenshot(chromiumoxide::page::ScreenshotParams::builder().build())
            .await
            .map_err(|e| DriverError::Screenshot(e.to_string()))?;

        Ok(bytes)
    }

    async fn set_local_storage(&self, key: &str, value: &str) -> Result<(), DriverError> {
        let script = format!(
            "(localStorage.setItem({}, {}), true)",
            serde_json::to_string(key)?,
            serde_json::to_string(value)?
        );
        evaluate(self.page()?, &script).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_before_launch_are_not_ready() {
        let driver = HeadlessDriver::default();
        assert!(!driver.is_ready().await);

        let err = driver.click(&Selector::class("Any"), 0).await.unwrap_err();
        assert!(matches!(err, DriverError::NotReady));
        let err = driver.scroll_down().await.unwrap_err();
        assert!(matches!(err, DriverError::NotReady));
    }

    #[tokio::test]
    async fn test_close_without_launch_is_noop() {
        let mut driver = HeadlessDriver::default();
        driver.close().await.unwrap();
    }

    #[test]
    fn test_enter_inserts_carriage_return() {
        assert_eq!(key_details("Enter"), Some(("Enter", Some("\r"), 13)));
        assert_eq!(key_details("F13"), None);
    }

    #[test]
    fn test_describe_includes_ordinal() {
        let selector = Selector::class("OptionCard");
        assert_eq!(describe(&selector, 0), "class=\"OptionCard\"");
        assert_eq!(describe(&selector, 2), "class=\"OptionCard\" #2");
    }
}
