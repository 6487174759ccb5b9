use async_trait::async_trait;
pub use hpsa_common::error::DriverError;
use hpsa_common::selector::Selector;

#[derive(Debug, Clone, Default)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
}

/// The UiDriver trait is the seam between scenario scripts and whatever
/// actually renders the app (a CDP-controlled Chromium in production, a
/// recording mock in tests).
///
/// Elements are addressed by a [`Selector`] plus a zero-based ordinal among
/// its matches. Every interaction fails with `DriverError::ElementNotFound`
/// when the element is absent at the moment of the call; retrying is the
/// caller's business.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Launch the driver (start browser, load extension, etc.)
    async fn launch(&mut self) -> Result<(), DriverError>;

    /// Close the driver and cleanup resources.
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Check if the driver is ready to accept commands.
    async fn is_ready(&self) -> bool;

    /// Navigate to a specific URL.
    async fn navigate(&self, url: &str) -> Result<NavigationResult, DriverError>;

    /// Reload the current page.
    async fn reload(&self) -> Result<NavigationResult, DriverError> {
        Err(DriverError::NotSupported("reload".into()))
    }

    /// Whether the `nth` match of `selector` is currently present.
    async fn exists(&self, selector: &Selector, nth: usize) -> Result<bool, DriverError>;

    /// Left click the centre of the `nth` match.
    async fn click(&self, selector: &Selector, nth: usize) -> Result<(), DriverError>;

    /// Give keyboard focus to the `nth` match.
    async fn focus(&self, selector: &Selector, nth: usize) -> Result<(), DriverError>;

    /// Scroll the `nth` match into the viewport.
    async fn make_visible(&self, _selector: &Selector, _nth: usize) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("make_visible".into()))
    }

    /// Move the pointer over the `nth` match. Subsequent scroll steps are
    /// delivered at that position.
    async fn hover(&self, _selector: &Selector, _nth: usize) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("hover".into()))
    }

    /// Type text into whatever currently has focus.
    async fn type_text(&self, text: &str) -> Result<(), DriverError>;

    /// Press and release a named key ("Enter", "Tab", ...).
    async fn press_key(&self, key: &str) -> Result<(), DriverError>;

    /// One discrete mouse-wheel step down.
    async fn scroll_down(&self) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("scroll_down".into()))
    }

    /// Capture the screen as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;

    /// Write a `localStorage` entry for the current origin.
    async fn set_local_storage(&self, _key: &str, _value: &str) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("set_local_storage".into()))
    }
}
