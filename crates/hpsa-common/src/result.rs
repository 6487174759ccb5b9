use serde::Serialize;

/// Outcome of one UI step, as recorded in a scenario report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    /// Symbolic name of the element or step attempted.
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub attempts: u32,
}

impl ActionResult {
    pub fn succeeded(name: impl Into<String>, attempts: u32) -> Self {
        Self {
            name: name.into(),
            success: true,
            status: None,
            attempts,
        }
    }

    pub fn failed(name: impl Into<String>, attempts: u32, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            status: Some(status.into()),
            attempts,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}
