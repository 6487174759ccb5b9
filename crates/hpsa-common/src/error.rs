use std::path::PathBuf;

/// Errors reported by a UI driver while locating or acting on elements.
#[derive(thiserror::Error, Debug, Clone)]
pub enum DriverError {
    // ============================================================
    // Navigation Errors
    // ============================================================
    #[error("Navigation failed: {0}")]
    Navigation(String),

    // ============================================================
    // Element Errors
    // ============================================================
    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Element {selector} is not interactable: {reason}")]
    ElementNotInteractable { selector: String, reason: String },

    // ============================================================
    // Execution Errors
    // ============================================================
    #[error("Script execution error: {0}")]
    Script(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Timeout: {operation}")]
    Timeout { operation: String },

    // ============================================================
    // System Errors
    // ============================================================
    #[error("Not ready")]
    NotReady,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Other: {0}")]
    Other(String),
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::Serialization(err.to_string())
    }
}

impl DriverError {
    pub fn not_found(selector: impl std::fmt::Display) -> Self {
        DriverError::ElementNotFound {
            selector: selector.to_string(),
        }
    }

    /// Short stable code for reports and logs.
    pub fn code(&self) -> &'static str {
        match self {
            DriverError::Navigation(_) => "NAVIGATION_ERROR",
            DriverError::ElementNotFound { .. } => "ELEMENT_NOT_FOUND",
            DriverError::ElementNotInteractable { .. } => "ELEMENT_NOT_INTERACTABLE",
            DriverError::Script(_) => "SCRIPT_ERROR",
            DriverError::Input(_) => "INPUT_ERROR",
            DriverError::Screenshot(_) => "SCREENSHOT_ERROR",
            DriverError::Timeout { .. } => "TIMEOUT",
            DriverError::NotReady => "NOT_READY",
            DriverError::Io(_) => "IO_ERROR",
            DriverError::Serialization(_) => "SERIALIZATION_ERROR",
            DriverError::NotSupported(_) => "NOT_SUPPORTED",
            DriverError::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether another attempt can reasonably succeed. Lifecycle and
    /// capability errors will not change between attempts.
    pub fn is_transient(&self) -> bool {
        !matches!(self, DriverError::NotReady | DriverError::NotSupported(_))
    }
}

/// Errors raised while loading or querying fixture tables.
///
/// These indicate a configuration defect rather than transient UI state and
/// are never retried.
#[derive(thiserror::Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fixture {path} has no {table} table")]
    MissingTable { path: PathBuf, table: String },

    #[error("No element named {name:?} in the {table} table")]
    MissingElement { table: String, name: String },

    #[error("Element {name:?} in the {table} table has an empty selector")]
    EmptySelector { table: String, name: String },

    #[error("No profile with id {0:?}")]
    MissingProfile(String),
}
