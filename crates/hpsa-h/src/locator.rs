use chromiumoxide::Page;
use hpsa_common::Selector;
use hpsa_engine::driver::DriverError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

const LOCATOR_JS: &str = include_str!("locator.js");

/// Default timeout for JavaScript evaluation (10 seconds).
/// This prevents hanging when dialogs (alert/confirm/prompt) block the JS thread.
const EVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum retries for context errors during page navigation.
const MAX_CONTEXT_RETRIES: u32 = 10;

/// Delay between retries when context is not found (page navigating).
const CONTEXT_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateOp {
    Exists,
    /// Centre of the element, scrolled into the viewport if needed.
    Point,
    Focus,
    Reveal,
}

impl LocateOp {
    fn as_str(&self) -> &'static str {
        match self {
            LocateOp::Exists => "exists",
            LocateOp::Point => "point",
            LocateOp::Focus => "focus",
            LocateOp::Reveal => "reveal",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Located {
    pub found: bool,
    /// Number of rendered matches of the selector.
    #[serde(default)]
    pub count: usize,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

/// Check if an error indicates the page context is unavailable (e.g., during navigation).
fn is_context_error(err: &str) -> bool {
    err.contains("Cannot find context")
        || err.contains("Execution context was destroyed")
        || err.contains("-32000")
}

/// Retry an async operation that may fail due to context errors during page navigation.
/// Returns immediately on success or non-context errors; retries only on context errors.
async fn retry_on_context_error<T, E, F, Fut>(
    operation_name: &str,
    mut operation: F,
) -> Result<T, DriverError>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;

    for attempt in 0..MAX_CONTEXT_RETRIES {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let err_str = e.to_string();
                if is_context_error(&err_str) {
                    tracing::debug!(
                        "{} context error (attempt {}/{}), retrying...",
                        operation_name,
                        attempt + 1,
                        MAX_CONTEXT_RETRIES
                    );
                    last_error = Some(err_str);
                    tokio::time::sleep(CONTEXT_RETRY_DELAY).await;
                    continue;
                }
                return Err(DriverError::Script(err_str));
            }
        }
    }

    Err(DriverError::Script(last_error.unwrap_or_else(|| {
        format!("{} failed after retries", operation_name)
    })))
}

pub async fn inject_locator(page: &Page) -> Result<(), DriverError> {
    retry_on_context_error("Locator injection", || try_inject_locator(page)).await
}

async fn try_inject_locator(page: &Page) -> Result<(), String> {
    let is_loaded: bool = page
        .evaluate("typeof window.__hpsaLocator !== 'undefined'")
        .await
        .map_err(|e| format!("Failed to check locator status: {}", e))?
        .into_value()
        .map_err(|e| format!("Failed to get bool value: {}", e))?;

    if !is_loaded {
        page.evaluate(LOCATOR_JS)
            .await
            .map_err(|e| format!("Failed to inject locator.js: {}", e))?;
    }

    Ok(())
}

/// Run one locator operation on the `nth` match of `selector`.
pub async fn locate(
    page: &Page,
    op: LocateOp,
    selector: &Selector,
    nth: usize,
) -> Result<Located, DriverError> {
    let request = serde_json::json!({
        "op": op.as_str(),
        "selector": selector,
        "nth": nth,
    });
    let located: Located = run_locator(page, &format!("window.__hpsaLocator.run({})", request)).await?;
    match located.error {
        Some(e) => Err(DriverError::Script(e)),
        None => Ok(located),
    }
}

/// Centre of the layout viewport in CSS pixels.
pub async fn viewport_center(page: &Page) -> Result<(f64, f64), DriverError> {
    #[derive(Deserialize)]
    struct Center {
        x: f64,
        y: f64,
    }
    let center: Center = run_locator(page, "window.__hpsaLocator.viewportCenter()").await?;
    Ok((center.x, center.y))
}

async fn run_locator<T: DeserializeOwned>(page: &Page, expression: &str) -> Result<T, DriverError> {
    let mut last_error = None;

    for attempt in 0..MAX_CONTEXT_RETRIES {
        inject_locator(page).await?;

        match evaluate_with_timeout(page, expression).await {
            Ok(value) => return Ok(serde_json::from_value(value)?),
            Err(EvalError::Timeout) => {
                return Err(DriverError::Timeout {
                    operation: "locator call, possibly blocked by a dialog".to_string(),
                });
            }
            Err(EvalError::Context(err_str)) => {
                tracing::debug!(
                    "Context error during locator call (attempt {}/{}), retrying...",
                    attempt + 1,
                    MAX_CONTEXT_RETRIES
                );
                last_error = Some(err_str);
                tokio::time::sleep(CONTEXT_RETRY_DELAY).await;
            }
            Err(EvalError::Other(err_str)) => {
                return Err(DriverError::Script(format!("Evaluation failed: {}", err_str)));
            }
        }
    }

    Err(DriverError::Script(last_error.unwrap_or_else(|| {
        "Failed to run locator after retries".to_string()
    })))
}

/// Evaluate a script in the page, bounded by the evaluation timeout.
pub async fn evaluate(page: &Page, expression: &str) -> Result<serde_json::Value, DriverError> {
    match evaluate_with_timeout(page, expression).await {
        Ok(value) => Ok(value),
        Err(EvalError::Timeout) => Err(DriverError::Timeout {
            operation: "script evaluation".to_string(),
        }),
        Err(EvalError::Context(e)) | Err(EvalError::Other(e)) => Err(DriverError::Script(e)),
    }
}

enum EvalError {
    Timeout,
    Context(String),
    Other(String),
}

async fn evaluate_with_timeout(
    page: &Page,
    expression: &str,
) -> Result<serde_json::Value, EvalError> {
    let eval_result = tokio::time::timeout(EVAL_TIMEOUT, page.evaluate(expression)).await;

    match eval_result {
        Err(_) => Err(EvalError::Timeout),
        Ok(Err(e)) => {
            let err_str = e.to_string();
            if is_context_error(&err_str) {
                Err(EvalError::Context(err_str))
            } else {
                Err(EvalError::Other(err_str))
            }
        }
        Ok(Ok(remote_object)) => remote_object
            .into_value::<serde_json::Value>()
            .map_err(|e| EvalError::Other(format!("Failed to get result: {}", e))),
    }
}
