//! Multi-step UI sequences shared by several scenarios.

pub mod browser;
pub mod dashboard;
pub mod install;
pub mod sign;
pub mod welcome;

/// Capture name `<prefix>_<label>.png`.
pub fn shot_name(prefix: &str, label: &str) -> String {
    format!("{}_{}.png", prefix, label)
}
