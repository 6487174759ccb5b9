//! Identity of the machine under test, read from vital product data.

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub const MODEL_NAME: &str = "model_name";
pub const SERIAL_NUMBER: &str = "serial_number";
pub const SKU_NUMBER: &str = "sku_number";

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Reading VPD field {field} failed: {stderr}")]
    Failed { field: String, stderr: String },
    #[error("VPD field {0} is empty")]
    Empty(String),
}

#[async_trait]
pub trait DeviceInfo: Send + Sync {
    /// Value of a read-only VPD field, trimmed.
    async fn read_vpd(&self, field: &str) -> Result<String, DeviceError>;
}

/// Reads fields with the `vpd` tool.
#[derive(Debug, Clone)]
pub struct VpdCommand {
    program: String,
    partition: String,
}

impl VpdCommand {
    pub fn new() -> Self {
        Self {
            program: "vpd".to_string(),
            partition: "RO_VPD".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for VpdCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceInfo for VpdCommand {
    async fn read_vpd(&self, field: &str) -> Result<String, DeviceError> {
        debug!("{} -i {} -g {}", self.program, self.partition, field);
        let output = Command::new(&self.program)
            .args(["-i", &self.partition, "-g", field])
            .output()
            .await
            .map_err(|source| DeviceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DeviceError::Failed {
                field: field.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            return Err(DeviceError::Empty(field.to_string()));
        }
        Ok(value)
    }
}

/// The app shows SKU `AB123-XYZ` as `AB123#XYZ`.
pub fn sku_display(sku: &str) -> String {
    sku.replacen('-', "#", 1)
}
