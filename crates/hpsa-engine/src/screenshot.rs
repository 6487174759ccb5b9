use crate::driver::{DriverError, UiDriver};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("Failed to capture screenshot {name}: {source}")]
    Capture {
        name: String,
        #[source]
        source: DriverError,
    },
    #[error("Failed to write screenshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory receiving PNG captures, named by scenario step.
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl ScreenshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for `name`, with `.png` appended unless already present.
    pub fn path_for(&self, name: &str) -> PathBuf {
        if name.ends_with(".png") {
            self.dir.join(name)
        } else {
            self.dir.join(format!("{}.png", name))
        }
    }

    pub async fn capture<D>(&self, driver: &D, name: &str) -> Result<PathBuf, ScreenshotError>
    where
        D: UiDriver + ?Sized,
    {
        let bytes = driver
            .screenshot()
            .await
            .map_err(|source| ScreenshotError::Capture {
                name: name.to_string(),
                source,
            })?;

        let path = self.path_for(name);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ScreenshotError::Write {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| ScreenshotError::Write {
                path: path.clone(),
                source,
            })?;

        info!("Saved screenshot {}", path.display());
        Ok(path)
    }

    /// Whether a capture named `name` exists on disk.
    pub fn exists(&self, name: &str) -> bool {
        std::fs::symlink_metadata(self.path_for(name)).is_ok()
    }
}
