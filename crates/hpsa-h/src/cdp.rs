use chromiumoxide::{Browser, BrowserConfig as ChromeConfig, Page};
use futures::StreamExt;
use hpsa_engine::config::schema::BrowserConfig;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;

pub struct CdpClient {
    pub browser: Browser,
    pub handler_task: JoinHandle<()>,
    pub page: Page,
    user_data_dir: Option<PathBuf>,
    cleanup_user_data_dir: bool,
}

impl CdpClient {
    pub async fn launch(
        config: &BrowserConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut builder = ChromeConfig::builder();
        builder = builder.no_sandbox(); // Often needed in docker/CI/restricted envs
        let (user_data_dir, cleanup_user_data_dir) = resolve_user_data_dir(config)?;
        builder = builder.user_data_dir(&user_data_dir);

        if config.visible {
            tracing::info!("Launching browser in visible mode");
            builder = builder.with_head();
        } else {
            tracing::info!("Launching browser in headless mode");
        }

        // Explicit binary first, then CHROME_BIN
        if let Some(chrome_bin) = &config.chrome_bin {
            tracing::info!("Using Chrome binary: {}", chrome_bin.display());
            builder = builder.chrome_executable(chrome_bin);
        } else if let Ok(chrome_bin) = std::env::var("CHROME_BIN") {
            tracing::info!("Using custom Chrome binary: {}", chrome_bin);
            builder = builder.chrome_executable(chrome_bin);
        }

        if let Some(extension) = &config.extension_dir {
            tracing::info!("Loading extension from {}", extension.display());
            builder = builder.extension(extension.to_string_lossy());
        }
        if let Some(proxy) = &config.proxy {
            builder = builder.arg(format!("--proxy-server={}", proxy));
        }
        builder = builder.arg(format!("--lang={}", config.language));
        for arg in &config.extra_args {
            builder = builder.arg(arg.clone());
        }

        let (browser, mut handler) = Browser::launch(
            builder
                .build()
                .map_err(|e| format!("Failed to build browser config: {}", e))?,
        )
        .await
        .map_err(|e| format!("Failed to launch browser: {}", e))?;

        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(e) = h {
                    tracing::error!("Browser handler error (ignoring): {}", e);
                    continue;
                }
            }
            tracing::info!("Browser handler task ended");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| format!("Failed to create page: {}", e))?;

        let mut console_events = page
            .event_listener::<chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled>()
            .await
            .map_err(|e| format!("Failed to subscribe to console events: {}", e))?;

        tokio::spawn(async move {
            while let Some(event) = console_events.next().await {
                let args: Vec<String> = event
                    .args
                    .iter()
                    .map(|arg| {
                        arg.description
                            .clone()
                            .or_else(|| arg.value.as_ref().map(|v| v.to_string()))
                            .unwrap_or_else(|| "unknown".to_string())
                    })
                    .collect();
                tracing::debug!("Browser Console [{:?}]: {}", event.r#type, args.join(" "));
            }
        });

        // The app's confirm popups must never block a scenario.
        let mut dialog_events = page
            .event_listener::<chromiumoxide::cdp::browser_protocol::page::EventJavascriptDialogOpening>()
            .await
            .map_err(|e| format!("Failed to subscribe to dialog events: {}", e))?;

        let dialog_page = page.clone();
        tokio::spawn(async move {
            while let Some(event) = dialog_events.next().await {
                tracing::info!(
                    "Accepting JavaScript dialog: {} ({:?})",
                    event.message,
                    event.r#type
                );
                let cmd =
                    chromiumoxide::cdp::browser_protocol::page::HandleJavaScriptDialogParams::new(
                        true,
                    );
                if let Err(e) = dialog_page.execute(cmd).await {
                    tracing::error!("Failed to accept dialog: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            page,
            user_data_dir: Some(user_data_dir),
            cleanup_user_data_dir,
        })
    }

    pub async fn close(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.browser
            .close()
            .await
            .map_err(|e| format!("Error closing browser: {}", e))?;
        self.handler_task
            .await
            .map_err(|e| format!("Error awaiting handler: {}", e))?;

        if self.cleanup_user_data_dir {
            if let Some(dir) = &self.user_data_dir {
                if let Err(e) = std::fs::remove_dir_all(dir) {
                    tracing::debug!("Failed to clean up user-data-dir {}: {}", dir.display(), e);
                }
            }
        }

        Ok(())
    }
}

/// A configured profile directory is kept; otherwise a fresh one is made
/// per launch and removed on close, so every run starts from a first launch.
fn resolve_user_data_dir(
    config: &BrowserConfig,
) -> Result<(PathBuf, bool), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(dir) = &config.user_data_dir {
        std::fs::create_dir_all(dir)?;
        tracing::info!("Using user data dir: {}", dir.display());
        return Ok((dir.clone(), false));
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("System clock error: {}", e))?
        .as_nanos();
    let unique = format!("hpsa-chromium-profile-{}-{}", std::process::id(), nanos);
    let path = std::env::temp_dir().join(unique);
    std::fs::create_dir_all(&path)?;
    tracing::info!("Using isolated user data dir: {}", path.display());
    Ok((path, true))
}
