// src/checker/chrome.rs
// =============================================================================
// The real rendering engine: headless Chrome driven through chromiumoxide.
//
// Lifecycle:
// 1. ChromeLauncher::acquire() starts one Chrome process and opens a tab
// 2. ChromeEngine::navigate()/current_location() drive that tab
// 3. ChromeEngine::release() closes Chrome and waits for the process to exit
//
// Chrome is started with:
// - headless mode (chromiumoxide's default)
// - --no-sandbox, needed when running as root or inside containers
// - --disable-dev-shm-usage, because /dev/shm is tiny in many containers
//
// chromiumoxide talks to Chrome over a websocket. The messages coming back
// from Chrome are processed by a `Handler`, which is a stream that must be
// polled constantly, so it gets its own tokio task.
// =============================================================================

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use super::browser::{EngineLauncher, RenderingEngine, BLANK_PAGE};
use crate::error::EngineError;

// Chrome shows this internal page when a navigation fails (DNS error,
// connection refused, certificate problem, ...)
const CHROME_ERROR_PREFIX: &str = "chrome-error://";

/// Starts headless Chrome sessions.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    executable: Option<PathBuf>,
    request_timeout: Duration,
}

impl ChromeLauncher {
    /// `executable` overrides chromiumoxide's search for a Chrome binary.
    /// `request_timeout` bounds every DevTools request, navigation included.
    pub fn new(executable: Option<PathBuf>, request_timeout: Duration) -> Self {
        Self {
            executable,
            request_timeout,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, EngineError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .request_timeout(self.request_timeout);

        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(EngineError::Launch)
    }
}

#[async_trait]
impl EngineLauncher for ChromeLauncher {
    type Engine = ChromeEngine;

    async fn acquire(&self) -> Result<ChromeEngine, EngineError> {
        let config = self.browser_config()?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        // Keep the websocket flowing until Chrome goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    trace!(error = %e, "chrome handler event error");
                }
            }
        });

        let page = match browser.new_page(BLANK_PAGE).await {
            Ok(page) => page,
            Err(e) => {
                // Don't leave a half-started Chrome behind
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(EngineError::Launch(e.to_string()));
            }
        };

        info!("headless chrome started");

        Ok(ChromeEngine {
            browser,
            page,
            handler_task,
        })
    }
}

/// One running headless Chrome with a single tab.
pub struct ChromeEngine {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl RenderingEngine for ChromeEngine {
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| EngineError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        // A failed load doesn't always surface as an error from goto();
        // Chrome may just show its error page instead
        let location = self.current_location().await?;
        if location.starts_with(CHROME_ERROR_PREFIX) {
            return Err(EngineError::Navigation {
                url: url.to_string(),
                message: format!("chrome showed its error page ({location})"),
            });
        }

        Ok(())
    }

    async fn current_location(&mut self) -> Result<String, EngineError> {
        let location = self
            .page
            .url()
            .await
            .map_err(|e| EngineError::Location(e.to_string()))?;

        // No URL at all means nothing was loaded
        Ok(location.unwrap_or_else(|| BLANK_PAGE.to_string()))
    }

    async fn release(mut self) -> Result<(), EngineError> {
        let closed = self.browser.close().await;

        if closed.is_err() {
            // Polite shutdown failed, make sure the process still dies
            if let Some(Err(e)) = self.browser.kill().await {
                debug!(error = %e, "failed to kill chrome");
            }
        }

        let waited = self.browser.wait().await;
        self.handler_task.abort();

        closed.map_err(|e| EngineError::Shutdown(e.to_string()))?;
        waited.map_err(|e| EngineError::Shutdown(e.to_string()))?;

        info!("headless chrome stopped");
        Ok(())
    }
}
