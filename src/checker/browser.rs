// src/checker/browser.rs
// =============================================================================
// This module is the slow second-opinion check: load the link in a real
// browser and see where we end up.
//
// It only runs for links the HTTP probe called broken. Many of those are
// false alarms (bot protection, JavaScript redirects, picky servers) that a
// real browser loads just fine.
//
// The browser itself is behind two traits:
// - EngineLauncher: starts a browser (once per batch)
// - RenderingEngine: one running browser session (navigate, ask location,
//   shut down)
//
// The real implementation lives in chrome.rs. Tests use fakes, so nothing in
// the checking logic needs Chrome installed.
// =============================================================================

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::verdict::Verdict;
use crate::error::EngineError;

/// The location a browser reports when nothing was loaded.
pub const BLANK_PAGE: &str = "about:blank";

/// One running browser session.
///
/// A session is stateful and can only do one navigation at a time, which is
/// why every method takes `&mut self`.
#[async_trait]
pub trait RenderingEngine: Send {
    /// Loads `url` and waits until the browser has settled.
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError>;

    /// The URL the browser is currently showing.
    async fn current_location(&mut self) -> Result<String, EngineError>;

    /// Shuts the browser down. Consumes the session so it can't be reused.
    async fn release(self) -> Result<(), EngineError>
    where
        Self: Sized;
}

/// Starts rendering engine sessions.
#[async_trait]
pub trait EngineLauncher: Send + Sync {
    type Engine: RenderingEngine;

    async fn acquire(&self) -> Result<Self::Engine, EngineError>;
}

// Checks one URL by loading it in the browser
//
// Broken when:
// - navigation fails inside the browser
// - navigation takes longer than `timeout`
// - the browser can't tell us where it is
// - the browser ended up on about:blank (navigation was refused)
//
// Any other final location is alive, even a redirect to a different site.
pub async fn verify<E>(url: &str, engine: &mut E, timeout: Duration) -> Verdict
where
    E: RenderingEngine + ?Sized,
{
    match tokio::time::timeout(timeout, engine.navigate(url)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            debug!(url, error = %e, "browser navigation failed, treating as broken");
            return Verdict::Broken;
        }
        Err(_) => {
            debug!(url, ?timeout, "browser navigation timed out, treating as broken");
            return Verdict::Broken;
        }
    }

    let location = match engine.current_location().await {
        Ok(location) => location,
        Err(e) => {
            debug!(url, error = %e, "could not read browser location, treating as broken");
            return Verdict::Broken;
        }
    };

    if location == BLANK_PAGE {
        debug!(url, "browser stayed on a blank page");
        Verdict::Broken
    } else {
        debug!(url, %location, "browser loaded the page");
        Verdict::Alive
    }
}
