// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Extracts links from Markdown text
// - http: Fast first-pass check with a plain HTTP GET
// - browser: Slow second-opinion check in a real browser (traits + logic)
// - chrome: The real browser, headless Chrome via chromiumoxide
// - verdict: The Verdict type and the policy tying the two checks together
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::LinkChecker` instead of
// `checker::verdict::LinkChecker`.
// =============================================================================

mod browser;
mod chrome;
mod http;
mod markdown;
mod verdict;

pub use browser::{verify, EngineLauncher, RenderingEngine, BLANK_PAGE};
pub use chrome::{ChromeEngine, ChromeLauncher};
pub use http::{HttpProber, Prober};
pub use markdown::extract_markdown_links;
pub use verdict::{LinkChecker, Verdict};
