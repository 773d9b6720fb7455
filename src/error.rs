// src/error.rs
// =============================================================================
// Error types for the library.
//
// Two kinds of failure exist in this tool and they must never be mixed up:
// - Link-level failures (timeouts, DNS errors, a page that won't load).
//   These are NOT errors here. They become a `Verdict::Broken` inside the
//   checker and never show up as one of these types.
// - Batch-level failures (the browser won't start, a file can't be read).
//   These are the types below. They reach the caller so a broken setup is
//   never reported as "no broken links".
//
// The binary wraps all of these in anyhow::Error; the library keeps them typed
// with thiserror so callers and tests can match on them.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a rendering engine (the headless browser).
#[derive(Error, Debug)]
pub enum EngineError {
    /// The browser could not be started (missing binary, bad config, ...)
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to a URL failed inside the browser
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The browser could not report where it ended up
    #[error("could not read current location: {0}")]
    Location(String),

    /// Shutting the browser down failed
    #[error("failed to shut down browser: {0}")]
    Shutdown(String),
}

/// Failures that abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("rendering engine unavailable: {0}")]
    EngineUnavailable(#[source] EngineError),

    #[error("failed to read {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },
}

/// The HTTP client for the prober could not be built.
#[derive(Error, Debug)]
#[error("failed to build HTTP client: {0}")]
pub struct ProbeError(#[from] pub reqwest::Error);

/// Failures while fetching a repository.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git clone exited with {status}: {stderr}")]
    CloneFailed { status: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while loading the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
