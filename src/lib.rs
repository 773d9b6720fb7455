// src/lib.rs
// =============================================================================
// md-link-checker as a library.
//
// The pipeline, from the outside in:
//   scan::scan_directory / scan::scan_tree   (many documents, one browser)
//     -> scan::scan_document                 (one document)
//       -> checker::extract_markdown_links   (Markdown -> URLs)
//       -> checker::LinkChecker::classify    (one URL)
//         -> checker::HttpProber             (fast HTTP check)
//         -> checker::verify                 (browser check, only if needed)
//
// The binary (src/main.rs) adds the CLI, progress bar and output on top.
// =============================================================================

pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
pub mod repo;
pub mod scan;

pub use checker::{
    ChromeLauncher, EngineLauncher, HttpProber, LinkChecker, Prober, RenderingEngine, Verdict,
};
pub use config::Config;
pub use error::{ConfigError, EngineError, FetchError, ProbeError, ScanError};
pub use scan::{scan_directory, scan_document, scan_tree, ScanObserver, ScanResult};
