// src/scan/batch.rs
// =============================================================================
// Scans many Markdown documents with a single browser session.
//
// How it works:
// 1. List the documents (one directory, or a whole tree)
// 2. Start ONE browser for the whole batch (starting Chrome is slow)
// 3. Scan each document in listing order with that browser
// 4. Keep only documents that have at least one broken link
// 5. Shut the browser down, whether the batch succeeded or not
//
// Two entry points share the same per-document logic:
// - scan_directory: only the .md files directly inside a directory
// - scan_tree: every .md file under a directory, recursively
//
// Errors:
// - browser won't start      -> ScanError::EngineUnavailable, nothing scanned
// - a document can't be read -> the batch stops with ScanError::DocumentRead
// Neither is ever turned into an empty (clean-looking) result.
// =============================================================================

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::document::scan_document;
use crate::checker::{EngineLauncher, LinkChecker, Prober, RenderingEngine};
use crate::error::ScanError;

const MARKDOWN_SUFFIX: &str = ".md";

/// Broken links of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub broken_links: Vec<String>,
}

/// Documents with broken links, in the order they were scanned.
///
/// Documents without broken links are never stored, so an empty result means
/// every link that was checked is alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    documents: Vec<DocumentReport>,
}

impl ScanResult {
    // Stores a document only if it has something to report
    fn record(&mut self, path: &Path, broken_links: Vec<String>) {
        if !broken_links.is_empty() {
            self.documents.push(DocumentReport {
                path: path.to_path_buf(),
                broken_links,
            });
        }
    }

    /// Broken links of `path`, if it had any.
    pub fn get(&self, path: &Path) -> Option<&[String]> {
        self.documents
            .iter()
            .find(|report| report.path == path)
            .map(|report| report.broken_links.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter()
    }

    /// Number of documents with broken links.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of broken links across all documents.
    pub fn total_broken(&self) -> usize {
        self.documents.iter().map(|r| r.broken_links.len()).sum()
    }
}

// JSON shape: { "docs/a.md": ["https://..."], ... } in scan order
impl Serialize for ScanResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.documents.len()))?;
        for report in &self.documents {
            map.serialize_entry(&report.path.display().to_string(), &report.broken_links)?;
        }
        map.end()
    }
}

/// Receives progress while a batch runs (progress bars, live output, ...).
pub trait ScanObserver: Sync {
    /// Called once, before the browser is started.
    fn on_start(&self, _total: usize) {}

    /// Called after each document. `fraction` goes from just above 0 to 1.
    fn on_document(&self, path: &Path, broken_links: &[String], fraction: f64);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn on_document(&self, _path: &Path, _broken_links: &[String], _fraction: f64) {}
}

/// Scans the `.md` files directly inside `dir` (no recursion).
pub async fn scan_directory<L, P, O>(
    dir: &Path,
    launcher: &L,
    checker: &LinkChecker<P>,
    observer: &O,
) -> Result<ScanResult, ScanError>
where
    L: EngineLauncher,
    P: Prober,
    O: ScanObserver + ?Sized,
{
    let documents = list_markdown_files(dir)?;
    scan_documents(&documents, launcher, checker, observer).await
}

/// Scans every `.md` file under `dir`, recursively.
pub async fn scan_tree<L, P, O>(
    dir: &Path,
    launcher: &L,
    checker: &LinkChecker<P>,
    observer: &O,
) -> Result<ScanResult, ScanError>
where
    L: EngineLauncher,
    P: Prober,
    O: ScanObserver + ?Sized,
{
    let documents = walk_markdown_files(dir)?;
    scan_documents(&documents, launcher, checker, observer).await
}

/// Scans `documents` in order, sharing one browser session across all of them.
///
/// The session is released exactly once, on success and on error alike.
pub async fn scan_documents<L, P, O>(
    documents: &[PathBuf],
    launcher: &L,
    checker: &LinkChecker<P>,
    observer: &O,
) -> Result<ScanResult, ScanError>
where
    L: EngineLauncher,
    P: Prober,
    O: ScanObserver + ?Sized,
{
    observer.on_start(documents.len());
    info!(documents = documents.len(), "starting batch");

    let mut engine = launcher
        .acquire()
        .await
        .map_err(ScanError::EngineUnavailable)?;

    // Keep the outcome aside so release() runs before any `?` can return
    let outcome = scan_with_engine(documents, checker, &mut engine, observer).await;

    if let Err(e) = engine.release().await {
        warn!(error = %e, "failed to release rendering engine");
    }

    let result = outcome?;
    info!(
        documents = result.len(),
        broken = result.total_broken(),
        "batch finished"
    );
    Ok(result)
}

async fn scan_with_engine<P, E, O>(
    documents: &[PathBuf],
    checker: &LinkChecker<P>,
    engine: &mut E,
    observer: &O,
) -> Result<ScanResult, ScanError>
where
    P: Prober,
    E: RenderingEngine,
    O: ScanObserver + ?Sized,
{
    let mut result = ScanResult::default();
    let total = documents.len();

    for (index, path) in documents.iter().enumerate() {
        let broken = scan_document(path, checker, engine).await?;
        observer.on_document(path, &broken, (index + 1) as f64 / total as f64);
        result.record(path, broken);
    }

    Ok(result)
}

/// Lists the `.md` files directly inside `dir`, sorted by file name.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let listing_error = |source| ScanError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(listing_error)? {
        let path = entry.map_err(listing_error)?.path();
        if path.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Lists every `.md` file under `dir`, walking subdirectories.
///
/// Hidden files and files excluded by .gitignore are included: a cloned
/// repository's docs should all be checked, whatever its ignore rules say.
pub fn walk_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let walker = ignore::WalkBuilder::new(dir)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

// Case-sensitive, like the file name test on most Linux tooling: README.MD
// is not picked up
fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(MARKDOWN_SUFFIX))
}
