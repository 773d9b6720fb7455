// src/scan/mod.rs
// =============================================================================
// This module applies the link checker to documents.
//
// Submodules:
// - document: one Markdown document -> its broken links
// - batch: many documents (a directory or a tree) -> ScanResult
// =============================================================================

mod batch;
mod document;

pub use batch::{
    list_markdown_files, scan_directory, scan_documents, scan_tree, walk_markdown_files,
    DocumentReport, NoopObserver, ScanObserver, ScanResult,
};
pub use document::{scan_document, scan_markdown};
