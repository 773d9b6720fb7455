// src/repo/mod.rs
// =============================================================================
// This module gets documents onto disk from a remote git repository.
//
// Currently implements:
// - Cloning a repository (or reusing an existing clone)
// - Listing its top-level directories so the user can pick one to scan
// =============================================================================

mod fetch;

pub use fetch::{fetch_repository, list_directories};
