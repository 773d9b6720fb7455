// src/repo/fetch.rs
// =============================================================================
// This module gets a repository onto disk so its Markdown files can be scanned.
//
// Strategy:
// - If the target directory already exists, use it as-is. No pull, no
//   freshness check: running twice against the same URL reuses the first
//   clone. Delete the directory to get a fresh copy.
// - Otherwise run `git clone <url> <target>`.
//
// Why shell out to git instead of a git library?
// - Whatever credentials, proxies and SSH keys the user has set up for git
//   just work
// - We only need one command, run once
// =============================================================================

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

use crate::error::FetchError;

// Clones `repo_url` into `target` unless `target` already exists
//
// Returns: the path of the working tree (always `target`)
pub async fn fetch_repository(repo_url: &str, target: &Path) -> Result<PathBuf, FetchError> {
    if target.exists() {
        info!(path = %target.display(), "reusing existing checkout");
        return Ok(target.to_path_buf());
    }

    // A URL starting with '-' would be read by git as an option
    if repo_url.starts_with('-') {
        return Err(FetchError::InvalidUrl(repo_url.to_string()));
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    info!(url = repo_url, path = %target.display(), "cloning repository");

    let output = Command::new("git")
        .arg("clone")
        .arg("--")
        .arg(repo_url)
        .arg(target)
        .output()
        .await
        .map_err(FetchError::Spawn)?;

    if !output.status.success() {
        return Err(FetchError::CloneFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(target.to_path_buf())
}

// Lists the subdirectories of `path`, sorted by name
//
// The .git directory is skipped; there is nothing to scan in there.
pub fn list_directories(path: &Path) -> Result<Vec<String>, FetchError> {
    let mut directories = Vec::new();

    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name != ".git" {
            directories.push(name);
        }
    }

    directories.sort();
    Ok(directories)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::process::Command instead of std::process::Command?
//    - The std version blocks the thread until git finishes
//    - The tokio version lets the runtime keep working while git runs
//    - The API is the same; you just add .await
//
// 2. What does "--" do in `git clone -- <url> <dir>`?
//    - It tells git "no more options after this point"
//    - Everything after it is treated as a URL or path, even if it looks
//      like a flag
//
// 3. What is String::from_utf8_lossy?
//    - git's stderr is raw bytes
//    - from_utf8_lossy turns them into text, replacing invalid bytes with �
//      instead of failing
// -----------------------------------------------------------------------------
