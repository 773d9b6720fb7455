// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three ways to pick what gets scanned:
// - repo: clone a git repository (or reuse a clone) and scan a directory in it
// - dir:  scan a local directory
// - file: scan a single Markdown file
//
// Flags shared by every subcommand are marked `global = true`, so both
// `md-link-checker --json dir docs` and `md-link-checker dir docs --json` work.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "md-link-checker",
    version,
    about = "Find broken links in Markdown files",
    long_about = "md-link-checker extracts every http/https link from Markdown files and checks it. \
                  Links that fail a plain HTTP request get a second chance in headless Chrome; \
                  only links that fail both are reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output results in JSON format instead of a listing
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from this TOML file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the Chrome/Chromium binary (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't draw a progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a git repository and scan one of its directories
    ///
    /// Example: md-link-checker repo https://github.com/rust-lang/book --dir src
    Repo {
        /// Repository URL, anything `git clone` accepts
        repo_url: String,

        /// Directory inside the repository to scan (default: the repository root)
        #[arg(long)]
        dir: Option<String>,

        /// Also scan every subdirectory
        #[arg(long)]
        recursive: bool,

        /// Print the repository's top-level directories and exit
        #[arg(long)]
        list_dirs: bool,

        /// Where to clone to; an existing directory here is reused as-is
        #[arg(long, value_name = "PATH")]
        clone_dir: Option<PathBuf>,
    },

    /// Scan the Markdown files in a local directory
    ///
    /// Example: md-link-checker dir docs --recursive
    Dir {
        /// Directory to scan
        path: PathBuf,

        /// Also scan every subdirectory
        #[arg(long)]
        recursive: bool,
    },

    /// Scan a single Markdown file
    ///
    /// Example: md-link-checker file README.md
    File {
        /// Markdown file to scan
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repo_subcommand() {
        let cli = Cli::try_parse_from([
            "md-link-checker",
            "repo",
            "https://github.com/user/docs",
            "--dir",
            "guides",
            "--recursive",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Repo {
                repo_url,
                dir,
                recursive,
                list_dirs,
                clone_dir,
            } => {
                assert_eq!(repo_url, "https://github.com/user/docs");
                assert_eq!(dir.as_deref(), Some("guides"));
                assert!(recursive);
                assert!(!list_dirs);
                assert!(clone_dir.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "md-link-checker",
            "--no-progress",
            "--chrome",
            "/usr/bin/chromium",
            "dir",
            "docs",
        ])
        .unwrap();

        assert!(cli.no_progress);
        assert_eq!(cli.chrome, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(matches!(
            cli.command,
            Commands::Dir { recursive: false, .. }
        ));
    }

    #[test]
    fn test_file_requires_a_path() {
        assert!(Cli::try_parse_from(["md-link-checker", "file"]).is_err());
    }
}
