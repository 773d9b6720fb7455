// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load settings (defaults, then --config file, then CLI overrides)
// 3. Work out which Markdown files to scan
// 4. Scan them with one shared headless browser
// 5. Print results and exit with proper code (0 = clean, 1 = broken links,
//    2 = error)
//
// All the checking logic lives in the library (src/lib.rs); this file only
// turns CLI input into library calls and results into output.
// =============================================================================

mod cli;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use cli::{Cli, Commands};
use md_link_checker::checker::{ChromeLauncher, HttpProber, LinkChecker};
use md_link_checker::config::Config;
use md_link_checker::scan::{list_markdown_files, scan_documents, walk_markdown_files};
use md_link_checker::{logging, repo};
use report::{print_results, ProgressObserver};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = the scan could not be completed
async fn run(cli: Cli) -> Result<i32> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(chrome) = &cli.chrome {
        config.chrome_executable = Some(chrome.clone());
    }

    let output = Output {
        json: cli.json,
        progress: !cli.json && !cli.no_progress,
    };

    match cli.command {
        Commands::Repo {
            repo_url,
            dir,
            recursive,
            list_dirs,
            clone_dir,
        } => {
            if let Some(clone_dir) = clone_dir {
                config.clone_dir = clone_dir;
            }
            handle_repo_scan(&config, &repo_url, dir.as_deref(), recursive, list_dirs, output)
                .await
        }
        Commands::Dir { path, recursive } => {
            handle_dir_scan(&config, &path, recursive, output).await
        }
        Commands::File { path } => {
            if !path.is_file() {
                bail!("not a file: {}", path.display());
            }
            scan_files(&config, vec![path], output).await
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
    progress: bool,
}

// Handles the 'repo' subcommand
async fn handle_repo_scan(
    config: &Config,
    repo_url: &str,
    dir: Option<&str>,
    recursive: bool,
    list_dirs: bool,
    output: Output,
) -> Result<i32> {
    if !output.json {
        println!("🔍 Fetching repository: {}", repo_url);
    }

    let repo_path = repo::fetch_repository(repo_url, &config.clone_dir)
        .await
        .with_context(|| format!("could not fetch {}", repo_url))?;

    let directories = repo::list_directories(&repo_path)
        .with_context(|| format!("could not list {}", repo_path.display()))?;

    if list_dirs {
        for name in &directories {
            println!("{}", name);
        }
        return Ok(0);
    }

    let target = match dir {
        None => repo_path,
        Some(name) => {
            if !directories.iter().any(|d| d == name) {
                bail!(
                    "no directory '{}' in {} (available: {})",
                    name,
                    repo_url,
                    directories.join(", ")
                );
            }
            repo_path.join(name)
        }
    };

    handle_dir_scan(config, &target, recursive, output).await
}

// Handles the 'dir' subcommand (and the tail end of 'repo')
async fn handle_dir_scan(
    config: &Config,
    dir: &Path,
    recursive: bool,
    output: Output,
) -> Result<i32> {
    let files = if recursive {
        walk_markdown_files(dir)?
    } else {
        list_markdown_files(dir)?
    };

    if files.is_empty() {
        if output.json {
            println!("{{}}");
        } else {
            println!("⚠️  No Markdown files found in {}", dir.display());
        }
        return Ok(0);
    }

    if !output.json {
        println!("📄 Found {} Markdown file(s) in {}", files.len(), dir.display());
    }

    scan_files(config, files, output).await
}

// Runs the checker over `files` and prints the results
async fn scan_files(config: &Config, files: Vec<PathBuf>, output: Output) -> Result<i32> {
    let prober = HttpProber::new(&config.user_agent, config.probe_timeout())?;
    let checker = LinkChecker::new(prober, config.navigation_timeout());
    let launcher = ChromeLauncher::new(
        config.chrome_executable.clone(),
        config.navigation_timeout(),
    );

    let observer = ProgressObserver::new(output.progress);
    let result = scan_documents(&files, &launcher, &checker, &observer).await;
    observer.finish();
    let result = result?;

    print_results(&result, output.json)?;

    if result.is_empty() {
        Ok(0) // Exit code 0 = all good
    } else {
        Ok(1) // Exit code 1 = broken links found
    }
}
