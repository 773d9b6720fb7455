// src/report.rs
// =============================================================================
// Everything the user sees while and after a scan runs.
//
// - ProgressObserver: an indicatif progress bar that also prints each
//   document's broken links as soon as that document is done
// - print_results: the final listing (or JSON) once the batch is over
// =============================================================================

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use md_link_checker::scan::{ScanObserver, ScanResult};
use std::path::Path;

// Drives a progress bar from the batch scanner's callbacks
pub struct ProgressObserver {
    bar: ProgressBar,
    live_output: bool,
}

impl ProgressObserver {
    // `enabled = false` gives a hidden bar and no live output (used for --json
    // and --no-progress)
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            live_output: enabled,
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ScanObserver for ProgressObserver {
    fn on_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_document(&self, path: &Path, broken_links: &[String], _fraction: f64) {
        self.bar.inc(1);
        self.bar.set_message(path.display().to_string());

        // println() on the bar keeps the bar at the bottom of the terminal
        if self.live_output && !broken_links.is_empty() {
            self.bar.println(format!(
                "❌ {} ({} broken)",
                path.display(),
                broken_links.len()
            ));
        }
    }
}

// Prints the results either as a listing or JSON
pub fn print_results(result: &ScanResult, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else {
        print_listing(result);
    }
    Ok(())
}

fn print_listing(result: &ScanResult) {
    if result.is_empty() {
        println!("✅ No broken links found in any of the Markdown files.");
        return;
    }

    for report in result.iter() {
        println!("📄 {}", report.path.display());
        for link in &report.broken_links {
            println!("   ❌ {}", link);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Files with broken links: {}", result.len());
    println!("   ❌ Broken links: {}", result.total_broken());
}
