// src/scan/document.rs
// =============================================================================
// Scans one Markdown document for broken links.
//
// Steps:
// 1. Read the file (UTF-8). A read failure is an error, never "no links"
// 2. Extract the http/https links in document order
// 3. Check them one by one with the shared browser session
// 4. Return the ones that came back broken, in the same order
//
// Links are checked strictly one after another. The browser session can only
// do one navigation at a time, and `&mut E` makes the compiler enforce that.
// =============================================================================

use std::path::Path;
use tracing::{debug, info};

use crate::checker::{extract_markdown_links, LinkChecker, Prober, RenderingEngine};
use crate::error::ScanError;

/// Reads `path` and returns its broken links in document order.
pub async fn scan_document<P, E>(
    path: &Path,
    checker: &LinkChecker<P>,
    engine: &mut E,
) -> Result<Vec<String>, ScanError>
where
    P: Prober,
    E: RenderingEngine + ?Sized,
{
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScanError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;

    let broken = scan_markdown(&text, checker, engine).await;
    info!(
        path = %path.display(),
        broken = broken.len(),
        "scanned document"
    );
    Ok(broken)
}

/// Returns the broken links of already-loaded Markdown text.
pub async fn scan_markdown<P, E>(text: &str, checker: &LinkChecker<P>, engine: &mut E) -> Vec<String>
where
    P: Prober,
    E: RenderingEngine + ?Sized,
{
    let links = extract_markdown_links(text);
    debug!(count = links.len(), "extracted links");

    let mut broken = Vec::new();
    for url in links {
        if checker.classify(&url, engine).await.is_broken() {
            broken.push(url);
        }
    }
    broken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::testing::{FakeLauncher, Outcome, ScriptedProber};
    use std::time::Duration;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(5);

    const MIXED: &str = "\
[a](https://good.example/x)
[b](https://dead.example/y)
[c](relative/path.md)
[d](mailto:x@y.com)
";

    #[tokio::test]
    async fn test_mixed_document_reports_only_the_dead_link() {
        let launcher = FakeLauncher::with_outcomes([("https://dead.example/y", Outcome::Fault)]);
        let mut engine = launcher.engine();
        let prober = ScriptedProber::broken(&["https://dead.example/y"]);
        let checker = LinkChecker::new(prober, TIMEOUT);

        let broken = scan_markdown(MIXED, &checker, &mut engine).await;
        assert_eq!(broken, vec!["https://dead.example/y"]);

        // Two candidate links probed, only the broken one escalated
        assert_eq!(checker_calls(&checker), 2);
        assert_eq!(launcher.counters.visited(), vec!["https://dead.example/y"]);
    }

    #[tokio::test]
    async fn test_document_without_http_links_is_clean() {
        let launcher = FakeLauncher::default();
        let mut engine = launcher.engine();
        let checker = LinkChecker::new(ScriptedProber::default(), TIMEOUT);

        let text = "# Title\n\n[local](docs/a.md) [mail](mailto:a@b.c) [top](#title)\n";
        let broken = scan_markdown(text, &checker, &mut engine).await;
        assert!(broken.is_empty());
        assert_eq!(checker_calls(&checker), 0);
    }

    #[tokio::test]
    async fn test_order_and_duplicates_are_preserved() {
        let dead = ["https://z.example/", "https://a.example/", "https://m.example/"];
        let launcher = FakeLauncher::with_outcomes(dead.iter().map(|url| (*url, Outcome::Blank)));
        let mut engine = launcher.engine();
        let checker = LinkChecker::new(ScriptedProber::broken(&dead), TIMEOUT);

        let text = "\
[z](https://z.example/) [ok](https://ok.example/)
[a](https://a.example/) [z again](https://z.example/)
[m](https://m.example/)
";
        let first = scan_markdown(text, &checker, &mut engine).await;
        assert_eq!(
            first,
            vec![
                "https://z.example/",
                "https://a.example/",
                "https://z.example/",
                "https://m.example/",
            ]
        );

        // Same document, same (fake) network: same answer
        let second = scan_markdown(text, &checker, &mut engine).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_http_link_is_reported_not_dropped() {
        let url = "http://example.com:99999/docs";
        let launcher = FakeLauncher::with_outcomes([(url, Outcome::Fault)]);
        let mut engine = launcher.engine();
        let checker = LinkChecker::new(ScriptedProber::broken(&[url]), TIMEOUT);

        let text = format!("See [the docs]({url}).\n");
        let broken = scan_markdown(&text, &checker, &mut engine).await;
        assert_eq!(broken, vec![url]);
    }

    #[tokio::test]
    async fn test_scan_document_reads_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, MIXED).unwrap();

        let launcher = FakeLauncher::with_outcomes([("https://dead.example/y", Outcome::Blank)]);
        let mut engine = launcher.engine();
        let checker = LinkChecker::new(ScriptedProber::broken(&["https://dead.example/y"]), TIMEOUT);

        let broken = scan_document(&path, &checker, &mut engine).await.unwrap();
        assert_eq!(broken, vec!["https://dead.example/y"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error_not_a_clean_result() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.md");

        let launcher = FakeLauncher::default();
        let mut engine = launcher.engine();
        let checker = LinkChecker::new(ScriptedProber::default(), TIMEOUT);

        let result = scan_document(&path, &checker, &mut engine).await;
        assert!(matches!(result, Err(ScanError::DocumentRead { .. })));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let launcher = FakeLauncher::default();
        let mut engine = launcher.engine();
        let checker = LinkChecker::new(ScriptedProber::default(), TIMEOUT);

        let result = scan_document(&path, &checker, &mut engine).await;
        assert!(matches!(result, Err(ScanError::DocumentRead { .. })));
    }

    fn checker_calls(checker: &LinkChecker<ScriptedProber>) -> usize {
        checker.prober().calls()
    }
}
