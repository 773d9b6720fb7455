// src/checker/http.rs
// =============================================================================
// This module is the fast first-pass check: one HTTP GET per link.
//
// Classification:
// - 400-499 (client error)      -> Broken
// - network failure of any kind -> Broken (DNS, refused, timeout, TLS, ...)
// - anything else               -> Alive (2xx, 3xx left after following
//                                         redirects, and 5xx)
//
// Why are 5xx server errors "alive"?
// - A 500 or 503 is often temporary. It says the server is having a bad day,
//   not that the page is gone. Only 4xx says "this page does not exist" or
//   "you may not have it".
//
// Why is a network failure "broken"?
// - A probe that can't reach the server has proved nothing. Calling it alive
//   would hide dead links. Calling it broken sends it to the slower browser
//   check, which gets the final say.
//
// This check is known to be too pessimistic: sites that block bots, need
// JavaScript, or care about headers answer 403/404 to us but work fine in a
// browser. That is what the browser check in browser.rs is for.
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use super::verdict::Verdict;
use crate::error::ProbeError;

/// A fast, stateless liveness check for one URL.
///
/// Implementations must never fail: every problem is folded into the verdict.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str) -> Verdict;
}

/// Prober backed by a real HTTP client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    // Builds the HTTP client once; it is reused for every link
    // (connection pooling, shared TLS setup)
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Verdict {
        match self.client.get(url).send().await {
            Ok(response) => {
                // reqwest already followed redirects, so this is the final status
                let status = response.status();
                let verdict = classify_status(status);
                debug!(url, status = status.as_u16(), ?verdict, "probe finished");
                verdict
            }
            Err(e) => {
                debug!(url, error = %describe_error(&e), "probe failed, treating as broken");
                Verdict::Broken
            }
        }
    }
}

// Maps a final HTTP status to a verdict
//
// HTTP status codes:
// - 200-299: Success
// - 300-399: Redirect (only seen here if it could not be followed)
// - 400-499: Client error (404 not found, 410 gone, 403 forbidden, ...)
// - 500-599: Server error
fn classify_status(status: StatusCode) -> Verdict {
    if status.is_client_error() {
        Verdict::Broken
    } else {
        Verdict::Alive
    }
}

// Short description of a reqwest error for the logs
//
// The verdict is the same for all of these; this only helps a human reading
// the debug output figure out why a link was escalated.
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn prober() -> HttpProber {
        HttpProber::new("md-link-checker-test", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_classify_status_ranges() {
        assert_eq!(classify_status(StatusCode::OK), Verdict::Alive);
        assert_eq!(classify_status(StatusCode::NO_CONTENT), Verdict::Alive);
        assert_eq!(classify_status(StatusCode::NOT_MODIFIED), Verdict::Alive);
        assert_eq!(classify_status(StatusCode::BAD_REQUEST), Verdict::Broken);
        assert_eq!(classify_status(StatusCode::FORBIDDEN), Verdict::Broken);
        assert_eq!(classify_status(StatusCode::NOT_FOUND), Verdict::Broken);
        assert_eq!(classify_status(StatusCode::GONE), Verdict::Broken);
        assert_eq!(
            classify_status(StatusCode::from_u16(499).unwrap()),
            Verdict::Broken
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Verdict::Alive
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            Verdict::Alive
        );
    }

    #[tokio::test]
    async fn test_ok_page_is_alive() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/ok");
                then.status(200).body("hello");
            })
            .await;

        assert_eq!(prober().probe(&server.url("/ok")).await, Verdict::Alive);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_broken() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        assert_eq!(
            prober().probe(&server.url("/missing")).await,
            Verdict::Broken
        );
    }

    #[tokio::test]
    async fn test_server_error_is_alive() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/flaky");
                then.status(503);
            })
            .await;

        assert_eq!(prober().probe(&server.url("/flaky")).await, Verdict::Alive);
    }

    #[tokio::test]
    async fn test_redirects_are_followed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/old");
                then.status(301).header("Location", "/gone");
            })
            .await;
        let target = server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(410);
            })
            .await;

        assert_eq!(prober().probe(&server.url("/old")).await, Verdict::Broken);
        target.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/ua")
                    .header("user-agent", "md-link-checker-test");
                then.status(200);
            })
            .await;

        assert_eq!(prober().probe(&server.url("/ua")).await, Verdict::Alive);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_broken() {
        // Bind to get a free port, then drop the listener so nothing answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = format!("http://127.0.0.1:{port}/");
        assert_eq!(prober().probe(&url).await, Verdict::Broken);
    }

    #[tokio::test]
    async fn test_slow_response_times_out_as_broken() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(2));
            })
            .await;

        let impatient = HttpProber::new("md-link-checker-test", Duration::from_millis(200)).unwrap();
        assert_eq!(impatient.probe(&server.url("/slow")).await, Verdict::Broken);
    }

    #[tokio::test]
    async fn test_unparseable_url_is_broken() {
        // Port out of range: the request can't even be built
        assert_eq!(
            prober().probe("http://example.com:99999/docs").await,
            Verdict::Broken
        );
    }
}
