// src/checker/verdict.rs
// =============================================================================
// The verdict type and the two-stage checking policy.
//
// Policy for one link:
//   1. Ask the HTTP prober (fast)
//   2. Prober says alive  -> alive, done. The browser is never touched.
//   3. Prober says broken -> ask the browser (slow) and use its answer.
//
// So a link is only reported broken when BOTH checks agree. Any disagreement
// ends up as alive.
// =============================================================================

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::browser::{verify, RenderingEngine};
use super::http::Prober;

/// Outcome of checking one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Alive,
    Broken,
}

impl Verdict {
    pub fn is_broken(self) -> bool {
        matches!(self, Verdict::Broken)
    }
}

/// Runs the prober first and escalates to the browser only when needed.
#[derive(Debug, Clone)]
pub struct LinkChecker<P> {
    prober: P,
    navigation_timeout: Duration,
}

impl<P: Prober> LinkChecker<P> {
    pub fn new(prober: P, navigation_timeout: Duration) -> Self {
        Self {
            prober,
            navigation_timeout,
        }
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Classifies one URL, using `engine` only if the prober reports it broken.
    pub async fn classify<E>(&self, url: &str, engine: &mut E) -> Verdict
    where
        E: RenderingEngine + ?Sized,
    {
        if self.prober.probe(url).await == Verdict::Alive {
            return Verdict::Alive;
        }

        debug!(url, "probe reported broken, asking the browser");
        verify(url, engine, self.navigation_timeout).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Prober that answers from a table. Unknown URLs are alive.
    #[derive(Debug, Default)]
    pub struct ScriptedProber {
        verdicts: HashMap<String, Verdict>,
        calls: AtomicUsize,
    }

    impl ScriptedProber {
        pub fn broken(urls: &[&str]) -> Self {
            Self {
                verdicts: urls
                    .iter()
                    .map(|url| (url.to_string(), Verdict::Broken))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, url: &str) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdicts.get(url).copied().unwrap_or(Verdict::Alive)
        }
    }
}
