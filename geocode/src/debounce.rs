//! Debounced, cancellable query sequencer.
//!
//! Coalesces keystrokes into at most one outstanding search request: every
//! call supersedes whatever is pending or in flight, and only the latest
//! request may touch the shared suggestion list.  A failed search degrades
//! to an empty list, never to an error state.
//!

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use safar_common::Place;

use crate::Nominatim;

/// Queries shorter than this never reach the network.
pub const MIN_QUERY_LEN: usize = 3;

/// Inactivity window before a search is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// The sequencer itself.  One producer for the suggestions observable,
/// any number of subscribers through [`SearchDebouncer::suggestions`].
///
#[derive(Debug)]
pub struct SearchDebouncer {
    client: Arc<Nominatim>,
    delay: Duration,
    /// Monotonic query generation, the write guard against stale results.
    seq: Arc<AtomicU64>,
    /// Pending or in-flight search, aborted on reissue.
    task: Option<JoinHandle<()>>,
    tx: Arc<watch::Sender<Vec<Place>>>,
    rx: watch::Receiver<Vec<Place>>,
}

impl SearchDebouncer {
    pub fn new(client: Nominatim) -> Self {
        Self::with_delay(client, DEBOUNCE)
    }

    /// Same but with a custom inactivity window (tests).
    ///
    pub fn with_delay(client: Nominatim, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        SearchDebouncer {
            client: Arc::new(client),
            delay,
            seq: Arc::new(AtomicU64::new(0)),
            task: None,
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Subscribe to the suggestion list.
    ///
    pub fn suggestions(&self) -> watch::Receiver<Vec<Place>> {
        self.rx.clone()
    }

    /// Register a keystroke.  Must be called from within a tokio runtime.
    ///
    #[tracing::instrument(skip(self))]
    pub fn on_query_changed(&mut self, text: &str) {
        trace!("query changed");

        // Supersede whatever was pending or in flight.
        //
        if let Some(task) = self.task.take() {
            task.abort();
        }

        if text.chars().count() < MIN_QUERY_LEN {
            self.supersede_and_clear();
            return;
        }

        // The generation bump happens under the channel lock, same as the
        // response's check-and-write below: a response past its last await
        // point either writes before the bump (and gets overwritten) or
        // fails the check.  It can never write after.
        //
        let mut cur = 0;
        let seq = &self.seq;
        self.tx.send_if_modified(|_| {
            cur = seq.fetch_add(1, Ordering::SeqCst) + 1;
            false
        });

        let client = Arc::clone(&self.client);
        let seq = Arc::clone(&self.seq);
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        let text = text.to_owned();

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let found = match client.search(&text).await {
                Ok(found) => found,
                Err(e) => {
                    // Swallowed, a failed search is an empty list.
                    //
                    debug!("search {text} failed: {e}");
                    Vec::new()
                }
            };

            // Only the latest generation may write.
            //
            tx.send_if_modified(|v| {
                if seq.load(Ordering::SeqCst) == cur {
                    *v = found;
                    true
                } else {
                    false
                }
            });
        }));
    }

    /// Drop any pending search and empty the list (selection made, screen
    /// left).
    ///
    pub fn clear(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.supersede_and_clear();
    }

    /// Bump the generation and empty the list in one step under the channel
    /// lock, so no in-flight response can land afterwards.
    ///
    fn supersede_and_clear(&self) {
        let seq = &self.seq;
        self.tx.send_if_modified(|v| {
            seq.fetch_add(1, Ordering::SeqCst);
            v.clear();
            true
        });
    }

    /// Wait until the current query settles and return the suggestions.
    ///
    /// Convenience for one-shot callers, interactive ones subscribe instead.
    ///
    pub async fn settle(&mut self) -> Vec<Place> {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Short window so the tests do not sit around.
    const FAST: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn test_short_query_clears_without_request() {
        init();
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!([]));
            })
            .await;

        let mut deb = SearchDebouncer::with_delay(Nominatim::with_base(&server.base_url()), FAST);
        deb.on_query_changed("ai");
        let found = deb.settle().await;

        assert!(found.is_empty());
        assert_eq!(0, m.hits_async().await);
    }

    #[tokio::test]
    async fn test_rapid_calls_coalesce_to_one_request() {
        init();
        let server = MockServer::start_async().await;
        let early = server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "air");
                then.status(200).json_body(json!([]));
            })
            .await;
        let late = server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "airport");
                then.status(200).json_body(json!([
                    {"lat": "12.95", "lon": "77.66", "display_name": "Kempegowda Airport"}
                ]));
            })
            .await;

        let mut deb = SearchDebouncer::with_delay(Nominatim::with_base(&server.base_url()), FAST);
        deb.on_query_changed("air");
        deb.on_query_changed("airport");
        let found = deb.settle().await;

        assert_eq!(0, early.hits_async().await);
        assert_eq!(1, late.hits_async().await);
        assert_eq!(1, found.len());
        assert_eq!("Kempegowda Airport", found[0].address);
    }

    #[tokio::test]
    async fn test_short_query_clears_settled_results() {
        init();
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!([
                    {"lat": "12.95", "lon": "77.66", "display_name": "Kempegowda Airport"}
                ]));
            })
            .await;

        let mut deb = SearchDebouncer::with_delay(Nominatim::with_base(&server.base_url()), FAST);
        deb.on_query_changed("airport");
        assert_eq!(1, deb.settle().await.len());

        // Backspacing below the floor clears synchronously and spawns no
        // follow-up task, so the cleared list has to stay cleared.
        //
        deb.on_query_changed("ai");
        assert!(deb.suggestions().borrow().is_empty());
        tokio::time::sleep(FAST * 3).await;
        assert!(deb.suggestions().borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        init();
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(500);
            })
            .await;

        let mut deb = SearchDebouncer::with_delay(Nominatim::with_base(&server.base_url()), FAST);
        deb.on_query_changed("airport");
        let found = deb.settle().await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_clear_supersedes_in_flight() {
        init();
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!([
                    {"lat": "1.0", "lon": "2.0", "display_name": "Stale"}
                ]));
            })
            .await;

        let mut deb = SearchDebouncer::with_delay(Nominatim::with_base(&server.base_url()), FAST);
        deb.on_query_changed("airport");
        deb.clear();

        // Give any runaway task time to (wrongly) write.
        //
        tokio::time::sleep(FAST * 3).await;
        assert!(deb.suggestions().borrow().is_empty());
    }
}
