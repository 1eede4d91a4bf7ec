use crate::application::fallback::GenerativeFallback;
use crate::domain::model::{normalize_items, SearchBackend, SearchSnapshot};
use crate::domain::traits::Catalog;
use crate::infrastructure::config::SearchConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const GENERIC_SEARCH_ERROR: &str = "failed to fetch search results";

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub debounce: Duration,
    pub min_query_chars: usize,
    pub max_results: usize,
    pub settle_on_empty_fallback: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_query_chars: config.min_query_chars,
            max_results: config.max_results,
            settle_on_empty_fallback: config.settle_on_empty_fallback,
        }
    }
}

struct Resolver {
    catalog: Arc<dyn Catalog>,
    fallback: GenerativeFallback,
    options: SearchOptions,
    state: watch::Sender<SearchSnapshot>,
    generation: AtomicU64,
}

impl Resolver {
    /// Start a new generation, invalidating every older resolution.
    ///
    /// The counter is bumped under the channel lock so a stale publish cannot
    /// interleave with it.
    fn next_generation(&self) -> u64 {
        let mut seq = 0;
        self.state.send_if_modified(|_| {
            seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            false
        });
        seq
    }

    /// Apply `update` only if `seq` is still the newest generation.
    fn publish(&self, seq: u64, update: impl FnOnce(&mut SearchSnapshot)) -> bool {
        self.state.send_if_modified(|snapshot| {
            if self.generation.load(Ordering::SeqCst) != seq {
                return false;
            }
            update(snapshot);
            true
        })
    }

    async fn resolve(&self, seq: u64, query: &str) {
        let started = self.publish(seq, |s| {
            s.query = query.to_string();
            s.loading = true;
            s.searching_service = Some(SearchBackend::Catalog);
            s.error = None;
        });
        if !started {
            return;
        }

        let mut movies = match self.catalog.search(query).await {
            Ok(movies) => movies,
            Err(e) => {
                warn!(query, error = %e, "catalog search failed");
                let message = Some(e.to_string())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GENERIC_SEARCH_ERROR.to_string());
                self.publish(seq, |s| {
                    s.error = Some(message);
                    s.results.clear();
                    s.loading = false;
                    s.searching_service = None;
                });
                return;
            }
        };
        movies.truncate(self.options.max_results);

        if !movies.is_empty() {
            info!(query, count = movies.len(), "catalog search");
            self.publish(seq, |s| {
                s.results = movies;
                s.loading = false;
                s.searching_service = None;
            });
            return;
        }

        if !self.publish(seq, |s| s.searching_service = Some(SearchBackend::Generative)) {
            return;
        }

        let raw = self.fallback.fetch(query).await.unwrap_or_default();
        let mut movies = normalize_items(&raw);
        movies.truncate(self.options.max_results);
        info!(query, count = movies.len(), "generative fallback");

        let settle = !raw.is_empty()
            || !self.fallback.is_enabled()
            || self.options.settle_on_empty_fallback;
        self.publish(seq, |s| {
            s.results = movies;
            // An empty answer from a configured fallback keeps loading set
            if settle {
                s.loading = false;
            }
            s.searching_service = None;
        });
    }
}

/// Debounced search over the catalog with a generative fallback.
///
/// Feed it every query change with [`SearchSession::set_query`] and observe
/// the results through [`SearchSession::subscribe`]. The newest query always
/// wins: scheduling a query aborts the pending one and any late response from
/// an older query is discarded.
///
/// Must be used from within a tokio runtime.
pub struct SearchSession {
    resolver: Arc<Resolver>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        fallback: GenerativeFallback,
        options: SearchOptions,
    ) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Self {
            resolver: Arc::new(Resolver {
                catalog,
                fallback,
                options,
                state,
                generation: AtomicU64::new(0),
            }),
            pending: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.resolver.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.resolver.state.borrow().clone()
    }

    /// Number of queries answered by the generative fallback so far.
    pub fn cached_queries(&self) -> usize {
        self.resolver.fallback.cached_queries()
    }

    /// React to a query change.
    ///
    /// Short queries reset the state at once; anything else is resolved once
    /// the debounce delay passes without another change.
    pub fn set_query(&self, query: &str) {
        let trimmed = query.trim().to_string();
        let seq = self.supersede();

        if self.is_short(&trimmed) {
            self.reset(seq, trimmed);
            return;
        }

        let resolver = self.resolver.clone();
        let debounce = resolver.options.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            debug!(query = %trimmed, "debounce elapsed");
            resolver.resolve(seq, &trimmed).await;
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }

    /// Resolve a query right away, skipping the debounce, and return the
    /// final state.
    pub async fn resolve_now(&self, query: &str) -> SearchSnapshot {
        let trimmed = query.trim().to_string();
        let seq = self.supersede();

        if self.is_short(&trimmed) {
            self.reset(seq, trimmed);
        } else {
            self.resolver.resolve(seq, &trimmed).await;
        }
        self.snapshot()
    }

    /// Reset results, error and backend indicator.
    ///
    /// Leaves `loading` and the generative cache untouched.
    pub fn clear_search(&self) {
        self.resolver.state.send_modify(|s| {
            s.results.clear();
            s.error = None;
            s.searching_service = None;
        });
    }

    fn is_short(&self, trimmed: &str) -> bool {
        trimmed.chars().count() < self.resolver.options.min_query_chars
    }

    fn supersede(&self) -> u64 {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
        self.resolver.next_generation()
    }

    // Superseded work can no longer clear `loading`, so the reset does it.
    fn reset(&self, seq: u64, trimmed: String) {
        self.resolver.publish(seq, |s| {
            s.query = trimmed;
            s.results.clear();
            s.error = None;
            s.loading = false;
            s.searching_service = None;
        });
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}
