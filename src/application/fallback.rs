use crate::application::extract::{build_prompt, extract_movies};
use crate::domain::traits::Generator;
use crate::infrastructure::storage::cache::AnswerCache;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Best-effort generative search used when the catalog finds nothing.
///
/// Every failure (no credential, transport error, non-2xx, malformed answer,
/// unexpected shape) comes back as `None`; nothing is surfaced to the user.
pub struct GenerativeFallback {
    generator: Option<Arc<dyn Generator>>,
    cache: AnswerCache,
}

impl GenerativeFallback {
    /// `generator` is `None` when no generative credential is configured.
    pub fn new(generator: Option<Arc<dyn Generator>>) -> Self {
        Self {
            generator,
            cache: AnswerCache::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    pub async fn fetch(&self, query: &str) -> Option<Vec<Value>> {
        let Some(generator) = self.generator.as_ref() else {
            debug!("generative fallback skipped: no credential");
            return None;
        };

        if let Some(cached) = self.cache.get(query) {
            debug!(query, "generative cache hit");
            return Some(cached);
        }

        let answer = match generator.generate(&build_prompt(query)).await {
            Ok(Some(answer)) => answer,
            Ok(None) => {
                warn!(query, "generative response had no candidate content");
                return None;
            }
            Err(e) => {
                warn!(query, error = %e, "generative request failed");
                return None;
            }
        };

        let Some(movies) = extract_movies(&answer) else {
            warn!(query, "generative answer did not contain a movie array");
            return None;
        };

        self.cache.insert(query.to_string(), movies.clone());
        Some(movies)
    }
}
