use crate::domain::error::CsError;
use crate::domain::model::{ListKind, MovieSummary};
use async_trait::async_trait;

/// Primary movie catalog (TMDB-style REST API).
///
/// The search routine only depends on this trait, so tests and alternative
/// catalogs can be swapped in without touching the routine.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Text search, first page only, adult titles excluded.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CsError>;

    /// One page of a curated list (now playing, popular, upcoming).
    async fn list(&self, kind: ListKind, page: u32) -> Result<Vec<MovieSummary>, CsError>;

    /// Full details for a single movie id.
    async fn details(&self, id: i64) -> Result<MovieSummary, CsError>;
}

/// Text-generation service used as the search fallback.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send a prompt and return the answer text of the first candidate.
    ///
    /// `Ok(None)` means the service answered but the response did not have
    /// the expected candidate/content/parts structure.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, CsError>;
}
