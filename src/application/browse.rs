use crate::domain::error::CsError;
use crate::domain::model::{ListKind, MovieSummary};
use crate::state::AppState;
use tracing::info;

pub async fn browse_list(
    state: &AppState,
    kind: ListKind,
    page: u32,
) -> Result<Vec<MovieSummary>, CsError> {
    let movies = state.catalog.list(kind, page).await?;
    info!(list = kind.path(), page, count = movies.len(), "browse");
    Ok(movies)
}

pub async fn movie_details(state: &AppState, id: i64) -> Result<MovieSummary, CsError> {
    let movie = state.catalog.details(id).await?;
    info!(id, title = %movie.title, "details");
    Ok(movie)
}
