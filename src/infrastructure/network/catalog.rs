use crate::domain::error::CsError;
use crate::domain::model::{popularity_tier, ListKind, MovieSummary};
use crate::domain::traits::Catalog;
use crate::infrastructure::config::CatalogConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

// TMDB response structures
#[derive(Deserialize, Debug)]
struct PagedResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    status_message: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct Videos {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Deserialize, Debug)]
struct Video {
    key: Option<String>,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ReleaseDates {
    #[serde(default)]
    results: Vec<CountryReleases>,
}

#[derive(Deserialize, Debug)]
struct CountryReleases {
    iso_3166_1: Option<String>,
    #[serde(default)]
    release_dates: Vec<ReleaseDate>,
}

#[derive(Deserialize, Debug)]
struct ReleaseDate {
    certification: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DetailExtras {
    #[serde(default)]
    videos: Videos,
    #[serde(default)]
    release_dates: ReleaseDates,
}

/// TMDB catalog client (bearer-token auth).
pub struct TmdbCatalog {
    client: Client,
    config: CatalogConfig,
}

impl TmdbCatalog {
    pub fn new(client: Client, config: CatalogConfig) -> Self {
        Self { client, config }
    }

    fn token(&self) -> Result<&str, CsError> {
        self.config
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CsError::Config("Catalog token not configured".to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Response, CsError> {
        let token = self.token()?;
        let url = self.url(path);
        debug!(url = %url, "catalog request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // TMDB puts a human readable reason in status_message
            let reason = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(CsError::Api(format!(
                "Catalog returned {}: {}",
                status.as_u16(),
                reason
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl Catalog for TmdbCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CsError> {
        let params = [("query", query), ("page", "1"), ("include_adult", "false")];
        let page = self
            .get("/search/movie", &params)
            .await?
            .json::<PagedResponse>()
            .await?;
        Ok(normalize_page(page))
    }

    async fn list(&self, kind: ListKind, page: u32) -> Result<Vec<MovieSummary>, CsError> {
        let page_number = page.max(1).to_string();
        let params = [
            ("page", page_number.as_str()),
            ("language", self.config.language.as_str()),
        ];
        let page = self
            .get(&format!("/movie/{}", kind.path()), &params)
            .await?
            .json::<PagedResponse>()
            .await?;
        Ok(normalize_page(page))
    }

    async fn details(&self, id: i64) -> Result<MovieSummary, CsError> {
        let params = [
            ("append_to_response", "videos,release_dates"),
            ("language", self.config.language.as_str()),
        ];
        let raw = self
            .get(&format!("/movie/{}", id), &params)
            .await?
            .json::<Value>()
            .await?;

        let mut movie = MovieSummary::from_value(&raw)
            .ok_or_else(|| CsError::Api(format!("Unexpected details payload for movie {}", id)))?;

        let extras: DetailExtras = serde_json::from_value(raw)?;
        if movie.trailer.is_none() {
            movie.trailer = first_trailer(&extras.videos);
        }
        if movie.rating_classification.is_none() {
            movie.rating_classification = us_certification(&extras.release_dates);
        }
        movie.popularity_tier = Some(popularity_tier(movie.popularity).to_string());

        Ok(movie)
    }
}

fn normalize_page(page: PagedResponse) -> Vec<MovieSummary> {
    page.results
        .iter()
        .filter_map(MovieSummary::from_value)
        .collect()
}

fn first_trailer(videos: &Videos) -> Option<String> {
    videos
        .results
        .iter()
        .filter(|v| v.site.as_deref() == Some("YouTube") && v.kind.as_deref() == Some("Trailer"))
        .find_map(|v| v.key.clone().filter(|k| !k.is_empty()))
}

fn us_certification(dates: &ReleaseDates) -> Option<String> {
    dates
        .results
        .iter()
        .find(|c| c.iso_3166_1.as_deref() == Some("US"))?
        .release_dates
        .iter()
        .filter_map(|d| d.certification.as_deref())
        .find(|c| !c.is_empty())
        .map(str::to_string)
}
