use crate::application::fallback::GenerativeFallback;
use crate::application::search::{SearchOptions, SearchSession};
use crate::domain::error::CsError;
use crate::domain::traits::{Catalog, Generator};
use crate::infrastructure::config::Config;
use crate::infrastructure::network::catalog::TmdbCatalog;
use crate::infrastructure::network::generative::GeminiGenerator;
use crate::infrastructure::network::http::create_client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn Catalog>,
    pub generator: Option<Arc<dyn Generator>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, CsError> {
        let http_client = create_client(&config)?;

        let catalog: Arc<dyn Catalog> = Arc::new(TmdbCatalog::new(
            http_client.clone(),
            config.catalog.clone(),
        ));

        let generator = config.generative_key().map(|key| {
            Arc::new(GeminiGenerator::new(
                http_client.clone(),
                config.generative.endpoint.clone(),
                key.to_string(),
                config.generative.temperature,
            )) as Arc<dyn Generator>
        });

        Ok(Self {
            config: Arc::new(config),
            catalog,
            generator,
        })
    }

    /// A fresh search session with its own generative cache.
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(
            self.catalog.clone(),
            GenerativeFallback::new(self.generator.clone()),
            SearchOptions::from(&self.config.search),
        )
    }
}
