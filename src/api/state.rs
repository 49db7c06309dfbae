use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::providers::{
    GeminiProvider, ProductSearchProvider, RecommendationProvider, SerperProvider,
};

/// Shared application state
///
/// Holds the outbound API clients. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub search_provider: Arc<dyn ProductSearchProvider>,
    pub recommendation_provider: Arc<dyn RecommendationProvider>,
}

impl AppState {
    pub fn new(
        search_provider: Arc<dyn ProductSearchProvider>,
        recommendation_provider: Arc<dyn RecommendationProvider>,
    ) -> Self {
        Self {
            search_provider,
            recommendation_provider,
        }
    }

    /// Builds the Serper and Gemini clients from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let search = SerperProvider::new(
            config.serper_api_key.clone(),
            config.serper_api_url.clone(),
            config.search_timeout(),
        )?;
        let recommender = GeminiProvider::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.generation_timeout(),
        )?;

        Ok(Self::new(Arc::new(search), Arc::new(recommender)))
    }
}
