/// Outbound API abstractions
///
/// The request pipeline talks to two external services: a shopping search API
/// that lists products and a generative-text API that writes recommendations.
/// Both sit behind traits so handlers can be exercised without the network.
use crate::{error::AppResult, models::Product};

pub mod gemini;
pub mod serper;

pub use gemini::GeminiProvider;
pub use serper::SerperProvider;

/// Trait for shopping search backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductSearchProvider: Send + Sync {
    /// Search for products matching `query`
    ///
    /// Failures are logged and reported as an empty list; this never errors.
    async fn search_products(&self, query: &str, num_results: u32) -> Vec<Product>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for generative-text backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Send `prompt` to the model and return its raw text response
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    fn name(&self) -> &'static str;
}

/// Serves a fixed status and body on every path, standing in for a remote API.
/// Returns the base URL.
#[cfg(test)]
pub(crate) async fn spawn_upstream(status: axum::http::StatusCode, body: &'static str) -> String {
    let app = axum::Router::new().fallback(move || async move { (status, body) });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}
