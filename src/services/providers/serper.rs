/// Serper shopping search provider
///
/// `POST /shopping` with the query, locale fixed to US/English. The response's
/// `shopping` array is decoded item by item so one odd listing can't sink the
/// whole result set.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::Product,
    services::providers::ProductSearchProvider,
};

const SEARCH_COUNTRY: &str = "us";
const SEARCH_LANGUAGE: &str = "en";

#[derive(Clone)]
pub struct SerperProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl SerperProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build search client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    async fn fetch(&self, query: &str, num_results: u32) -> AppResult<Vec<Product>> {
        let url = format!("{}/shopping", self.api_url.trim_end_matches('/'));
        let payload = json!({
            "q": query,
            "gl": SEARCH_COUNTRY,
            "hl": SEARCH_LANGUAGE,
            "num": num_results,
        });

        let response = self
            .http_client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let body: Value = response.json().await?;
        Ok(parse_shopping_response(body))
    }
}

/// Pulls products out of a Serper response body.
///
/// A missing or non-array `shopping` key yields no products; array entries that
/// aren't objects are skipped.
pub fn parse_shopping_response(body: Value) -> Vec<Product> {
    let Value::Object(mut body) = body else {
        tracing::warn!("Shopping response body is not a JSON object");
        return Vec::new();
    };

    let Some(Value::Array(items)) = body.remove("shopping") else {
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!(index, "Skipping non-object shopping result");
                return None;
            }
            match serde_json::from_value::<Product>(item) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping undecodable shopping result");
                    None
                }
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl ProductSearchProvider for SerperProvider {
    async fn search_products(&self, query: &str, num_results: u32) -> Vec<Product> {
        match self.fetch(query, num_results).await {
            Ok(products) => {
                tracing::info!(
                    query = %query,
                    results = products.len(),
                    provider = self.name(),
                    "Product search completed"
                );
                products
            }
            Err(e) => {
                tracing::error!(
                    query = %query,
                    error = %e,
                    provider = self.name(),
                    "Error fetching products"
                );
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "serper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::spawn_upstream;
    use axum::http::StatusCode;

    fn provider_for(api_url: String) -> SerperProvider {
        SerperProvider::new("test_key".to_string(), api_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_shopping_response() {
        let body = json!({
            "searchParameters": { "q": "headphones", "type": "shopping" },
            "shopping": [
                {
                    "title": "Sony WH-1000XM5",
                    "source": "Amazon",
                    "link": "https://example.com/1",
                    "price": "$348.00",
                    "rating": 4.6,
                    "ratingCount": 2100
                },
                {
                    "title": "Bose QC45",
                    "source": "Target",
                    "price": "$279.00"
                }
            ]
        });

        let products = parse_shopping_response(body);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title.as_deref(), Some("Sony WH-1000XM5"));
        assert_eq!(products[1].rating_value(), None);
    }

    #[test]
    fn test_parse_missing_shopping_key() {
        assert!(parse_shopping_response(json!({ "credits": 1 })).is_empty());
        assert!(parse_shopping_response(json!({ "shopping": "nope" })).is_empty());
        assert!(parse_shopping_response(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_parse_skips_non_object_items() {
        let body = json!({ "shopping": [ { "title": "ok" }, 42, null, "text" ] });
        let products = parse_shopping_response(body);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_empty() {
        let provider = SerperProvider::new(
            "test_key".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();

        let products = provider.search_products("anything", 5).await;
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_returns_empty() {
        let url = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;
        assert!(provider_for(url).search_products("lamp", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_client_error_returns_empty() {
        let url = spawn_upstream(StatusCode::FORBIDDEN, r#"{"message":"Unauthorized."}"#).await;
        assert!(provider_for(url).search_products("lamp", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_returns_empty() {
        let url = spawn_upstream(StatusCode::OK, "not json").await;
        assert!(provider_for(url).search_products("lamp", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_successful_search_decodes_products() {
        let url = spawn_upstream(
            StatusCode::OK,
            r#"{"shopping":[{"title":"Desk lamp","price":"$24.99","rating":4.1}]}"#,
        )
        .await;

        let products = provider_for(url).search_products("lamp", 5).await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price.as_deref(), Some("$24.99"));
    }
}
