use serde::{Deserialize, Deserializer, Serialize};

use super::{budget::NO_PREFERENCE, Product};

/// Category value meaning "no category selected"
pub const NO_CATEGORY: &str = "Other";

/// Inbound payload for `POST /search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub query: String,
    #[serde(default = "default_category", deserialize_with = "null_as_category")]
    pub category: String,
    #[serde(default = "default_budget_range", deserialize_with = "null_as_budget_range")]
    pub budget_range: String,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    #[serde(default)]
    pub brand_preference: Option<String>,
    #[serde(default)]
    pub feature_priority: Option<Vec<String>>,
}

fn default_category() -> String {
    NO_CATEGORY.to_string()
}

fn default_budget_range() -> String {
    NO_PREFERENCE.to_string()
}

fn default_num_results() -> u32 {
    10
}

// An explicit `null` means the same as leaving the field out.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

fn null_as_budget_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_budget_range))
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: default_category(),
            budget_range: default_budget_range(),
            num_results: default_num_results(),
            brand_preference: None,
            feature_priority: None,
        }
    }

    /// Brand preference, with blank values treated as absent
    pub fn brand(&self) -> Option<&str> {
        self.brand_preference
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    pub fn features(&self) -> &[String] {
        self.feature_priority.as_deref().unwrap_or_default()
    }
}

/// Aggregate result returned by `POST /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub products_found: usize,
    pub products_after_filter: usize,
    pub avg_rating: f64,
    pub budget_range: String,
    /// HTML produced by the language model, or the legacy inline error text
    pub ai_recommendations: String,
    /// Set when recommendation generation failed
    pub recommendation_error: Option<String>,
    pub products: Vec<Product>,
}
