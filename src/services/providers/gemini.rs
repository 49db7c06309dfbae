/// Google Gemini provider
///
/// Calls `generateContent` over REST with a single user turn and returns the
/// concatenated text parts of the first candidate.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    services::providers::RecommendationProvider,
};

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build generation client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Extracts generated text from a `generateContent` response body
pub fn extract_text(body: &Value) -> AppResult<String> {
    if let Some(message) = body
        .pointer("/error/message")
        .and_then(Value::as_str)
    {
        return Err(AppError::ExternalApi(message.to_string()));
    }

    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            let reason = body
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("no candidates returned");
            AppError::ExternalApi(format!("Model returned no content: {}", reason))
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(AppError::ExternalApi(
            "Model response contained no text".to_string(),
        ));
    }

    Ok(text)
}

#[async_trait::async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let payload = json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let detail = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, detail
            )));
        }

        let text = extract_text(&body)?;

        tracing::info!(
            model = %self.model,
            chars = text.len(),
            provider = self.name(),
            "Recommendations generated"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
