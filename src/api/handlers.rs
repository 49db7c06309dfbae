use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{SearchRequest, SearchResponse},
    services::search_and_recommend,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Search for products and return budget-filtered, model-ranked recommendations
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %request_id, error = %rejection, "Malformed search body");
        AppError::InvalidInput(rejection.body_text())
    })?;

    tracing::info!(
        request_id = %request_id,
        query = %request.query,
        category = %request.category,
        budget_range = %request.budget_range,
        num_results = request.num_results,
        "Processing search request"
    );

    let response = search_and_recommend(
        state.search_provider.as_ref(),
        state.recommendation_provider.as_ref(),
        request,
    )
    .await
    .inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Search request rejected");
    })?;

    tracing::info!(
        request_id = %request_id,
        products_after_filter = response.products_after_filter,
        recommendation_failed = response.recommendation_error.is_some(),
        "Search completed"
    );

    Ok(Json(response))
}
