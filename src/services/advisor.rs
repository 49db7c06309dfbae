use crate::{
    error::{AppError, AppResult},
    models::{Product, SearchRequest, SearchResponse},
    services::{
        budget_filter::filter_by_budget,
        providers::{ProductSearchProvider, RecommendationProvider},
        query_builder::{build_preferences_text, build_search_query},
        recommendations::generate_recommendations,
    },
};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";
pub const NO_PRODUCTS_MESSAGE: &str = "No products found. Try adjusting your search query.";

/// Mean of the numeric ratings in `products`; unrated products are ignored.
pub fn average_rating(products: &[Product]) -> f64 {
    let ratings: Vec<f64> = products.iter().filter_map(Product::rating_value).collect();
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Runs one search request end to end.
///
/// validate → search → budget filter → statistics → recommendation text.
/// An empty query fails before any outbound call, and an empty search result
/// fails before the model is asked anything.
pub async fn search_and_recommend(
    search: &dyn ProductSearchProvider,
    recommender: &dyn RecommendationProvider,
    request: SearchRequest,
) -> AppResult<SearchResponse> {
    if request.query.trim().is_empty() {
        return Err(AppError::InvalidInput(EMPTY_QUERY_MESSAGE.to_string()));
    }

    let brand = request.brand();
    let search_query = build_search_query(&request.query, &request.category, brand);

    let products = search
        .search_products(&search_query, request.num_results)
        .await;

    if products.is_empty() {
        tracing::info!(query = %search_query, "Search returned no products");
        return Err(AppError::NotFound(NO_PRODUCTS_MESSAGE.to_string()));
    }

    let filtered = filter_by_budget(&products, &request.budget_range);

    tracing::info!(
        query = %search_query,
        budget_range = %request.budget_range,
        products_found = products.len(),
        products_after_filter = filtered.len(),
        "Products filtered"
    );

    let preferences = build_preferences_text(&request.query, request.features(), brand);
    let recommendation = generate_recommendations(
        recommender,
        &filtered,
        &preferences,
        &request.budget_range,
        &request.category,
    )
    .await;

    let avg_rating = round_to_tenth(average_rating(&filtered));

    Ok(SearchResponse {
        success: true,
        products_found: products.len(),
        products_after_filter: filtered.len(),
        avg_rating,
        budget_range: request.budget_range,
        ai_recommendations: recommendation.text,
        recommendation_error: recommendation.error,
        products: filtered,
    })
}
