use crate::{models::Product, services::providers::RecommendationProvider};

/// Most products included in a prompt
pub const MAX_PROMPT_PRODUCTS: usize = 10;

const NOT_AVAILABLE: &str = "N/A";

/// Result of asking the model for recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// HTML from the model, or a human-readable error line when generation failed
    pub text: String,
    pub error: Option<String>,
}

/// Builds the recommendation prompt.
///
/// Only the first [`MAX_PROMPT_PRODUCTS`] products are listed.
pub fn build_prompt(
    products: &[Product],
    preferences: &str,
    budget_range: &str,
    category: &str,
) -> String {
    let mut products_text = String::new();
    for (i, product) in products.iter().take(MAX_PROMPT_PRODUCTS).enumerate() {
        products_text.push_str(&format!(
            "\nProduct {}:\n\
             - Title: {}\n\
             - Price: {}\n\
             - Rating: {}\n\
             - Reviews: {}\n\
             - Source: {}\n\
             - Link: {}\n",
            i + 1,
            product.title.as_deref().unwrap_or(NOT_AVAILABLE),
            product.price.as_deref().unwrap_or(NOT_AVAILABLE),
            product.rating_display().as_deref().unwrap_or(NOT_AVAILABLE),
            product.reviews_display().as_deref().unwrap_or(NOT_AVAILABLE),
            product.source.as_deref().unwrap_or(NOT_AVAILABLE),
            product.link.as_deref().unwrap_or(NOT_AVAILABLE),
        ));
    }

    format!(
        "You are an expert product recommendation assistant. Based on the following user \
         preferences and product data, provide personalized recommendations.\n\
         \n\
         User Preferences: {preferences}\n\
         Budget Range: {budget_range}\n\
         Category: {category}\n\
         \n\
         Available Products:\n\
         {products_text}\n\
         Please analyze these products and provide:\n\
         1. Top 3-5 most suitable recommendations based on user preferences\n\
         2. Brief explanation for each recommendation\n\
         3. Highlight key features that match user needs\n\
         4. Include price and where to buy\n\
         5. Format as clean, structured recommendations with HTML formatting\n\
         \n\
         Focus on value, quality, and matching user requirements.\n"
    )
}

/// Generates recommendation text for the filtered products.
///
/// Never fails: provider errors come back as an inline message in `text` with
/// the same message in `error`.
pub async fn generate_recommendations(
    provider: &dyn RecommendationProvider,
    products: &[Product],
    preferences: &str,
    budget_range: &str,
    category: &str,
) -> Recommendation {
    let prompt = build_prompt(products, preferences, budget_range, category);

    match provider.generate(&prompt).await {
        Ok(text) => Recommendation { text, error: None },
        Err(e) => {
            tracing::error!(
                error = %e,
                provider = provider.name(),
                "Recommendation generation failed"
            );
            let message = e.to_string();
            Recommendation {
                text: format!("Error generating recommendations: {}", message),
                error: Some(message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::providers::MockRecommendationProvider};
    use mockall::predicate::function;
    use serde_json::json;

    fn product(n: usize) -> Product {
        Product {
            title: Some(format!("Item {}", n)),
            price: Some(format!("${}.00", n * 10)),
            rating: Some(json!(4.5)),
            reviews_count: Some(json!(120)),
            source: Some("Shop".to_string()),
            link: Some(format!("https://example.com/{}", n)),
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_lists_product_fields() {
        let prompt = build_prompt(&[product(1)], "quiet keyboard", "Under $100", "Electronics");

        assert!(prompt.contains("User Preferences: quiet keyboard"));
        assert!(prompt.contains("Budget Range: Under $100"));
        assert!(prompt.contains("Category: Electronics"));
        assert!(prompt.contains("Product 1:\n- Title: Item 1\n- Price: $10.00\n- Rating: 4.5\n- Reviews: 120\n- Source: Shop\n- Link: https://example.com/1\n"));
        assert!(prompt.contains("Top 3-5 most suitable recommendations"));
        assert!(prompt.contains("HTML formatting"));
    }

    #[test]
    fn test_prompt_caps_product_count() {
        let products: Vec<Product> = (1..=12).map(product).collect();
        let prompt = build_prompt(&products, "q", "No preference", "Other");

        assert!(prompt.contains("Product 10:"));
        assert!(!prompt.contains("Product 11:"));
    }

    #[test]
    fn test_prompt_missing_fields_render_na() {
        let prompt = build_prompt(&[Product::default()], "q", "No preference", "Other");
        assert!(prompt.contains("- Title: N/A\n- Price: N/A\n- Rating: N/A"));
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_generate()
            .with(function(|prompt: &str| prompt.contains("Item 1")))
            .times(1)
            .returning(|_| Ok("<ol><li>Item 1</li></ol>".to_string()));

        let result =
            generate_recommendations(&provider, &[product(1)], "q", "Under $100", "Other").await;

        assert_eq!(result.text, "<ol><li>Item 1</li></ol>");
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_failed_generation_is_reported_inline() {
        let mut provider = MockRecommendationProvider::new();
        provider
            .expect_generate()
            .returning(|_| Err(AppError::ExternalApi("quota exhausted".to_string())));
        provider.expect_name().return_const("mock");

        let result = tokio_test::block_on(generate_recommendations(
            &provider,
            &[],
            "q",
            "No preference",
            "Other",
        ));

        assert_eq!(
            result.text,
            "Error generating recommendations: External API error: quota exhausted"
        );
        assert_eq!(
            result.error.as_deref(),
            Some("External API error: quota exhausted")
        );
    }
}
