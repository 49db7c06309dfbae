use crate::models::NO_CATEGORY;

/// Composes the string sent to the shopping search API.
///
/// Order is fixed: `[category] query [brand]`. Empty values and the
/// "Other" category sentinel are skipped.
pub fn build_search_query(query: &str, category: &str, brand: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(3);

    let category = category.trim();
    if !category.is_empty() && category != NO_CATEGORY {
        parts.push(category);
    }
    parts.push(query);
    if let Some(brand) = brand.map(str::trim).filter(|b| !b.is_empty()) {
        parts.push(brand);
    }

    parts.join(" ")
}

/// Free-text description of what the user wants, handed to the language model
pub fn build_preferences_text(query: &str, features: &[String], brand: Option<&str>) -> String {
    let mut text = query.to_string();

    if !features.is_empty() {
        text.push_str(". Important features: ");
        text.push_str(&features.join(", "));
    }
    if let Some(brand) = brand.map(str::trim).filter(|b| !b.is_empty()) {
        text.push_str(". Preferred brand: ");
        text.push_str(brand);
    }

    text
}
