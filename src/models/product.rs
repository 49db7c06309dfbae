use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A product listing as returned by the shopping search API.
///
/// Upstream payloads are schema-less, so every known field is optional and
/// tolerant of the shapes seen in practice (prices as strings or numbers,
/// ratings as numbers or numeric strings). Fields we don't model are kept in
/// `extra` and serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,

    #[serde(
        rename = "reviewsCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reviews_count: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Numeric rating, if the upstream value is a number or a numeric string
    pub fn rating_value(&self) -> Option<f64> {
        let rating = match self.rating.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        rating.filter(|r| r.is_finite())
    }

    /// Review count rendered for display, falling back to the API's `ratingCount`
    pub fn reviews_display(&self) -> Option<String> {
        self.reviews_count
            .as_ref()
            .or_else(|| self.extra.get("ratingCount"))
            .and_then(display_value)
    }

    pub fn rating_display(&self) -> Option<String> {
        self.rating.as_ref().and_then(display_value)
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Accepts a JSON string or number; anything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
