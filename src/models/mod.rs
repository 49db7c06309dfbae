pub mod budget;
pub mod product;
pub mod search;

pub use budget::{BudgetRange, NO_PREFERENCE};
pub use product::Product;
pub use search::{SearchRequest, SearchResponse, NO_CATEGORY};
