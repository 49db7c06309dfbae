pub mod advisor;
pub mod budget_filter;
pub mod providers;
pub mod query_builder;
pub mod recommendations;

pub use advisor::search_and_recommend;
