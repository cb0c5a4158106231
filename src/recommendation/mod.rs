//! Budgeting recommendations derived from the transaction summary.

mod endpoint;
mod rules;

pub use endpoint::{RecommendationsResponse, get_recommendations_endpoint};
pub use rules::{Recommendation, recommend};
