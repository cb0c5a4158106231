//! The API endpoints URIs.

/// The liveness check.
pub const ROOT: &str = "/";
/// Diagnostics for the database connection.
pub const DIAGNOSTICS: &str = "/test";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/categories";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the summary of all transactions.
pub const SUMMARY: &str = "/summary";
/// The route for budgeting recommendations.
pub const RECOMMENDATIONS: &str = "/recommendations";
