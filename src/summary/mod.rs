//! Summary statistics over all recorded transactions.

mod aggregation;
mod endpoint;

pub(crate) use aggregation::round_to;
pub use aggregation::{CategoryTotal, MonthlyTotals, Summary, UNKNOWN_MONTH, summarize};
pub(crate) use endpoint::load_summary;
pub use endpoint::get_summary_endpoint;
