//! Categories for grouping transactions, e.g. 'Groceries' or 'Salary'.

mod create;
mod db;
mod domain;
mod list;
mod seed;

pub use create::create_category_endpoint;
pub use db::{create_category, create_category_table, get_all_categories};
pub use domain::{Category, CategoryName, NewCategory};
pub use list::list_categories_endpoint;
pub use seed::{DEFAULT_CATEGORIES, ensure_default_categories};
