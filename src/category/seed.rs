//! The default categories for a new store.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    category::{CategoryName, NewCategory, create_category, db::count_categories},
};

/// The categories added to an empty store as `(name, icon, color)`.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 5] = [
    ("Groceries", "ShoppingCart", "emerald"),
    ("Rent", "Home", "violet"),
    ("Transport", "Bus", "sky"),
    ("Dining", "Utensils", "rose"),
    ("Salary", "Banknote", "amber"),
];

/// Add the [DEFAULT_CATEGORIES] if there are no categories in the store.
///
/// The check and the inserts happen in a single exclusive transaction, so
/// calling this function any number of times adds the defaults at most once.
///
/// Returns `true` if the defaults were added.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn ensure_default_categories(connection: &Connection) -> Result<bool, Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    if count_categories(&transaction)? > 0 {
        return Ok(false);
    }

    for (name, icon, color) in DEFAULT_CATEGORIES {
        create_category(
            NewCategory {
                name: CategoryName::new_unchecked(name),
                icon: Some(icon.to_owned()),
                color: Some(color.to_owned()),
            },
            &transaction,
        )?;
    }

    transaction.commit()?;

    tracing::info!("Added {} default categories", DEFAULT_CATEGORIES.len());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::category::{
        CategoryName, NewCategory, create_category, create_category_table, get_all_categories,
    };

    use super::{DEFAULT_CATEGORIES, ensure_default_categories};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn seeds_defaults_into_empty_store() {
        let connection = get_test_db_connection();

        let seeded = ensure_default_categories(&connection).unwrap();

        assert!(seeded);
        let categories = get_all_categories(&connection).unwrap();
        let got: Vec<(&str, Option<&str>, Option<&str>)> = categories
            .iter()
            .map(|category| {
                (
                    category.name.as_ref(),
                    category.icon.as_deref(),
                    category.color.as_deref(),
                )
            })
            .collect();
        let want: Vec<(&str, Option<&str>, Option<&str>)> = DEFAULT_CATEGORIES
            .iter()
            .map(|&(name, icon, color)| (name, Some(icon), Some(color)))
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn seeding_twice_adds_defaults_once() {
        let connection = get_test_db_connection();

        ensure_default_categories(&connection).unwrap();
        let seeded_again = ensure_default_categories(&connection).unwrap();

        assert!(!seeded_again);
        assert_eq!(get_all_categories(&connection).unwrap().len(), 5);
    }

    #[test]
    fn does_not_seed_store_with_existing_categories() {
        let connection = get_test_db_connection();
        create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Pets"),
                icon: None,
                color: None,
            },
            &connection,
        )
        .unwrap();

        let seeded = ensure_default_categories(&connection).unwrap();

        assert!(!seeded);
        assert_eq!(get_all_categories(&connection).unwrap().len(), 1);
    }
}
