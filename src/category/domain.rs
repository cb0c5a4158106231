//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for grouping transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID assigned by the store.
    #[serde(with = "crate::database_id::as_string")]
    pub id: DatabaseId,
    /// The unique name of the category.
    pub name: CategoryName,
    /// The name of an icon for displaying the category, e.g. "ShoppingCart".
    pub icon: Option<String>,
    /// A colour for displaying the category, e.g. "emerald".
    pub color: Option<String>,
}

/// The data for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// The unique name of the category.
    pub name: CategoryName,
    /// The name of an icon for displaying the category.
    #[serde(default)]
    pub icon: Option<String>,
    /// A colour for displaying the category.
    #[serde(default)]
    pub color: Option<String>,
}


#[cfg(test)]
mod category_serialization_tests {
    use serde_json::json;

    use crate::category::{Category, CategoryName, NewCategory};

    #[test]
    fn category_id_is_rendered_as_string() {
        let category = Category {
            id: 3,
            name: CategoryName::new_unchecked("Dining"),
            icon: Some("Utensils".to_owned()),
            color: None,
        };

        let value = serde_json::to_value(&category).unwrap();

        assert_eq!(
            value,
            json!({ "id": "3", "name": "Dining", "icon": "Utensils", "color": null })
        );
    }

    #[test]
    fn new_category_icon_and_color_are_optional() {
        let new_category: NewCategory = serde_json::from_value(json!({ "name": "Pets" })).unwrap();

        assert_eq!(
            new_category,
            NewCategory {
                name: CategoryName::new_unchecked("Pets"),
                icon: None,
                color: None,
            }
        );
    }
}
