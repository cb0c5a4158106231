//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// Serializes a [DatabaseId] as a JSON string, e.g. `42` becomes `"42"`.
///
/// Use with `#[serde(with = "crate::database_id::as_string")]`.
pub mod as_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::DatabaseId;

    pub fn serialize<S>(id: &DatabaseId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DatabaseId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        text.parse()
            .map_err(|_| D::Error::custom(format!("invalid ID \"{text}\"")))
    }
}
