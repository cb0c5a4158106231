//! Conversion between timestamps and the text stored in the database.

use serde::{Deserialize, Deserializer, de::Error};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

/// Timestamps are stored as fixed-width UTC RFC 3339 text so that the text
/// sorts in chronological order.
const STORED_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// Format `timestamp` in UTC for storage.
pub fn to_stored_text(timestamp: OffsetDateTime) -> String {
    timestamp
        .to_offset(UtcOffset::UTC)
        .format(STORED_FORMAT)
        // The format only fails for years outside 0..=9999.
        .unwrap_or_else(|_| timestamp.unix_timestamp().to_string())
}

/// Parse stored timestamp text, returning `None` if the text is not a valid
/// RFC 3339 timestamp.
pub fn from_stored_text(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339)
        .ok()
        .map(|timestamp| timestamp.to_offset(UtcOffset::UTC))
}

/// A date and time without an offset, e.g. `2024-05-31T09:00:00`.
const NAIVE_DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

/// A calendar date, e.g. `2024-05-31`.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a timestamp sent by a client.
///
/// Accepts RFC 3339, a date and time without an offset (taken as UTC) or a
/// date on its own (midnight UTC). The result is in UTC.
pub fn parse_request_date(text: &str) -> Option<OffsetDateTime> {
    let timestamp = OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| {
            PrimitiveDateTime::parse(text, NAIVE_DATE_TIME_FORMAT)
                .map(|date_time| date_time.assume_utc())
        })
        .or_else(|_| Date::parse(text, DATE_FORMAT).map(|date| date.midnight().assume_utc()))
        .ok()?;

    Some(timestamp.to_offset(UtcOffset::UTC))
}

/// Deserialize an optional client timestamp with [parse_request_date].
pub fn deserialize_request_date<'de, D>(
    deserializer: D,
) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => parse_request_date(&text).map(Some).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid date \"{text}\", expected an ISO 8601 date or date and time"
            ))
        }),
        None => Ok(None),
    }
}
