//! Row conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};

/// Reads an integer primary or foreign key.
pub(crate) fn get_id(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    row.get::<_, i64>(idx).map(|id| id as u64)
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn get_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a nullable RFC 3339 timestamp column.
pub(crate) fn get_optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads a nullable `YYYY-MM-DD` date column.
pub(crate) fn get_optional_date(row: &Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Reads a text column holding one of the crate's string-backed enums.
pub(crate) fn get_enum<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let value: String = row.get(idx)?;
    value
        .parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Formats an optional date for storage.
pub(crate) fn date_to_sql(date: Option<Date>) -> Option<String> {
    date.map(|d| d.to_string())
}

/// Escapes `%`, `_` and the escape character itself for a `LIKE ... ESCAPE
/// '\'` pattern.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Substring pattern for a case-insensitive `LIKE` match.
pub(crate) fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}
