//! Column conversion helpers shared by the query modules.

use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{types::Type, Row};

use crate::{
    error::Result,
    ids::{format_timestamp, parse_timestamp},
    models::Metadata,
};

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

/// Reads a text column holding a value with a string `FromStr` error.
pub(super) fn parse_enum<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| conversion_error(idx, e))
}

/// Reads a nullable enum column.
pub(super) fn parse_optional_enum<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    row.get::<_, Option<String>>(idx)?
        .map(|raw| raw.parse::<T>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

/// Reads a timestamp column written by [`timestamp_text`].
pub(super) fn parse_time(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a JSON array of strings.
pub(super) fn parse_id_list(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a nullable JSON object column.
pub(super) fn parse_metadata(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Metadata>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Text form stored for timestamps.
pub(super) fn timestamp_text(ts: &Timestamp) -> String {
    format_timestamp(ts)
}

/// Text form stored for id lists.
pub(super) fn id_list_text(ids: &[String]) -> Result<String> {
    Ok(serde_json::to_string(ids)?)
}

/// Text form stored for metadata.
pub(super) fn metadata_text(metadata: Option<&Metadata>) -> Result<Option<String>> {
    Ok(metadata.map(serde_json::to_string).transpose()?)
}
