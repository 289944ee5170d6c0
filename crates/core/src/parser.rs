//! Payload parser: untrusted feed bytes → [`LeaderboardSnapshot`].
//!
//! Only two conditions abort a snapshot: bytes that are not JSON at all, and a
//! document without a `leaderboard` array. Everything below that level degrades
//! per field: a bad `username` becomes `"unknown"`, a bad `points` becomes `0`,
//! and the entry keeps its position.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::types::{Entry, LeaderboardSnapshot, UNKNOWN_USERNAME};

/// Name of the required top-level array.
pub const LEADERBOARD_FIELD: &str = "leaderboard";
/// Optional top-level month index.
pub const MONTH_FIELD: &str = "month";
pub const USERNAME_FIELD: &str = "username";
pub const POINTS_FIELD: &str = "points";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload has no `{}` array", LEADERBOARD_FIELD)]
    MissingField,
}

/// Why a single entry field fell back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFault {
    Missing,
    WrongType,
}

/// Parse a raw feed body.
pub fn parse(raw: &[u8]) -> Result<LeaderboardSnapshot, ParseError> {
    let doc: Value = serde_json::from_slice(raw)?;

    let Some(items) = doc.get(LEADERBOARD_FIELD).and_then(Value::as_array) else {
        return Err(ParseError::MissingField);
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(index, item))
        .collect();

    Ok(LeaderboardSnapshot {
        entries,
        month: read_month(&doc),
    })
}

/// Build one entry. Never fails; non-object items become default entries.
pub fn parse_entry(index: usize, item: &Value) -> Entry {
    let username = read_username(item).unwrap_or_else(|fault| {
        debug!(index, ?fault, "username fell back to default");
        UNKNOWN_USERNAME.to_string()
    });
    let points = read_points(item).unwrap_or_else(|fault| {
        debug!(index, ?fault, "points fell back to default");
        0
    });
    Entry { username, points }
}

pub fn read_username(item: &Value) -> Result<String, FieldFault> {
    match item.get(USERNAME_FIELD) {
        None => Err(FieldFault::Missing),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(FieldFault::WrongType),
    }
}

/// Integers that fit `i64`. Floats and oversized unsigned values are rejected.
pub fn read_points(item: &Value) -> Result<i64, FieldFault> {
    match item.get(POINTS_FIELD) {
        None => Err(FieldFault::Missing),
        Some(v) => v.as_i64().ok_or(FieldFault::WrongType),
    }
}

/// `Some` only for an integer in `0..=11`.
fn read_month(doc: &Value) -> Option<u8> {
    doc.get(MONTH_FIELD)
        .and_then(Value::as_i64)
        .filter(|m| (0..=11).contains(m))
        .map(|m| m as u8)
}
