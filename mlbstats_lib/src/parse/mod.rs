//! Flatteners from wire structs to [`Table`](crate::table::Table)s.
//!
//! Each function takes an already-deserialized response and emits rows in a
//! fixed column order. Missing sub-objects become placeholders rather than
//! errors.

pub mod person;
pub mod roster;
pub mod schedule;
pub mod stats;
pub mod team;
pub mod transactions;

use serde_json::{Map, Value};

use mlbstats_api::types::{EntityRef, Position, Team};

use crate::reference::PLACEHOLDER;
use crate::statdict::rename_key;

pub(crate) type Record = Map<String, Value>;

/// Stat line with its keys passed through the rename dictionary.
pub fn renamed_stat(stat: &Map<String, Value>) -> Record {
    stat.iter()
        .map(|(k, v)| (rename_key(k).to_string(), v.clone()))
        .collect()
}

pub(crate) fn text(v: Option<&str>) -> Value {
    v.map_or(Value::Null, |s| Value::String(s.to_string()))
}

pub(crate) fn text_or(v: Option<&str>, default: &str) -> Value {
    Value::String(v.unwrap_or(default).to_string())
}

pub(crate) fn int(v: Option<i64>) -> Value {
    v.map_or(Value::Null, Value::from)
}

pub(crate) fn flag(v: Option<bool>) -> Value {
    Value::Bool(v.unwrap_or(false))
}

pub(crate) fn placeholder() -> Value {
    Value::String(PLACEHOLDER.to_string())
}

/// `"W-L"`, with missing counts as 0.
pub(crate) fn win_loss(wins: Option<i64>, losses: Option<i64>) -> String {
    format!("{}-{}", wins.unwrap_or(0), losses.unwrap_or(0))
}

pub(crate) fn team_id(team: Option<&Team>) -> Option<i64> {
    team.and_then(|t| t.id)
}

pub(crate) fn team_name(team: Option<&Team>) -> Option<&str> {
    team.and_then(|t| t.name.as_deref())
}

pub(crate) fn entity_id(e: Option<&EntityRef>) -> Option<i64> {
    e.and_then(|e| e.id)
}

pub(crate) fn entity_name(e: Option<&EntityRef>) -> Option<&str> {
    e.and_then(|e| e.name.as_deref())
}

pub(crate) fn pos_abbreviation(pos: Option<&Position>) -> Option<&str> {
    pos.and_then(|p| p.abbreviation.as_deref())
}

/// Looks up `/`-separated `path` in a JSON value, treating null as missing.
pub(crate) fn at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    value.pointer(path).filter(|v| !v.is_null())
}

pub(crate) fn at_or_null(value: &Value, path: &str) -> Value {
    at(value, path).cloned().unwrap_or(Value::Null)
}

pub(crate) fn at_or_dash(value: &Value, path: &str) -> Value {
    at(value, path).cloned().unwrap_or_else(placeholder)
}
