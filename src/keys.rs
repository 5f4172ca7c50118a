//! Join-key detection and normalization.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::{
    data::{CellValue, format_number, json_to_text},
    transform::string_ops::{collapse_whitespace, trim, uppercase},
};

/// Column names tried, in order, when no explicit join key is given.
pub const KEY_CANDIDATES: &[&str] = &["District", "TRREB Area", "Name", "Region", "F1", "Area"];

/// Canonical join value. `None` stands for a null key and never matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(Option<String>);

impl NormalizedKey {
    pub const ABSENT: NormalizedKey = NormalizedKey(None);

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

/// Returns the first column that case-insensitively equals a candidate.
pub fn find_key<'a, S>(columns: &'a [S], candidates: &[&str]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let lowered: HashMap<String, &str> = columns
        .iter()
        .map(|column| (column.as_ref().to_lowercase(), column.as_ref()))
        .collect();
    candidates
        .iter()
        .find_map(|candidate| lowered.get(&candidate.to_lowercase()).copied())
}

/// Uses `explicit` when given, otherwise auto-detects.
///
/// An explicit name must exist verbatim; when it does not, it is returned as the error.
pub fn resolve_key<'a, S>(
    explicit: Option<&'a str>,
    columns: &'a [S],
    candidates: &[&str],
) -> Result<Option<&'a str>, &'a str>
where
    S: AsRef<str>,
{
    match explicit {
        Some(name) if columns.iter().any(|column| column.as_ref() == name) => Ok(Some(name)),
        Some(name) => Err(name),
        None => Ok(find_key(columns, candidates)),
    }
}

/// Trims, collapses inner whitespace runs to one space and uppercases.
pub fn normalize_key(raw: Option<&str>) -> NormalizedKey {
    let Some(raw) = raw else {
        return NormalizedKey::ABSENT;
    };
    let trimmed = trim(raw);
    let collapsed = collapse_whitespace(&trimmed);
    NormalizedKey(Some(uppercase(&collapsed).into_owned()))
}

pub fn normalize_json_key(value: Option<&JsonValue>) -> NormalizedKey {
    normalize_key(value.and_then(json_to_text).as_deref())
}

pub fn normalize_cell_key(cell: &CellValue) -> NormalizedKey {
    match cell {
        CellValue::Missing => NormalizedKey::ABSENT,
        CellValue::Text(text) => normalize_key(Some(text)),
        CellValue::Number(value) => normalize_key(Some(&format_number(*value))),
    }
}
