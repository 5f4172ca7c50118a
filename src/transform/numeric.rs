//! Best-effort cleaning of formatted numeric text such as `"$1,234.50"` or `"12%"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::CellValue;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.+\-eE]").expect("valid numeric residue pattern"));

const FORMATTING_CHARS: &[char] = &['$', '%', ',', ' '];

/// Strips currency, percent and thousands formatting and parses what remains.
///
/// Returns `None` for missing or blank input and whenever the residue does not
/// parse as a float. Never fails.
pub fn clean_numeric(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let unformatted = trimmed.replace(FORMATTING_CHARS, "");
    let residue = NON_NUMERIC.replace_all(&unformatted, "");
    residue.parse::<f64>().ok()
}

/// Cleans a single table cell in place of its text.
pub fn clean_cell(cell: &CellValue) -> CellValue {
    match cell.as_text() {
        Some(text) => clean_numeric(Some(text))
            .map(CellValue::Number)
            .unwrap_or(CellValue::Missing),
        None => cell.clone(),
    }
}
