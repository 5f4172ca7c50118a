use serde_json::{Number, Value as JsonValue};

/// Cell tokens that load as missing rather than text.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Wraps a raw CSV field, mapping empty and missing-value tokens to [`CellValue::Missing`].
    pub fn from_raw(raw: &str) -> Self {
        if is_missing_token(raw) {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Renders the cell for CSV output; missing cells become empty strings.
    pub fn as_display(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_number(*value),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            CellValue::Missing => JsonValue::Null,
            CellValue::Text(text) => JsonValue::String(text.clone()),
            CellValue::Number(value) => Number::from_f64(*value)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        }
    }
}

pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

/// Shortest round-trip form, keeping a trailing `.0` on integral values.
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

/// Text form of a GeoJSON property value, or `None` for null.
pub fn json_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_raw_treats_na_tokens_as_missing() {
        assert_eq!(CellValue::from_raw(""), CellValue::Missing);
        assert_eq!(CellValue::from_raw("N/A"), CellValue::Missing);
        assert_eq!(CellValue::from_raw("null"), CellValue::Missing);
        assert_eq!(
            CellValue::from_raw(" "),
            CellValue::Text(" ".to_string()),
            "whitespace is not a missing token"
        );
        assert_eq!(
            CellValue::from_raw("Toronto C01"),
            CellValue::Text("Toronto C01".to_string())
        );
    }

    #[test]
    fn format_number_keeps_fractional_marker() {
        assert_eq!(format_number(1200.0), "1200.0");
        assert_eq!(format_number(1234.5), "1234.5");
        assert_eq!(format_number(-0.25), "-0.25");
    }

    #[test]
    fn to_json_maps_variants() {
        assert_eq!(CellValue::Missing.to_json(), JsonValue::Null);
        assert_eq!(CellValue::Text("x".into()).to_json(), json!("x"));
        assert_eq!(CellValue::Number(12.0).to_json(), json!(12.0));
    }

    #[test]
    fn json_to_text_stringifies_scalars() {
        assert_eq!(json_to_text(&json!(null)), None);
        assert_eq!(json_to_text(&json!("Etobicoke")).as_deref(), Some("Etobicoke"));
        assert_eq!(json_to_text(&json!(7)).as_deref(), Some("7"));
        assert_eq!(json_to_text(&json!(7.5)).as_deref(), Some("7.5"));
        assert_eq!(json_to_text(&json!(true)).as_deref(), Some("true"));
    }
}
