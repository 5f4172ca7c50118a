//! Typed failures raised by the join pipeline.
//!
//! Anything not listed here (file access, malformed JSON, CSV syntax) travels
//! as an [`anyhow::Error`] with context naming the file or row involved.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    GeoJson,
    Csv,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::GeoJson => f.write_str("GeoJSON"),
            Side::Csv => f.write_str("CSV"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PrejoinError {
    #[error(
        "Could not find join keys.\nGeoJSON columns: {geo_columns:?}\nCSV columns:     {csv_columns:?}\nTip: pass --left-key and/or --right-key explicitly."
    )]
    JoinKeyNotFound {
        geo_columns: Vec<String>,
        csv_columns: Vec<String>,
    },
    #[error(
        "{side} join key '{column}' does not exist.\nGeoJSON columns: {geo_columns:?}\nCSV columns:     {csv_columns:?}"
    )]
    MissingKeyColumn {
        side: Side,
        column: String,
        geo_columns: Vec<String>,
        csv_columns: Vec<String>,
    },
    #[error("Expected a GeoJSON FeatureCollection or Feature, found {0}")]
    UnsupportedGeoJson(&'static str),
    #[error("CSV row {row} has {found} field(s) but the header declares {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
