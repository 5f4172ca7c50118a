//! Unmatched-record diagnostics for both sides of the join.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::warn;

use crate::{
    data::json_to_text, geo::GeoLayer, io_utils, keys::NormalizedKey, table::CsvTable,
};

pub const UNMATCHED_IN_CSV: &str = "unmatched_in_csv.csv";
pub const UNMATCHED_IN_GEOJSON: &str = "unmatched_in_geojson.csv";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub csv_headers: Vec<String>,
    /// CSV rows with no matching feature, rendered as written.
    pub csv_only: Vec<Vec<String>>,
    pub left_key: String,
    /// Original left-key values of features with no matching CSV row.
    pub geo_only: Vec<String>,
}

impl Diagnostics {
    pub fn compute(
        layer: &GeoLayer,
        left_key: &str,
        left_keys: &[NormalizedKey],
        table: &CsvTable,
        right_keys: &[NormalizedKey],
    ) -> Self {
        let geo_set: HashSet<&NormalizedKey> =
            left_keys.iter().filter(|key| !key.is_absent()).collect();
        let csv_set: HashSet<&NormalizedKey> =
            right_keys.iter().filter(|key| !key.is_absent()).collect();

        let csv_only = table
            .rows
            .iter()
            .zip(right_keys)
            .filter(|(_, key)| !geo_set.contains(key))
            .map(|(row, _)| row.iter().map(|cell| cell.as_display()).collect())
            .collect();

        let geo_only = layer
            .features
            .iter()
            .zip(left_keys)
            .filter(|(_, key)| !csv_set.contains(key))
            .map(|(feature, _)| {
                GeoLayer::property(feature, left_key)
                    .and_then(json_to_text)
                    .unwrap_or_default()
            })
            .collect();

        Self {
            csv_headers: table.headers.clone(),
            csv_only,
            left_key: left_key.to_string(),
            geo_only,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.csv_only.is_empty() && self.geo_only.is_empty()
    }

    /// Writes the non-empty side files into `dir` and returns their paths.
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        if !self.csv_only.is_empty() {
            let path = dir.join(UNMATCHED_IN_CSV);
            write_rows(&path, &self.csv_headers, &self.csv_only)?;
            warn!(
                "{} CSV row(s) did not match a polygon; see {:?}",
                self.csv_only.len(),
                path
            );
            println!(
                "⚠️  {} CSV names didn't match a polygon. See {}",
                self.csv_only.len(),
                UNMATCHED_IN_CSV
            );
            written.push(path);
        }

        if !self.geo_only.is_empty() {
            let path = dir.join(UNMATCHED_IN_GEOJSON);
            let rows = self
                .geo_only
                .iter()
                .map(|value| vec![value.clone()])
                .collect::<Vec<_>>();
            write_rows(&path, std::slice::from_ref(&self.left_key), &rows)?;
            warn!(
                "{} polygon(s) did not find CSV data; see {:?}",
                self.geo_only.len(),
                path
            );
            println!(
                "⚠️  {} polygons didn't find CSV data. See {}",
                self.geo_only.len(),
                UNMATCHED_IN_GEOJSON
            );
            written.push(path);
        }

        Ok(written)
    }
}

fn write_rows(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path)?;
    writer
        .write_record(headers)
        .with_context(|| format!("Writing headers to {path:?}"))?;
    for (idx, row) in rows.iter().enumerate() {
        writer
            .write_record(row)
            .with_context(|| format!("Writing row {} to {path:?}", idx + 2))?;
    }
    writer
        .flush()
        .with_context(|| format!("Flushing {path:?}"))?;
    Ok(())
}
