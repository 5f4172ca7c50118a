//! Left join of GeoJSON features with CSV rows on normalized keys.
//!
//! Every feature survives. A feature whose key matches several CSV rows is
//! emitted once per match, in CSV order.

use std::collections::{HashMap, HashSet};

use geojson::{Feature, JsonObject};
use log::{debug, info};
use serde_json::Value as JsonValue;

use crate::{geo::GeoLayer, keys::NormalizedKey, table::CsvTable};

pub const RIGHT_SUFFIX: &str = "_csv";

#[derive(Debug, Clone, Default)]
pub struct JoinOutput {
    pub features: Vec<Feature>,
    /// Output property names contributed by the CSV, in CSV column order.
    pub right_columns: Vec<String>,
    pub matched_features: usize,
    pub unmatched_features: usize,
}

pub fn left_join(
    layer: &GeoLayer,
    left_keys: &[NormalizedKey],
    table: &CsvTable,
    right_keys: &[NormalizedKey],
) -> JoinOutput {
    let lookup = build_right_lookup(right_keys);
    let right_columns = build_output_headers(&layer.columns, &table.headers);
    debug!("CSV columns in output: {:?}", right_columns);

    let mut output = JoinOutput {
        right_columns,
        ..JoinOutput::default()
    };

    for (feature, key) in layer.features.iter().zip(left_keys) {
        let base = base_properties(feature, &layer.columns);
        match lookup.get(key) {
            Some(bucket) => {
                output.matched_features += 1;
                for &row_idx in bucket {
                    let mut properties = base.clone();
                    for (name, cell) in output.right_columns.iter().zip(&table.rows[row_idx]) {
                        properties.insert(name.clone(), cell.to_json());
                    }
                    output.features.push(with_properties(feature, properties));
                }
            }
            None => {
                output.unmatched_features += 1;
                let mut properties = base;
                for name in &output.right_columns {
                    properties.insert(name.clone(), JsonValue::Null);
                }
                output.features.push(with_properties(feature, properties));
            }
        }
    }

    info!(
        "Join complete: {} output feature(s), {} matched, {} without CSV data",
        output.features.len(),
        output.matched_features,
        output.unmatched_features
    );
    output
}

fn build_right_lookup(keys: &[NormalizedKey]) -> HashMap<&NormalizedKey, Vec<usize>> {
    let mut map: HashMap<&NormalizedKey, Vec<usize>> = HashMap::new();
    for (row_idx, key) in keys.iter().enumerate() {
        if key.is_absent() {
            continue;
        }
        map.entry(key).or_default().push(row_idx);
    }
    map
}

/// Names the CSV columns take in the output, suffixing any that clash with a geo
/// column or with an earlier CSV column.
pub fn build_output_headers(left_columns: &[String], right_headers: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = left_columns.iter().cloned().collect();
    let mut names = Vec::with_capacity(right_headers.len());

    for name in right_headers {
        let mut candidate = name.clone();
        if seen.contains(&candidate) {
            let base = format!("{name}{RIGHT_SUFFIX}");
            candidate = base.clone();
            let mut counter = 2usize;
            while seen.contains(&candidate) {
                candidate = format!("{base}_{counter}");
                counter += 1;
            }
        }
        seen.insert(candidate.clone());
        names.push(candidate);
    }

    names
}

fn base_properties(feature: &Feature, columns: &[String]) -> JsonObject {
    let mut properties = JsonObject::with_capacity(columns.len());
    for column in columns {
        let value = GeoLayer::property(feature, column)
            .cloned()
            .unwrap_or(JsonValue::Null);
        properties.insert(column.clone(), value);
    }
    properties
}

fn with_properties(feature: &Feature, properties: JsonObject) -> Feature {
    Feature {
        bbox: feature.bbox.clone(),
        geometry: feature.geometry.clone(),
        id: feature.id.clone(),
        properties: Some(properties),
        foreign_members: feature.foreign_members.clone(),
    }
}
