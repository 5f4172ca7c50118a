//! End-to-end pipeline: load, normalize, join, report, write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geojson::Feature;
use log::{debug, info};

use crate::{
    cli::Cli,
    columns::{self, RENAME_RULES},
    error::{PrejoinError, Side},
    geo::{self, GeoLayer},
    io_utils,
    join::{self, JoinOutput},
    keys::{self, KEY_CANDIDATES, NormalizedKey},
    report::Diagnostics,
    table::CsvTable,
    transform::numeric,
};

#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub left_key: Option<String>,
    pub right_key: Option<String>,
    pub clean: bool,
}

#[derive(Debug)]
pub struct MergeResult {
    pub features: Vec<Feature>,
    pub left_key: String,
    pub right_key: String,
    pub diagnostics: Diagnostics,
}

pub fn execute(args: &Cli) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.csv, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;

    let layer = GeoLayer::load(&args.geojson)?;
    let table = CsvTable::load(&args.csv, delimiter, encoding)
        .with_context(|| format!("Loading CSV {:?}", args.csv))?;

    let options = MergeOptions {
        left_key: args.left_key.clone(),
        right_key: args.right_key.clone(),
        clean: !args.no_clean,
    };
    debug!("Merge options: {:?}", options);

    let result = merge(&layer, table, &options)?;
    result.diagnostics.write(Path::new("."))?;

    let written = write_output(&layer, result.features, &args.out)?;
    println!("✅ Wrote {}", written.display());
    Ok(())
}

/// Runs the in-memory part of the pipeline on already loaded inputs.
pub fn merge(layer: &GeoLayer, mut table: CsvTable, options: &MergeOptions) -> Result<MergeResult> {
    if let Some(rename) = columns::label_index_column(&mut table.headers) {
        debug!("Labelled index column '{}' as '{}'", rename.from, rename.to);
    }
    let applied = columns::apply_fuzzy_renames(&mut table.headers, RENAME_RULES);
    if !applied.is_empty() {
        println!("Renamed CSV columns -> {}", columns::describe_renames(&applied));
    }

    let (left_key, right_key) = resolve_keys(layer, &table, options)?;
    println!("Joining on -> GeoJSON: '{left_key}'  CSV: '{right_key}'");

    let left_keys: Vec<NormalizedKey> = layer
        .features
        .iter()
        .map(|feature| keys::normalize_json_key(GeoLayer::property(feature, &left_key)))
        .collect();
    let right_idx = table
        .column_index(&right_key)
        .context("Resolved CSV join key is missing from the table")?;
    let right_keys: Vec<NormalizedKey> =
        table.column(right_idx).map(keys::normalize_cell_key).collect();

    if options.clean {
        table.map_cells(&[right_idx], numeric::clean_cell);
        debug!(
            "Cleaned numeric values in {} column(s)",
            table.headers.len().saturating_sub(1)
        );
    }

    let JoinOutput { mut features, .. } = join::left_join(layer, &left_keys, &table, &right_keys);
    let diagnostics = Diagnostics::compute(layer, &left_key, &left_keys, &table, &right_keys);

    for feature in &mut features {
        if let Some(properties) = feature.properties.as_mut() {
            geo::fill_missing(properties);
        }
    }

    Ok(MergeResult {
        features,
        left_key,
        right_key,
        diagnostics,
    })
}

fn resolve_keys(
    layer: &GeoLayer,
    table: &CsvTable,
    options: &MergeOptions,
) -> Result<(String, String), PrejoinError> {
    let missing = |side: Side, column: &str| PrejoinError::MissingKeyColumn {
        side,
        column: column.to_string(),
        geo_columns: layer.column_listing(),
        csv_columns: table.headers.clone(),
    };
    let left = keys::resolve_key(options.left_key.as_deref(), &layer.columns, KEY_CANDIDATES)
        .map_err(|column| missing(Side::GeoJson, column))?;
    let right = keys::resolve_key(options.right_key.as_deref(), &table.headers, KEY_CANDIDATES)
        .map_err(|column| missing(Side::Csv, column))?;
    match (left, right) {
        (Some(left), Some(right)) => Ok((left.to_string(), right.to_string())),
        _ => Err(PrejoinError::JoinKeyNotFound {
            geo_columns: layer.column_listing(),
            csv_columns: table.headers.clone(),
        }),
    }
}

fn write_output(layer: &GeoLayer, features: Vec<Feature>, out: &Path) -> Result<PathBuf> {
    info!("Writing {} merged feature(s) to {:?}", features.len(), out);
    layer.write(out, features)
}
