//! GeoJSON loading and writing.
//!
//! Geometry, feature ids and foreign members (including a legacy `crs`) are
//! carried through untouched. Only the property maps are ever rewritten.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use geojson::{Bbox, Feature, FeatureCollection, GeoJson, JsonObject};
use itertools::Itertools;
use log::info;
use serde_json::Value as JsonValue;

use crate::error::PrejoinError;

pub const GEOMETRY_COLUMN: &str = "geometry";

#[derive(Debug, Clone, Default)]
pub struct GeoLayer {
    pub features: Vec<Feature>,
    /// Union of property names across all features, in first-seen order.
    pub columns: Vec<String>,
    pub bbox: Option<Bbox>,
    pub foreign_members: Option<JsonObject>,
}

impl GeoLayer {
    pub fn from_collection(collection: FeatureCollection) -> Self {
        let columns = collect_columns(&collection.features);
        Self {
            features: collection.features,
            columns,
            bbox: collection.bbox,
            foreign_members: collection.foreign_members,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Reading GeoJSON file {path:?}"))?;
        let layer = Self::parse(&text).with_context(|| format!("Parsing GeoJSON file {path:?}"))?;
        info!(
            "Loaded {} feature(s) with {} property column(s) from {:?}",
            layer.features.len(),
            layer.columns.len(),
            path
        );
        Ok(layer)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let geojson = text.parse::<GeoJson>()?;
        let collection = match geojson {
            GeoJson::FeatureCollection(collection) => collection,
            GeoJson::Feature(feature) => FeatureCollection {
                bbox: None,
                features: vec![feature],
                foreign_members: None,
            },
            GeoJson::Geometry(_) => {
                return Err(PrejoinError::UnsupportedGeoJson("a bare Geometry").into());
            }
        };
        Ok(Self::from_collection(collection))
    }

    /// Property columns followed by the geometry column, for diagnostics.
    pub fn column_listing(&self) -> Vec<String> {
        let mut listing = self.columns.clone();
        listing.push(GEOMETRY_COLUMN.to_string());
        listing
    }

    pub fn property<'a>(feature: &'a Feature, name: &str) -> Option<&'a JsonValue> {
        feature.properties.as_ref().and_then(|props| props.get(name))
    }

    /// Writes `features` as a collection that keeps this layer's `bbox` and foreign members.
    pub fn write(&self, path: &Path, features: Vec<Feature>) -> Result<PathBuf> {
        let collection = FeatureCollection {
            bbox: self.bbox.clone(),
            features,
            foreign_members: self.foreign_members.clone(),
        };
        let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &collection)
            .with_context(|| format!("Serializing GeoJSON to {path:?}"))?;
        writer
            .flush()
            .with_context(|| format!("Flushing GeoJSON output {path:?}"))?;
        info!("Wrote {} feature(s) to {:?}", collection.features.len(), path);
        fs::canonicalize(path).with_context(|| format!("Resolving output path {path:?}"))
    }
}

fn collect_columns(features: &[Feature]) -> Vec<String> {
    features
        .iter()
        .filter_map(|feature| feature.properties.as_ref())
        .flat_map(|props| props.keys().cloned())
        .unique()
        .collect()
}

/// Replaces every null property value with an empty string.
pub fn fill_missing(properties: &mut JsonObject) {
    for value in properties.values_mut() {
        if value.is_null() {
            *value = JsonValue::String(String::new());
        }
    }
}
