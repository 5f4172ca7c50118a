#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes raw bytes, for encodings other than UTF-8.
    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp bytes");
        path
    }

    pub fn exists(&self, name: &str) -> bool {
        self.temp_dir.path().join(name).exists()
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read workspace file")
    }

    pub fn read_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.read(name)).expect("parse workspace json")
    }

    /// The binary, running with this workspace as its working directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("geo-prejoin").expect("binary exists");
        cmd.current_dir(self.path()).env("RUST_LOG", "off");
        cmd
    }
}

/// A unit square polygon offset by `x`.
pub fn square(x: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0], [x, 0.0]]]
    })
}

/// A feature collection with one square per `(property name, value)` entry.
pub fn collection(key: &str, names: &[&str]) -> Value {
    let features = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            json!({
                "type": "Feature",
                "geometry": square(idx as f64),
                "properties": { key: name }
            })
        })
        .collect::<Vec<_>>();
    json!({ "type": "FeatureCollection", "features": features })
}

pub fn features(value: &Value) -> &Vec<Value> {
    value["features"].as_array().expect("features array")
}

/// Finds the first output feature whose `key` property equals `name`.
pub fn feature_named<'a>(value: &'a Value, key: &str, name: &str) -> &'a Value {
    features(value)
        .iter()
        .find(|feature| feature["properties"][key] == name)
        .unwrap_or_else(|| panic!("feature {name} missing"))
}
