use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_GEOJSON: &str = "torontoHugo.geojson";
pub const DEFAULT_CSV: &str = "TRREBxLENDSTRAIT-202507.csv";
pub const DEFAULT_OUTPUT: &str = "merged.geojson";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Join CSV columns into a GeoJSON by district/area name",
    long_about = None
)]
pub struct Cli {
    /// Input GeoJSON path
    #[arg(short = 'g', long = "geojson", default_value = DEFAULT_GEOJSON)]
    pub geojson: PathBuf,
    /// Input CSV path (all columns will be merged)
    #[arg(short = 'c', long = "csv", default_value = DEFAULT_CSV)]
    pub csv: PathBuf,
    /// Output GeoJSON path
    #[arg(short = 'o', long = "out", default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,
    /// Explicit join key in GeoJSON (overrides auto-detect)
    #[arg(long = "left-key")]
    pub left_key: Option<String>,
    /// Explicit join key in CSV (overrides auto-detect)
    #[arg(long = "right-key")]
    pub right_key: Option<String>,
    /// Do NOT attempt numeric cleaning
    #[arg(long = "no-clean")]
    pub no_clean: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the CSV file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
