//! In-memory CSV table with every cell loaded as text.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{data::CellValue, error::PrejoinError, io_utils, printable_delimiter};

static MISSING_CELL: CellValue = CellValue::Missing;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Reads `path` fully; short rows are padded with missing cells.
    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        debug!(
            "Reading CSV {:?} with delimiter '{}' and encoding {}",
            path,
            printable_delimiter(delimiter),
            encoding.name()
        );
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)
            .with_context(|| format!("Reading headers from {path:?}"))?;
        let mut rows = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            let row_number = idx + 2;
            let record = record.with_context(|| format!("Reading row {row_number}"))?;
            let decoded = io_utils::decode_record(&record, encoding)
                .with_context(|| format!("Decoding row {row_number}"))?;
            if decoded.len() > headers.len() {
                return Err(PrejoinError::RaggedRow {
                    row: row_number,
                    expected: headers.len(),
                    found: decoded.len(),
                }
                .into());
            }
            let mut cells = decoded
                .iter()
                .map(|raw| CellValue::from_raw(raw))
                .collect::<Vec<_>>();
            cells.resize(headers.len(), CellValue::Missing);
            rows.push(cells);
        }
        info!(
            "Loaded {} row(s) across {} column(s) from {:?}",
            rows.len(),
            headers.len(),
            path
        );
        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn column(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).unwrap_or(&MISSING_CELL))
    }

    /// Replaces every cell outside `skip` with `f(cell)`.
    pub fn map_cells<F>(&mut self, skip: &[usize], f: F)
    where
        F: Fn(&CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            for (idx, cell) in row.iter_mut().enumerate() {
                if skip.contains(&idx) {
                    continue;
                }
                *cell = f(cell);
            }
        }
    }
}
