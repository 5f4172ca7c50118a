//! I/O utilities for CSV reading, writing, encoding, and delimiter resolution.
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8. A
//!   leading byte-order mark on the header row is dropped during decoding.
//! - **Reader/writer construction**: `open_csv_reader_from_path` and
//!   `open_csv_writer` for the diagnostic side files.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<BufReader<File>>> {
    let reader =
        BufReader::new(File::open(path).with_context(|| format!("Opening input file {path:?}"))?);
    Ok(open_csv_reader(reader, delimiter))
}

pub fn open_csv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(DEFAULT_CSV_DELIMITER)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    Ok(builder.from_writer(BufWriter::new(file)))
}

/// Decodes a data field; byte-order marks are not interpreted.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

/// Decodes the header record, dropping a byte-order mark of `encoding` from the first field.
pub fn decode_headers(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            if idx > 0 {
                return decode_bytes(field, encoding);
            }
            let (text, had_errors) = encoding.decode_with_bom_removal(field);
            if had_errors {
                Err(anyhow!(
                    "Failed to decode header with encoding {}",
                    encoding.name()
                ))
            } else {
                Ok(text.into_owned())
            }
        })
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_headers(&headers, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        assert_eq!(
            resolve_input_delimiter(&PathBuf::from("stats.TSV"), None),
            DEFAULT_TSV_DELIMITER
        );
        assert_eq!(
            resolve_input_delimiter(&PathBuf::from("stats.csv"), None),
            DEFAULT_CSV_DELIMITER
        );
        assert_eq!(
            resolve_input_delimiter(&PathBuf::from("stats.tsv"), Some(b';')),
            b';'
        );
    }

    #[test]
    fn resolve_encoding_accepts_whatwg_labels() {
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(
            resolve_encoding(Some("latin1")).unwrap().name(),
            "windows-1252"
        );
        assert!(resolve_encoding(Some("klingon")).is_err());
    }

    #[test]
    fn decode_headers_strips_utf8_bom() {
        let record = csv::ByteRecord::from(vec![&b"\xEF\xBB\xBFDistrict"[..], &b"Sales"[..]]);
        let decoded = decode_headers(&record, UTF_8).unwrap();
        assert_eq!(decoded, vec!["District", "Sales"]);
    }

    #[test]
    fn decode_bytes_leaves_bom_like_data_alone() {
        let encoding = resolve_encoding(Some("windows-1252")).unwrap();
        let decoded = decode_bytes(b"\xFF\xFEAjax", encoding).unwrap();
        assert_eq!(decoded, "\u{ff}\u{fe}Ajax");

        let record = csv::ByteRecord::from(vec![&b"Name"[..], &b"\xFF\xFEx"[..]]);
        let headers = decode_headers(&record, encoding).unwrap();
        assert_eq!(headers, vec!["Name", "\u{ff}\u{fe}x"]);
    }

    #[test]
    fn decode_bytes_handles_windows_1252() {
        let encoding = resolve_encoding(Some("windows-1252")).unwrap();
        let decoded = decode_bytes(b"Caf\xE9", encoding).unwrap();
        assert_eq!(decoded, "Café");
    }
}
