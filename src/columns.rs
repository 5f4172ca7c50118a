//! Canonical column naming for the incoming CSV.
//!
//! Known statistics columns are renamed to their `TRREB …` output names using a
//! case, space and punctuation insensitive comparison, so `Average Price`,
//! `average_price` and `AveragePrice` are all recognised. An unlabeled first
//! column (the index column many spreadsheet exports leave blank) becomes
//! `District`.

use std::collections::HashMap;

use crate::transform::string_ops::alphanumeric_lowercase;

pub const INDEX_COLUMN_LABEL: &str = "District";
pub const UNNAMED_PREFIX: &str = "Unnamed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameRule {
    pub candidates: &'static [&'static str],
    pub canonical: &'static str,
}

pub const RENAME_RULES: &[RenameRule] = &[
    RenameRule {
        candidates: &["Sales"],
        canonical: "TRREB Sales",
    },
    RenameRule {
        candidates: &["Average Price", "Avg Price", "AveragePrice"],
        canonical: "TRREB Average Price",
    },
    RenameRule {
        candidates: &[
            "Dollar Volume",
            "Total Dollar Volume",
            "$ Volume",
            "DollarVolume",
        ],
        canonical: "TRREB Dollar Volume",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

pub fn normalize_column_name(name: &str) -> String {
    alphanumeric_lowercase(name)
}

/// Renames a blank or `Unnamed…` first header to `District`.
pub fn label_index_column(headers: &mut [String]) -> Option<ColumnRename> {
    let first = headers.first_mut()?;
    if !first.trim().is_empty() && !first.starts_with(UNNAMED_PREFIX) {
        return None;
    }
    let from = std::mem::replace(first, INDEX_COLUMN_LABEL.to_string());
    Some(ColumnRename {
        from,
        to: INDEX_COLUMN_LABEL.to_string(),
    })
}

/// Applies `rules` to `headers` in place and returns the renames performed.
///
/// Within a rule the first candidate present wins. When several headers share
/// a normalized form the last of them is the one renamed.
pub fn apply_fuzzy_renames(headers: &mut [String], rules: &[RenameRule]) -> Vec<ColumnRename> {
    let by_norm: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_column_name(header), idx))
        .collect();

    let mut planned: Vec<(usize, &'static str)> = Vec::new();
    for rule in rules {
        let hit = rule
            .candidates
            .iter()
            .find_map(|candidate| by_norm.get(&normalize_column_name(candidate)));
        if let Some(&idx) = hit {
            match planned.iter_mut().find(|(existing, _)| *existing == idx) {
                Some(entry) => entry.1 = rule.canonical,
                None => planned.push((idx, rule.canonical)),
            }
        }
    }

    planned
        .into_iter()
        .map(|(idx, canonical)| {
            let from = std::mem::replace(&mut headers[idx], canonical.to_string());
            ColumnRename {
                from,
                to: canonical.to_string(),
            }
        })
        .collect()
}

pub fn describe_renames(renames: &[ColumnRename]) -> String {
    let pairs = renames
        .iter()
        .map(|rename| format!("'{}': '{}'", rename.from, rename.to))
        .collect::<Vec<_>>();
    format!("{{{}}}", pairs.join(", "))
}
