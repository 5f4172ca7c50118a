use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Returns an uppercase representation, avoiding allocation when unnecessary.
pub fn uppercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_lowercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_uppercase())
    }
}

/// Trims leading/trailing whitespace while borrowing the original.
pub fn trim(input: &str) -> Cow<'_, str> {
    Cow::Borrowed(input.trim())
}

/// Replaces every run of whitespace with a single space.
pub fn collapse_whitespace(input: &str) -> Cow<'_, str> {
    regex_replace(input, &WHITESPACE_RUN, " ")
}

/// Lowercases and keeps only ASCII letters and digits, so `"$ Volume"` becomes `"volume"`.
pub fn alphanumeric_lowercase(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}

/// Applies a regex replacement while avoiding allocation when there are no matches.
pub fn regex_replace<'a>(value: &'a str, regex: &Regex, replacement: &str) -> Cow<'a, str> {
    if regex.is_match(value) {
        Cow::Owned(regex.replace_all(value, replacement).to_string())
    } else {
        Cow::Borrowed(value)
    }
}
