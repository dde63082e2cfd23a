//! Error types shared by the release resolver and the dataset accessor.
//!
//! Lookup failures ("bad input") and malformed files ("bad file") are kept
//! apart so callers can tell them apart. Transport errors from the
//! downloader are not wrapped here; see [`crate::download`].

use crate::release::Release;
use thiserror::Error;

/// Invalid or out-of-range release identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("cannot work with a release earlier than {floor}, got {got}")]
    TooEarly { got: Release, floor: Release },
    #[error("release {got} is in the future, latest available is {current}")]
    Future { got: Release, current: Release },
    #[error("unrecognized release tag {0:?}, expected 1, 2, Apr, Oct or Sep")]
    Tag(String),
    #[error("usual release months are Apr and Oct, got month {month} in {input:?}")]
    Month { input: String, month: u32 },
    #[error("cannot parse release date {0:?}, expected YYYY-MM, YYYY-Mon or YYYY-Month")]
    Unparsable(String),
}

/// A subject, unit, code, country or year that is not present in the table.
///
/// The message lists every permitted value so a typo does not silently turn
/// into an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} must be one of: {}; provided {field}: {provided}", capitalize(.field), .allowed.join(", "))]
pub struct LookupError {
    pub field: &'static str,
    pub provided: String,
    pub allowed: Vec<String>,
}

impl LookupError {
    pub fn new(field: &'static str, provided: impl Into<String>, allowed: Vec<String>) -> Self {
        Self {
            field,
            provided: provided.into(),
            allowed,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Malformed source file.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("required column {0:?} not found in table header")]
    MissingColumn(String),
    #[error("table has no data rows")]
    NoRows,
    #[error("table has no footnote rows")]
    NoFootnote,
    #[error("footnote does not contain a database citation: {0:?}")]
    Footnote(String),
    #[error("malformed tab-delimited table")]
    Csv(#[from] csv::Error),
}

/// Crate-level error for operations that can fail in more than one way.
#[derive(Debug, Error)]
pub enum WeoError {
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_lists_allowed_values_and_input() {
        let e = LookupError::new("code", "NGDPX", vec!["NGDP".into(), "LUR".into()]);
        let msg = e.to_string();
        assert_eq!(
            msg,
            "Code must be one of: NGDP, LUR; provided code: NGDPX"
        );
    }
}
