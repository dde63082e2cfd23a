//! Reading the tab-delimited WEO source file.
//!
//! Files up to April 2020 are ISO-8859-1; later ones are UTF-16LE. The file
//! extension (`.xls`, `.ashx`) is misleading: both are plain text tables.
//! Country rows are followed by a footnote block whose `Country` cell is
//! empty, e.g. `"International Monetary Fund, World Economic Outlook
//! Database, October 2019"`.
use crate::error::{ParsingError, WeoError};
use csv::ReaderBuilder;
use encoding_rs::UTF_16LE;
use encoding_rs::mem::decode_latin1;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Column with the country name; empty for footnote rows.
pub const COUNTRY: &str = "Country";

/// Text encoding a table was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceEncoding {
    /// ISO-8859-1, releases up to April 2020
    Latin1,
    /// UTF-16 little endian, later releases
    Utf16Le,
}

impl SourceEncoding {
    fn decode(self, bytes: &[u8]) -> String {
        match self {
            // Each byte is its own code point, including 0x80..=0x9F
            SourceEncoding::Latin1 => decode_latin1(bytes).into_owned(),
            SourceEncoding::Utf16Le => UTF_16LE.decode_with_bom_removal(bytes).0.into_owned(),
        }
    }
}

/// Raw table: header plus data rows and footnote rows, all as text.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    footnotes: Vec<Vec<String>>,
    encoding: SourceEncoding,
}

/// Read and split the file at `path`.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, WeoError> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(Table::from_bytes(&bytes)?)
}

/// `(year, month name)` from the footnote of the file at `path`.
pub fn version<P: AsRef<Path>>(path: P) -> Result<(i32, String), WeoError> {
    Ok(read_table(path)?.version()?)
}

/// Parse a number cell. Thousands separators are removed; anything that
/// does not parse (`"n/a"`, `"--"`, empty) is missing.
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// `(year, month name)` from a citation like
/// `"International Monetary Fund, World Economic Outlook Database, October 2019"`.
pub fn split_footnote(text: &str) -> Result<(i32, String), ParsingError> {
    static CITATION: OnceLock<Regex> = OnceLock::new();
    let re = CITATION.get_or_init(|| {
        Regex::new(r"International Monetary Fund, World Economic Outlook Database, (\w*) (\d*)")
            .expect("valid citation regex")
    });
    let caps = re
        .captures(text)
        .ok_or_else(|| ParsingError::Footnote(text.to_string()))?;
    let year = caps[2]
        .parse::<i32>()
        .map_err(|_| ParsingError::Footnote(text.to_string()))?;
    Ok((year, caps[1].to_string()))
}

fn is_blank(s: &str) -> bool {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .is_empty()
}

impl Table {
    /// Decode `bytes` as ISO-8859-1; fall back to UTF-16LE when that does not
    /// yield a usable table (no `Country` header or an empty first cell in
    /// the first data row).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParsingError> {
        let latin1 = Self::parse(bytes, SourceEncoding::Latin1)?;
        if latin1.looks_valid() {
            return Ok(latin1);
        }
        debug!("first cell missing under ISO-8859-1, re-reading as UTF-16LE");
        let table = Self::parse(bytes, SourceEncoding::Utf16Le)?;
        if table.columns.iter().all(|c| c != COUNTRY) {
            return Err(ParsingError::MissingColumn(COUNTRY.to_string()));
        }
        Ok(table)
    }

    fn looks_valid(&self) -> bool {
        let first_cell = self
            .rows
            .first()
            .or(self.footnotes.first())
            .and_then(|r| r.first());
        self.columns.iter().any(|c| c == COUNTRY) && first_cell.is_some_and(|c| !is_blank(c))
    }

    fn parse(bytes: &[u8], encoding: SourceEncoding) -> Result<Self, ParsingError> {
        let text = encoding.decode(bytes);
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut columns: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_matches('\0').trim().to_string())
            .collect();
        let mut records: Vec<Vec<String>> = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            let mut row: Vec<String> = rec.iter().map(|c| c.trim_matches('\0').to_string()).collect();
            if row.iter().all(|c| is_blank(c)) {
                continue;
            }
            row.resize(columns.len().max(row.len()), String::new());
            records.push(row);
        }
        let width = records.iter().map(Vec::len).max().unwrap_or(0).max(columns.len());
        columns.resize(width, String::new());
        for r in &mut records {
            r.resize(width, String::new());
        }

        // Blank trailing columns: no header and no values
        let keep: Vec<bool> = (0..width)
            .map(|j| !is_blank(&columns[j]) || records.iter().any(|r| !is_blank(&r[j])))
            .collect();
        if keep.iter().any(|k| !k) {
            debug!(
                "dropping {} blank column(s)",
                keep.iter().filter(|k| !**k).count()
            );
            let retain = |v: Vec<String>| -> Vec<String> {
                v.into_iter()
                    .zip(&keep)
                    .filter_map(|(c, k)| k.then_some(c))
                    .collect()
            };
            columns = retain(columns);
            records = records.into_iter().map(retain).collect();
        }

        let country = columns.iter().position(|c| c == COUNTRY);
        let (rows, footnotes): (Vec<Vec<String>>, Vec<Vec<String>>) = match country {
            Some(j) => records.into_iter().partition(|r| !is_blank(&r[j])),
            None => (records, Vec::new()),
        };
        Ok(Self {
            columns,
            rows,
            footnotes,
            encoding,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Country rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Rows after the country data (citation, notes).
    pub fn footnotes(&self) -> &[Vec<String>] {
        &self.footnotes
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// Position of a required column.
    pub fn column_index(&self, name: &str) -> Result<usize, ParsingError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ParsingError::MissingColumn(name.to_string()))
    }

    /// `(year, month name)` from the first footnote cell.
    pub fn version(&self) -> Result<(i32, String), ParsingError> {
        let cell = self
            .footnotes
            .first()
            .and_then(|r| r.iter().find(|c| !is_blank(c)))
            .ok_or(ParsingError::NoFootnote)?;
        split_footnote(cell)
    }
}
