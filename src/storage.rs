use crate::models::Frame;
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix labels that a spreadsheet would evaluate as a formula.
fn safe_label(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{}", s)
    } else {
        s.to_string()
    }
}

/// Save a frame as CSV: first column holds the row labels, header row holds
/// `index_name` and the column labels. Missing values are empty cells.
pub fn save_csv<P: AsRef<Path>>(frame: &Frame, index_name: &str, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec![safe_label(index_name)];
    header.extend(frame.columns.iter().map(|c| safe_label(c)));
    wtr.write_record(&header)?;
    for (label, row) in frame.index.iter().zip(&frame.data) {
        let mut rec = vec![safe_label(label)];
        rec.extend(row.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()));
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Record<'a> {
    index: &'a str,
    values: BTreeMap<&'a str, Option<f64>>,
}

/// Save a frame as a pretty JSON array of `{ "index": ..., "values": {column: value} }`.
pub fn save_json<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<()> {
    let records: Vec<Record> = frame
        .index
        .iter()
        .zip(&frame.data)
        .map(|(label, row)| Record {
            index: label,
            values: frame
                .columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().copied())
                .collect(),
        })
        .collect();
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
