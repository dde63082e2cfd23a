use crate::models::Frame;
use serde::{Deserialize, Serialize};

/// Summary statistics for one frame column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute statistics per column (e.g. per country of a [`crate::Dataset::get`] panel).
pub fn column_summary(frame: &Frame) -> Vec<Summary> {
    let mut out = Vec::with_capacity(frame.columns.len());
    for (j, column) in frame.columns.iter().enumerate() {
        let mut vals: Vec<f64> = frame.data.iter().filter_map(|r| r[j]).collect();
        let missing = frame.data.len() - vals.len();
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else { None };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary { column: column.clone(), count, missing, min, max, mean, median });
    }
    out
}
