use crate::error::LookupError;
use serde::{Deserialize, Serialize};

/// Year selection applied to a year-indexed [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearSpec {
    /// Single year like 2020
    Year(i32),
    /// Inclusive range like 2000..=2020
    Range { start: i32, end: i32 },
}

impl YearSpec {
    /// First and last year, inclusive.
    pub fn bounds(&self) -> (i32, i32) {
        match *self {
            YearSpec::Year(y) => (y, y),
            YearSpec::Range { start, end } => (start, end),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        let (start, end) = self.bounds();
        (start..=end).contains(&year)
    }

    /// Parse `"2020"` or `"2000:2020"`.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some((a, b)) = s.split_once(':') {
            let start = a.trim().parse::<i32>().ok()?;
            let end = b.trim().parse::<i32>().ok()?;
            Some(YearSpec::Range { start, end })
        } else {
            s.trim().parse::<i32>().ok().map(YearSpec::Year)
        }
    }
}

/// A variable: subject descriptor and unit, with its short subject code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub subject: String,
    pub unit: String,
    pub code: String,
}

/// One entry of the country index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// Numeric WEO country code, e.g. "134"
    pub weo_code: String,
    /// ISO 3166 alpha-3
    pub iso: String,
    pub name: String,
}

/// One subject of a single-country, single-year view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub code: String,
    pub value: Option<f64>,
    /// `"<subject descriptor> - <unit>"`
    pub description: String,
}

/// Labelled one-dimensional vector of optional numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub index: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn get(&self, label: &str) -> Option<Option<f64>> {
        self.index
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.index
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Read-only labelled table of optional numbers, stored row-major.
///
/// Produced by the accessor in two orientations: year-indexed panels (one
/// column per country or per subject code) and cross-sections (one row per
/// subject code, one column per country).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub data: Vec<Vec<Option<f64>>>,
}

impl Frame {
    pub fn new(index: Vec<String>, columns: Vec<String>, data: Vec<Vec<Option<f64>>>) -> Self {
        debug_assert_eq!(index.len(), data.len());
        debug_assert!(data.iter().all(|r| r.len() == columns.len()));
        Self {
            index,
            columns,
            data,
        }
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    fn row_pos(&self, label: &str) -> Option<usize> {
        self.index.iter().position(|l| l == label)
    }

    fn col_pos(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|l| l == label)
    }

    /// Cell by row and column label. `None` if either label is unknown.
    pub fn get(&self, row: &str, column: &str) -> Option<Option<f64>> {
        Some(self.data[self.row_pos(row)?][self.col_pos(column)?])
    }

    pub fn row(&self, label: &str) -> Option<Series> {
        let i = self.row_pos(label)?;
        Some(Series {
            index: self.columns.clone(),
            values: self.data[i].clone(),
        })
    }

    pub fn column(&self, label: &str) -> Option<Series> {
        let j = self.col_pos(label)?;
        Some(Series {
            index: self.index.clone(),
            values: self.data.iter().map(|r| r[j]).collect(),
        })
    }

    pub fn transpose(&self) -> Frame {
        let data = (0..self.columns.len())
            .map(|j| self.data.iter().map(|r| r[j]).collect())
            .collect();
        Frame::new(self.columns.clone(), self.index.clone(), data)
    }

    /// Keep the named columns, in the order given. Unknown labels are an error.
    pub fn select_columns(&self, labels: &[String]) -> Result<Frame, LookupError> {
        let positions = labels
            .iter()
            .map(|l| {
                self.col_pos(l)
                    .ok_or_else(|| LookupError::new("column", l.clone(), self.columns.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let data = self
            .data
            .iter()
            .map(|r| positions.iter().map(|&j| r[j]).collect())
            .collect();
        Ok(Frame::new(self.index.clone(), labels.to_vec(), data))
    }

    /// Keep the named rows, in the order given. Unknown labels are an error.
    pub fn select_rows(&self, labels: &[String], field: &'static str) -> Result<Frame, LookupError> {
        let data = labels
            .iter()
            .map(|l| {
                self.row_pos(l)
                    .map(|i| self.data[i].clone())
                    .ok_or_else(|| LookupError::new(field, l.clone(), self.index.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Frame::new(labels.to_vec(), self.columns.clone(), data))
    }

    /// Cellwise combination of two frames with identical labels; cells missing
    /// on either side stay missing.
    pub fn zip_with(&self, other: &Frame, f: impl Fn(f64, f64) -> f64) -> Frame {
        let data = self
            .index
            .iter()
            .zip(&self.data)
            .map(|(row, values)| {
                self.columns
                    .iter()
                    .zip(values)
                    .map(|(col, a)| match (a, other.get(row, col).flatten()) {
                        (Some(a), Some(b)) => Some(f(*a, b)),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        Frame::new(self.index.clone(), self.columns.clone(), data)
    }
}

/// Restrict a year-indexed frame to `spec`.
///
/// The result is turned around: one row per entity (the input's columns) and
/// one column per selected year, so a single year reads as a cross-section.
/// Both ends of the selection must be years of the frame and `start` must
/// not come after `end`; otherwise it is a [`LookupError`].
pub fn slice_years(frame: &Frame, spec: YearSpec) -> Result<Frame, LookupError> {
    let (start, end) = spec.bounds();
    if start > end {
        return Err(LookupError::new(
            "year",
            format!("{}:{}", start, end),
            frame.index.clone(),
        ));
    }
    for y in [start, end] {
        let label = y.to_string();
        if !frame.index.contains(&label) {
            return Err(LookupError::new("year", label, frame.index.clone()));
        }
    }
    let years: Vec<String> = frame
        .index
        .iter()
        .filter(|l| l.trim().parse::<i32>().is_ok_and(|y| spec.contains(y)))
        .cloned()
        .collect();
    Ok(frame.select_rows(&years, "year")?.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Frame {
        Frame::new(
            vec!["2018".into(), "2019".into(), "2020".into()],
            vec!["DEU".into(), "USA".into()],
            vec![
                vec![Some(1.0), Some(10.0)],
                vec![Some(2.0), None],
                vec![Some(3.0), Some(30.0)],
            ],
        )
    }

    #[test]
    fn year_spec_parses_single_and_range() {
        assert_eq!(YearSpec::parse("2020"), Some(YearSpec::Year(2020)));
        assert_eq!(
            YearSpec::parse("2000:2002"),
            Some(YearSpec::Range { start: 2000, end: 2002 })
        );
        assert_eq!(YearSpec::parse("20x0"), None);
        let r = YearSpec::Range { start: 2000, end: 2002 };
        assert_eq!(r.bounds(), (2000, 2002));
        assert!(r.contains(2001));
        assert!(!r.contains(2003));
    }

    #[test]
    fn slicing_a_single_year_gives_entities_as_rows() {
        let s = slice_years(&panel(), YearSpec::Year(2019)).unwrap();
        assert_eq!(s.shape(), (2, 1));
        assert_eq!(s.get("DEU", "2019"), Some(Some(2.0)));
        assert_eq!(s.get("USA", "2019"), Some(None));
    }

    #[test]
    fn slicing_a_range() {
        let s = slice_years(&panel(), YearSpec::Range { start: 2019, end: 2020 }).unwrap();
        assert_eq!(s.columns, vec!["2019", "2020"]);
        assert_eq!(s.get("USA", "2020"), Some(Some(30.0)));
    }

    #[test]
    fn slicing_an_unknown_year_fails() {
        let e = slice_years(&panel(), YearSpec::Year(1999)).unwrap_err();
        assert_eq!(e.field, "year");
        assert_eq!(e.provided, "1999");
    }

    #[test]
    fn huge_range_fails_on_its_missing_start() {
        let started = std::time::Instant::now();
        let e = slice_years(&panel(), YearSpec::parse("1:30000000").unwrap()).unwrap_err();
        assert_eq!(e.field, "year");
        assert_eq!(e.provided, "1");
        assert_eq!(e.allowed, vec!["2018", "2019", "2020"]);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        let e = slice_years(&panel(), YearSpec::Range { start: 2018, end: 30000000 }).unwrap_err();
        assert_eq!(e.provided, "30000000");
    }

    #[test]
    fn inverted_range_fails() {
        let e = slice_years(&panel(), YearSpec::Range { start: 2019, end: 2018 }).unwrap_err();
        assert_eq!(e.field, "year");
        assert_eq!(e.provided, "2019:2018");
    }

    #[test]
    fn zip_with_keeps_missing() {
        let p = panel();
        let r = p.zip_with(&p, |a, b| a / b);
        assert_eq!(r.get("2018", "DEU"), Some(Some(1.0)));
        assert_eq!(r.get("2019", "USA"), Some(None));
    }
}
