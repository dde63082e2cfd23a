//! Query layer over one loaded WEO table.
//!
//! ```no_run
//! use weo_rs::Dataset;
//!
//! let w = Dataset::open("weo.csv")?;
//! let debt = w.get("General government gross debt", "Percent of GDP")?;
//! let unemployment = w.getc("LUR")?;
//! let germany = w.country("DEU", true)?;
//! # Ok::<(), weo_rs::WeoError>(())
//! ```
use crate::countries::{CountryCodes, IsoCountryCodes};
use crate::error::{LookupError, ParsingError, WeoError};
use crate::models::{Country, Frame, Observation, Variable, YearSpec, slice_years};
use crate::table::{self, Table, parse_number};
use log::info;
use std::path::Path;
use std::sync::Arc;

pub const WEO_COUNTRY_CODE: &str = "WEO Country Code";
pub const ISO: &str = "ISO";
pub const SUBJECT_CODE: &str = "WEO Subject Code";
pub const SUBJECT: &str = "Subject Descriptor";
pub const UNITS: &str = "Units";

/// Subject codes of the compact country panel, in display order.
pub const CORE_CODES: &[&str] = &[
    // GDP
    "NGDP",
    "NGDP_RPCH",
    // Saving and investment
    "NGSD_NGDP",
    "NID_NGDP",
    // Inflation
    "PCPIEPCH",
    "PCPIPCH",
    "NGDP_D",
    // Labor
    "LP",
    "LUR",
    // General government, national currency
    "GGR",
    "GGX",
    "GGXWDG",
    "GGXWDN",
    "GGXONLB",
    "GGXCNL",
    // In USD
    "NGDPD",
    "BCA",
    "PPPEX",
];

/// Settings for [`Dataset::open_with`].
#[derive(Clone)]
pub struct DatasetOptions {
    /// Column whose values label the columns of [`Dataset::get`].
    pub id_column: String,
    pub codes: Arc<dyn CountryCodes>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            id_column: ISO.to_string(),
            codes: Arc::new(IsoCountryCodes::default()),
        }
    }
}

impl std::fmt::Debug for DatasetOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetOptions")
            .field("id_column", &self.id_column)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    weo_country: usize,
    iso: usize,
    country: usize,
    code: usize,
    subject: usize,
    unit: usize,
    id: usize,
}

/// One WEO country table, read from a local file.
pub struct Dataset {
    table: Table,
    cols: Columns,
    /// `(header, column position)` of the year columns, ascending
    years: Vec<(i32, usize)>,
    id_column: String,
    codes: Arc<dyn CountryCodes>,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("rows", &self.table.rows().len())
            .field("years", &self.years.len())
            .field("id_column", &self.id_column)
            .finish_non_exhaustive()
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|x| x == v) {
            out.push(v.to_string());
        }
    }
    out
}

fn must_be_one_of(field: &'static str, value: &str, allowed: Vec<String>) -> Result<(), LookupError> {
    if allowed.iter().any(|a| a == value) {
        Ok(())
    } else {
        Err(LookupError::new(field, value, allowed))
    }
}

impl Dataset {
    /// Load the file at `path` with default options (columns labelled by ISO code).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WeoError> {
        Self::open_with(path, DatasetOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: DatasetOptions) -> Result<Self, WeoError> {
        let path = path.as_ref();
        let table = table::read_table(path)?;
        let ds = Self::from_table(table, options)?;
        info!(
            "loaded {} ({} rows, years {:?}..{:?})",
            path.display(),
            ds.table.rows().len(),
            ds.years.first().map(|y| y.0),
            ds.years.last().map(|y| y.0),
        );
        Ok(ds)
    }

    /// Wrap an already loaded table. Required columns are checked here.
    pub fn from_table(table: Table, options: DatasetOptions) -> Result<Self, ParsingError> {
        let cols = Columns {
            weo_country: table.column_index(WEO_COUNTRY_CODE)?,
            iso: table.column_index(ISO)?,
            country: table.column_index(table::COUNTRY)?,
            code: table.column_index(SUBJECT_CODE)?,
            subject: table.column_index(SUBJECT)?,
            unit: table.column_index(UNITS)?,
            id: table.column_index(&options.id_column)?,
        };
        if table.rows().is_empty() {
            return Err(ParsingError::NoRows);
        }
        let mut years: Vec<(i32, usize)> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_digit()))
            .filter_map(|(j, c)| c.parse::<i32>().ok().map(|y| (y, j)))
            .collect();
        years.sort_unstable();
        Ok(Self {
            table,
            cols,
            years,
            id_column: options.id_column,
            codes: options.codes,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    fn rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.table.rows().iter()
    }

    fn column_values(&self, j: usize) -> impl Iterator<Item = &str> {
        self.rows().map(move |r| r[j].as_str())
    }

    // properties

    /// Year column headers, ascending.
    pub fn years(&self) -> Vec<String> {
        self.years.iter().map(|(y, _)| y.to_string()).collect()
    }

    /// Distinct subject descriptors in order of appearance.
    pub fn subjects(&self) -> Vec<String> {
        unique(self.column_values(self.cols.subject))
    }

    /// Distinct subject codes in order of appearance.
    pub fn codes(&self) -> Vec<String> {
        unique(self.column_values(self.cols.code))
    }

    /// [`CORE_CODES`] present in this table.
    pub fn core_codes(&self) -> Vec<String> {
        let codes = self.codes();
        CORE_CODES
            .iter()
            .filter(|c| codes.iter().any(|x| x == *c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn core_codes_describe(&self) -> Vec<Variable> {
        self.core_codes()
            .into_iter()
            .filter_map(|code| {
                let (subject, unit) = self.from_code(&code).ok()?;
                Some(Variable {
                    subject,
                    unit,
                    code,
                })
            })
            .collect()
    }

    /// Footnote rows of the source file.
    pub fn footnotes(&self) -> &[Vec<String>] {
        self.table.footnotes()
    }

    /// `(year, month name)` of the release, read from the footnote citation.
    pub fn version(&self) -> Result<(i32, String), ParsingError> {
        self.table.version()
    }

    // subjects and units

    /// All variables, or those whose subject descriptor contains `pattern`
    /// (case-insensitive).
    pub fn variables(&self, pattern: Option<&str>) -> Vec<Variable> {
        let needle = pattern.map(str::to_lowercase);
        let mut out: Vec<Variable> = Vec::new();
        for r in self.rows() {
            let (subject, unit, code) = (&r[self.cols.subject], &r[self.cols.unit], &r[self.cols.code]);
            if let Some(n) = &needle
                && !subject.to_lowercase().contains(n.as_str())
            {
                continue;
            }
            if !out.iter().any(|v| &v.subject == subject && &v.unit == unit) {
                out.push(Variable {
                    subject: subject.clone(),
                    unit: unit.clone(),
                    code: code.clone(),
                });
            }
        }
        out
    }

    /// Distinct units of `subject`, or of the whole table.
    pub fn units(&self, subject: Option<&str>) -> Vec<String> {
        let (s, u) = (self.cols.subject, self.cols.unit);
        unique(
            self.rows()
                .filter(|r| subject.is_none_or(|x| r[s] == x))
                .map(|r| r[u].as_str()),
        )
    }

    pub fn check_subject(&self, subject: &str) -> Result<(), LookupError> {
        must_be_one_of("subject", subject, self.subjects())
    }

    pub fn check_unit(&self, subject: &str, unit: &str) -> Result<(), LookupError> {
        must_be_one_of("unit", unit, self.units(Some(subject)))
    }

    pub fn check_code(&self, code: &str) -> Result<(), LookupError> {
        must_be_one_of("code", code, self.codes())
    }

    pub fn check_country(&self, iso: &str) -> Result<(), LookupError> {
        must_be_one_of("country", iso, unique(self.column_values(self.cols.iso)))
    }

    fn check_year(&self, year: i32) -> Result<usize, LookupError> {
        self.years
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, j)| *j)
            .ok_or_else(|| LookupError::new("year", year.to_string(), self.years()))
    }

    // codes

    pub fn to_code(&self, subject: &str, unit: &str) -> Result<String, LookupError> {
        self.check_subject(subject)?;
        self.check_unit(subject, unit)?;
        let (s, u, c) = (self.cols.subject, self.cols.unit, self.cols.code);
        self.rows()
            .find(|r| r[s] == subject && r[u] == unit)
            .map(|r| r[c].clone())
            .ok_or_else(|| LookupError::new("unit", unit, self.units(Some(subject))))
    }

    /// `(subject descriptor, unit)` of a subject code.
    pub fn from_code(&self, code: &str) -> Result<(String, String), LookupError> {
        self.check_code(code)?;
        let (s, u, c) = (self.cols.subject, self.cols.unit, self.cols.code);
        self.rows()
            .find(|r| r[c] == code)
            .map(|r| (r[s].clone(), r[u].clone()))
            .ok_or_else(|| LookupError::new("code", code, self.codes()))
    }

    // countries

    /// Country index, or the entries whose name contains `name`
    /// (case-insensitive). A search with no match is empty, not an error.
    pub fn countries(&self, name: Option<&str>) -> Vec<Country> {
        let needle = name.map(str::to_lowercase);
        let mut out: Vec<Country> = Vec::new();
        for r in self.rows() {
            let c = Country {
                weo_code: r[self.cols.weo_country].clone(),
                iso: r[self.cols.iso].clone(),
                name: r[self.cols.country].clone(),
            };
            if needle
                .as_ref()
                .is_some_and(|n| !c.name.to_lowercase().contains(n.as_str()))
            {
                continue;
            }
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// Three-letter code of the first country whose name contains `name`.
    pub fn iso_code3(&self, name: &str) -> Result<String, LookupError> {
        self.countries(Some(name))
            .into_iter()
            .next()
            .map(|c| c.iso)
            .ok_or_else(|| {
                LookupError::new(
                    "country name",
                    name,
                    self.countries(None).into_iter().map(|c| c.name).collect(),
                )
            })
    }

    /// Two-letter code of the first country whose name contains `name`.
    /// Territories outside ISO 3166 resolve to a fixed name.
    pub fn iso_code2(&self, name: &str) -> Result<String, LookupError> {
        let iso3 = self.iso_code3(name)?;
        self.codes.alpha2(&iso3).ok_or_else(|| {
            let known = unique(self.column_values(self.cols.iso))
                .into_iter()
                .filter(|a3| self.codes.alpha2(a3).is_some())
                .collect();
            LookupError::new("three-letter country code", iso3, known)
        })
    }

    /// Resolve a 2- or 3-letter code to the table's three-letter code.
    fn resolve_iso3(&self, code: &str) -> Result<String, LookupError> {
        let iso3 = match code.len() {
            3 => code.to_ascii_uppercase(),
            2 => self.codes.alpha3(code).ok_or_else(|| {
                let known = unique(self.column_values(self.cols.iso))
                    .iter()
                    .filter_map(|a3| self.codes.alpha2(a3))
                    .filter(|a2| a2.len() == 2)
                    .collect();
                LookupError::new("country", code, known)
            })?,
            _ => {
                return Err(LookupError::new(
                    "country",
                    code,
                    unique(self.column_values(self.cols.iso)),
                ));
            }
        };
        self.check_country(&iso3)?;
        Ok(iso3)
    }

    /// Country name for a 2- or 3-letter code.
    pub fn country_name(&self, code: &str) -> Result<String, LookupError> {
        let iso3 = self.resolve_iso3(code)?;
        Ok(self
            .rows()
            .find(|r| r[self.cols.iso] == iso3)
            .map(|r| r[self.cols.country].clone())
            .unwrap_or_default())
    }

    // frames

    /// Year-indexed frame with one column per distinct `label` value among
    /// `rows`, in order of first appearance.
    fn pivot_years<'a>(&self, rows: impl Iterator<Item = &'a Vec<String>>, label: usize) -> Frame {
        let mut columns: Vec<String> = Vec::new();
        let mut picked: Vec<&Vec<String>> = Vec::new();
        for r in rows {
            if !columns.iter().any(|c| *c == r[label]) {
                columns.push(r[label].clone());
                picked.push(r);
            }
        }
        let data = self
            .years
            .iter()
            .map(|(_, j)| picked.iter().map(|r| parse_number(&r[*j])).collect())
            .collect();
        Frame::new(self.years(), columns, data)
    }

    /// One variable for every country: rows are years, columns are values of
    /// the id column.
    pub fn get(&self, subject: &str, unit: &str) -> Result<Frame, LookupError> {
        self.check_subject(subject)?;
        self.check_unit(subject, unit)?;
        let (s, u) = (self.cols.subject, self.cols.unit);
        let rows = self.rows().filter(|r| r[s] == subject && r[u] == unit);
        Ok(self.pivot_years(rows, self.cols.id))
    }

    pub fn getc(&self, code: &str) -> Result<Frame, LookupError> {
        let (subject, unit) = self.from_code(code)?;
        self.get(&subject, &unit)
    }

    /// Cross-section for one year: rows are subject codes, columns are ISO
    /// codes, both in order of appearance.
    pub fn fix_year(&self, year: i32) -> Result<Frame, LookupError> {
        let j = self.check_year(year)?;
        let index = self.codes();
        let columns = unique(self.column_values(self.cols.iso));
        let mut data = vec![vec![None; columns.len()]; index.len()];
        for r in self.rows() {
            let i = index.iter().position(|c| *c == r[self.cols.code]);
            let k = columns.iter().position(|c| *c == r[self.cols.iso]);
            if let (Some(i), Some(k)) = (i, k)
                && data[i][k].is_none()
            {
                data[i][k] = parse_number(&r[j]);
            }
        }
        Ok(Frame::new(index, columns, data))
    }

    /// All variables of one country (2- or 3-letter code): rows are years,
    /// columns are subject codes. `compact` keeps only [`Self::core_codes`].
    pub fn country(&self, code: &str, compact: bool) -> Result<Frame, LookupError> {
        let iso3 = self.resolve_iso3(code)?;
        let iso = self.cols.iso;
        let frame = self.pivot_years(self.rows().filter(|r| r[iso] == iso3), self.cols.code);
        if compact {
            let core: Vec<String> = self
                .core_codes()
                .into_iter()
                .filter(|c| frame.columns.contains(c))
                .collect();
            frame.select_columns(&core)
        } else {
            Ok(frame)
        }
    }

    /// One country in one year, each value labelled `"<subject> - <unit>"`.
    pub fn country_at(&self, code: &str, year: i32, compact: bool) -> Result<Vec<Observation>, LookupError> {
        self.check_year(year)?;
        let frame = self.country(code, compact)?;
        let row = frame
            .row(&year.to_string())
            .ok_or_else(|| LookupError::new("year", year.to_string(), self.years()))?;
        row.iter()
            .map(|(code, value)| -> Result<Observation, LookupError> {
                let (subject, unit) = self.from_code(code)?;
                Ok(Observation {
                    code: code.to_string(),
                    value,
                    description: format!("{subject} - {unit}"),
                })
            })
            .collect()
    }

    /// Apply an optional year selection to a zero-argument accessor.
    ///
    /// ```no_run
    /// # use weo_rs::{Dataset, YearSpec};
    /// # let w = Dataset::open("weo.csv")?;
    /// let gdp_2019 = w.sliced(Dataset::gdp_usd, Some(YearSpec::Year(2019)))?;
    /// # Ok::<(), weo_rs::WeoError>(())
    /// ```
    pub fn sliced<F>(&self, producer: F, years: Option<YearSpec>) -> Result<Frame, LookupError>
    where
        F: FnOnce(&Self) -> Result<Frame, LookupError>,
    {
        let frame = producer(self)?;
        match years {
            Some(spec) => slice_years(&frame, spec),
            None => Ok(frame),
        }
    }
}
