//! weo_rs
//!
//! A lightweight Rust library for downloading and querying the IMF World
//! Economic Outlook (WEO) database. Pairs with the `weo` CLI.
//!
//! ### Features
//! - Compute valid releases (twice yearly since October 2007) and their download addresses
//! - Download a release file to disk
//! - Load the tab-delimited table (ISO-8859-1 or UTF-16LE) and look up variables by
//!   subject/unit or short code, with errors that list the valid choices
//! - Reshape into year-by-country panels, per-country panels and one-year cross-sections
//! - Save results as CSV or JSON and print quick summary statistics
//!
//! ### Example
//! ```no_run
//! use weo_rs::{Client, Dataset, Release, YearSpec};
//!
//! let release: Release = "2019-Oct".parse()?;
//! Client::new()?.fetch(release, "weo_2019_2.csv", false)?;
//!
//! let w = Dataset::open("weo_2019_2.csv")?;
//! let gdp = w.getc("NGDPD")?;
//! let gdp_2018 = weo_rs::models::slice_years(&gdp, YearSpec::Year(2018))?;
//! weo_rs::storage::save_csv(&gdp_2018, "country", "gdp_2018.csv")?;
//! let stats = weo_rs::stats::column_summary(&gdp);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod address;
pub mod countries;
pub mod dataset;
pub mod download;
pub mod error;
pub mod models;
pub mod release;
pub mod stats;
pub mod storage;
pub mod table;
mod variables;

pub use address::{Flavor, commodities_address, countries_address};
pub use countries::{CountryCodes, IsoCountryCodes};
pub use dataset::{Dataset, DatasetOptions};
pub use download::{Client, get};
pub use error::{DateError, LookupError, ParsingError, WeoError};
pub use models::{Country, Frame, Observation, Series, Variable, YearSpec};
pub use release::{Half, Release};
