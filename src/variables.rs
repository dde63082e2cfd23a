//! Named accessors for frequently used variables.
//!
//! Each returns the full year-by-country frame; combine with
//! [`Dataset::sliced`] or [`crate::models::slice_years`] to pick years.
use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::models::{Frame, Series};

const GDP: &str = "Gross domestic product, current prices";
const GDP_PC: &str = "Gross domestic product per capita, current prices";
const NATIONAL_CURRENCY: &str = "National currency";
const USD: &str = "U.S. dollars";
const PERCENT_CHANGE: &str = "Percent change";
const PERCENT_OF_GDP: &str = "Percent of GDP";
const LIBOR: &str = "Six-month London interbank offered rate (LIBOR)";

impl Dataset {
    pub fn gdp_nc(&self) -> Result<Frame, LookupError> {
        self.get(GDP, NATIONAL_CURRENCY)
    }

    pub fn gdp_usd(&self) -> Result<Frame, LookupError> {
        self.get(GDP, USD)
    }

    pub fn gdp_pc_nc(&self) -> Result<Frame, LookupError> {
        self.get(GDP_PC, NATIONAL_CURRENCY)
    }

    pub fn gdp_pc_usd(&self) -> Result<Frame, LookupError> {
        self.get(GDP_PC, USD)
    }

    pub fn gdp_ppp(&self) -> Result<Frame, LookupError> {
        self.get(GDP, "Purchasing power parity; international dollars")
    }

    pub fn gdp_growth(&self) -> Result<Frame, LookupError> {
        self.get("Gross domestic product, constant prices", PERCENT_CHANGE)
    }

    pub fn population(&self) -> Result<Frame, LookupError> {
        self.get("Population", "Persons")
    }

    pub fn current_account(&self) -> Result<Frame, LookupError> {
        self.get("Current account balance", USD)
    }

    pub fn inflation(&self) -> Result<Frame, LookupError> {
        self.get("Inflation, end of period consumer prices", PERCENT_CHANGE)
    }

    pub fn gov_net_lending_pgdp(&self) -> Result<Frame, LookupError> {
        self.get("General government net lending/borrowing", PERCENT_OF_GDP)
    }

    pub fn gov_gross_debt_pgdp(&self) -> Result<Frame, LookupError> {
        self.get("General government gross debt", PERCENT_OF_GDP)
    }

    /// Six-month USD LIBOR, reported for the United States only.
    pub fn libor_usd(&self) -> Result<Series, LookupError> {
        let frame = self.get(LIBOR, "Percent")?;
        frame
            .column("USA")
            .ok_or_else(|| LookupError::new("country", "USA", frame.columns.clone()))
    }

    /// Implied exchange rate, national currency per U.S. dollar.
    pub fn exchange_rate(&self) -> Result<Frame, LookupError> {
        Ok(self.gdp_nc()?.zip_with(&self.gdp_usd()?, |nc, usd| nc / usd))
    }

    /// Id-column values of the `n` largest economies by GDP in U.S. dollars
    /// in `year`. Countries without a value are ranked last.
    pub fn nlargest(&self, n: usize, year: i32) -> Result<Vec<String>, LookupError> {
        let gdp = self.gdp_usd()?;
        let row = gdp
            .row(&year.to_string())
            .ok_or_else(|| LookupError::new("year", year.to_string(), self.years()))?;
        let mut ranked: Vec<(&str, Option<f64>)> = row.iter().collect();
        ranked.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(ranked
            .into_iter()
            .take(n)
            .map(|(c, _)| c.to_string())
            .collect())
    }
}
