//! Loading the yearly observations the fits are computed from.
//!
//! The input is a table with one row per year and (at least) these columns:
//!
//! | Column                     | Type    |
//! |----------------------------|---------|
//! | `Year`                     | integer |
//! | `Population`               | number  |
//! | `Percentage_Internet_User` | number  |
//!
//! Other columns are ignored and column order is free. The table is read from
//! CSV with a header row, or from a JSON array of objects with the same keys.
//!
//! ```rust
//! # use popfit::dataset::Dataset;
//! let csv = "Year,Population,Percentage_Internet_User\n\
//!            1994,192000000,0.01\n\
//!            1995,195000000,0.05\n";
//! let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
//! assert_eq!(dataset.len(), 2);
//!
//! let series = dataset.internet_series(1960, 1994, &[]);
//! assert_eq!(series, vec![(34.0, 0.01), (35.0, 0.05)]);
//! ```
use std::{io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column holding the calendar year
pub const YEAR_COLUMN: &str = "Year";

/// Column holding the population count
pub const POPULATION_COLUMN: &str = "Population";

/// Column holding the share of the population using the internet, in percent
pub const INTERNET_COLUMN: &str = "Percentage_Internet_User";

/// One row of the input table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar year
    #[serde(rename = "Year")]
    pub year: i32,

    /// Population count
    #[serde(rename = "Population")]
    pub population: f64,

    /// Internet users as a percentage of the population (0 to 100)
    #[serde(rename = "Percentage_Internet_User")]
    pub internet_pct: f64,
}

/// The yearly observations of one country, sorted by year.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}
impl Dataset {
    /// Creates a dataset from observations in any order.
    ///
    /// # Errors
    /// Returns [`Error::NoData`] if `observations` is empty.
    pub fn new(mut observations: Vec<Observation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(Error::NoData("the dataset".to_string()));
        }

        observations.sort_by_key(|o| o.year);
        Ok(Self { observations })
    }

    /// Reads a dataset from a file.
    ///
    /// Files with a `.json` extension are read as a JSON array of records,
    /// anything else as CSV with a header row.
    ///
    /// # Errors
    /// - [`Error::Io`] if the file cannot be read.
    /// - Anything [`Dataset::from_csv_reader`] or [`Dataset::from_json_str`] returns.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_error = |source| Error::Io {
            path: path.display().to_string(),
            source,
        };

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let dataset = if is_json {
            let text = std::fs::read_to_string(path).map_err(io_error)?;
            Self::from_json_str(&text)
        } else {
            let file = std::fs::File::open(path).map_err(io_error)?;
            Self::from_csv_reader(file)
        };

        dataset.map_err(|e| match e {
            Error::NoData(_) => Error::NoData(path.display().to_string()),
            e => e,
        })
    }

    /// Reads a dataset from CSV text with a header row.
    ///
    /// # Errors
    /// - [`Error::MissingColumn`] if the header lacks a required column.
    /// - [`Error::Csv`] if a row is malformed or a value does not parse.
    /// - [`Error::NoData`] if there are no rows.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in [YEAR_COLUMN, POPULATION_COLUMN, INTERNET_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn(column));
            }
        }

        let mut observations = Vec::new();
        for result in rdr.deserialize::<Observation>() {
            observations.push(result?);
        }

        tracing::debug!(rows = observations.len(), "read CSV dataset");
        Self::new(observations)
    }

    /// Reads a dataset from a JSON array of records.
    ///
    /// # Errors
    /// - [`Error::Json`] if the text is not an array of records with the required keys.
    /// - [`Error::NoData`] if the array is empty.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let observations: Vec<Observation> = serde_json::from_str(text)?;

        tracing::debug!(rows = observations.len(), "read JSON dataset");
        Self::new(observations)
    }

    /// Returns the observations, sorted by year.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the first and last observed years.
    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((self.observations.first()?.year, self.observations.last()?.year))
    }

    /// Returns the observation for `year`, if present.
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&Observation> {
        self.observations
            .binary_search_by_key(&year, |o| o.year)
            .ok()
            .map(|i| &self.observations[i])
    }

    /// Population samples `(year - base_year, population)` for every observed year
    /// not in `missing`.
    #[must_use]
    pub fn population_series(&self, base_year: i32, missing: &[i32]) -> Vec<(f64, f64)> {
        self.series(base_year, i32::MIN, missing, |o| o.population)
    }

    /// Internet percentage samples `(year - base_year, percent)` for observed years
    /// from `start_year` onwards, excluding `missing`.
    ///
    /// Earlier years are zero by definition and are left out of the fit.
    #[must_use]
    pub fn internet_series(
        &self,
        base_year: i32,
        start_year: i32,
        missing: &[i32],
    ) -> Vec<(f64, f64)> {
        self.series(base_year, start_year, missing, |o| o.internet_pct)
    }

    fn series(
        &self,
        base_year: i32,
        start_year: i32,
        missing: &[i32],
        value: impl Fn(&Observation) -> f64,
    ) -> Vec<(f64, f64)> {
        self.observations
            .iter()
            .filter(|o| o.year >= start_year && !missing.contains(&o.year))
            .map(|o| (f64::from(o.year - base_year), value(o)))
            .collect()
    }
}
