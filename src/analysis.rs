//! Fitting both series and deriving estimates from the fitted curves.
//!
//! [`analyze`] runs the whole computation on a [`Dataset`]:
//! - fits the population series (every observed year) and the internet series
//!   (from [`AnalysisConfig::internet_start_year`]), leaving out the missing years;
//! - evaluates each model at the missing years;
//! - projects each model to its projection year;
//! - derives the number of internet users in the internet projection year.
//!
//! Years are fitted as `x = year - base_year`.
use std::collections::BTreeMap;

use crate::{dataset::Dataset, error::Result, CurveFit, Polynomial};

/// Year to model value, for the years with no observation.
pub type EstimateMap = BTreeMap<i32, f64>;

/// Parameters of the analysis.
///
/// The defaults describe the Indonesia dataset this tool was written for.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Name of the country, used in titles
    pub country: String,

    /// Year subtracted from calendar years before fitting
    pub base_year: i32,

    /// Years with no usable observation; estimated from the fits
    pub missing_years: Vec<i32>,

    /// Degree of the population model
    pub population_degree: usize,

    /// Degree of the internet model
    pub internet_degree: usize,

    /// First year of the internet series; earlier values are zero and not fitted
    pub internet_start_year: i32,

    /// Year the population is projected to
    pub population_projection_year: i32,

    /// Year the internet percentage is projected to
    pub internet_projection_year: i32,

    /// Years past the last observation that chart curves extend to
    pub curve_lookahead: i32,

    /// Number of points on each chart curve
    pub curve_resolution: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            country: "Indonesia".to_string(),
            base_year: 1960,
            missing_years: vec![2005, 2006, 2015, 2016],
            population_degree: 2,
            internet_degree: 3,
            internet_start_year: 1994,
            population_projection_year: 2030,
            internet_projection_year: 2035,
            curve_lookahead: 15,
            curve_resolution: 1000,
        }
    }
}

impl AnalysisConfig {
    /// Converts a calendar year to the model's x.
    #[must_use]
    pub fn year_to_x(&self, year: i32) -> f64 {
        f64::from(year - self.base_year)
    }

    /// Converts a model x back to a calendar year.
    #[must_use]
    pub fn x_to_year(&self, x: f64) -> f64 {
        x + f64::from(self.base_year)
    }
}

/// A model value at a year past the observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Calendar year
    pub year: i32,

    /// Model value at that year
    pub value: f64,
}

/// One fitted series with everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAnalysis {
    /// Name of the series, e.g. `population`
    pub name: &'static str,

    /// The fit, owning its samples
    pub fit: CurveFit<'static>,

    /// Model values at the missing years
    pub estimates: EstimateMap,

    /// Model value at the projection year
    pub projection: Projection,
}
impl SeriesAnalysis {
    /// Fits `samples` and evaluates the model at the missing years and the projection year.
    ///
    /// # Errors
    /// Anything [`CurveFit::new`] returns.
    pub fn new(
        name: &'static str,
        samples: Vec<(f64, f64)>,
        degree: usize,
        projection_year: i32,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let fit = CurveFit::new(samples, degree)?;
        tracing::info!(
            series = name,
            degree,
            samples = fit.data().len(),
            r_squared = fit.r_squared(),
            "fitted curve"
        );

        let model = fit.as_polynomial();
        let estimates = estimate(model, config, &config.missing_years);
        for (year, value) in &estimates {
            tracing::debug!(series = name, year, value, "estimated missing year");
        }

        let projection = Projection {
            year: projection_year,
            value: model.y(config.year_to_x(projection_year)),
        };
        tracing::debug!(series = name, year = projection.year, value = projection.value, "projected");

        Ok(Self {
            name,
            fit,
            estimates,
            projection,
        })
    }

    /// The fitted model; evaluates at any x.
    #[must_use]
    pub fn model(&self) -> &Polynomial<'static> {
        self.fit.as_polynomial()
    }

    /// The samples the model was fitted on, as `(year - base_year, value)`.
    #[must_use]
    pub fn samples(&self) -> &[(f64, f64)] {
        self.fit.data()
    }

    /// Degree of the model.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.fit.degree()
    }

    /// Model coefficients, highest power first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        self.fit.coefficients()
    }

    /// Evaluates the model at a calendar year.
    #[must_use]
    pub fn value_at(&self, year: i32, config: &AnalysisConfig) -> f64 {
        self.model().y(config.year_to_x(year))
    }
}

/// The full result of [`analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Parameters the analysis ran with
    pub config: AnalysisConfig,

    /// The population series
    pub population: SeriesAnalysis,

    /// The internet percentage series
    pub internet: SeriesAnalysis,

    /// Population model evaluated at the internet projection year
    pub population_at_internet_projection: Projection,

    /// Projected number of internet users: `internet% / 100 * population`, both at
    /// the internet projection year
    pub internet_users: f64,
}

/// Evaluates `model` at each year.
#[must_use]
pub fn estimate(model: &Polynomial<'_>, config: &AnalysisConfig, years: &[i32]) -> EstimateMap {
    years
        .iter()
        .map(|&year| (year, model.y(config.year_to_x(year))))
        .collect()
}

/// Fits both series of `dataset` and derives the estimates and projections.
///
/// # Errors
/// Any fitting error aborts the analysis, see [`CurveFit::new`].
pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let population_samples = dataset.population_series(config.base_year, &config.missing_years);
    let internet_samples = dataset.internet_series(
        config.base_year,
        config.internet_start_year,
        &config.missing_years,
    );

    let population = SeriesAnalysis::new(
        "population",
        population_samples,
        config.population_degree,
        config.population_projection_year,
        config,
    )?;
    let internet = SeriesAnalysis::new(
        "internet",
        internet_samples,
        config.internet_degree,
        config.internet_projection_year,
        config,
    )?;

    let year = config.internet_projection_year;
    let population_at_internet_projection = Projection {
        year,
        value: population.value_at(year, config),
    };
    let internet_users =
        internet.projection.value / 100.0 * population_at_internet_projection.value;
    tracing::info!(year, internet_users, "projected internet users");

    Ok(AnalysisReport {
        config: config.clone(),
        population,
        internet,
        population_at_internet_projection,
        internet_users,
    })
}
