use std::ops::Range;

use crate::{
    analysis::{AnalysisConfig, AnalysisReport, SeriesAnalysis},
    display::{self, CAPTION_PRECISION},
    value::{CoordExt, SteppedValues},
};

/// Shape of a highlighted point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Filled square, used for estimates of missing years
    Square,

    /// Eight-pointed star, used for projections
    Star,
}

/// Elements that can be drawn on a panel.
///
/// All coordinates are `(calendar year, value)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlottingElement {
    /// Observed samples, drawn as points
    Data(Vec<(f64, f64)>, String),

    /// Residuals of a fit, drawn as points
    Residuals(Vec<(f64, f64)>),

    /// A fitted curve, drawn as a line
    Curve(Vec<(f64, f64)>, String),

    /// Highlighted individual points
    Markers(Vec<(f64, f64)>, MarkerShape, String),

    /// Horizontal line across the whole panel at the given y
    Baseline(f64),
}
impl PlottingElement {
    /// Returns the points of this element; empty for a [`PlottingElement::Baseline`].
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        match self {
            Self::Data(points, _)
            | Self::Residuals(points)
            | Self::Curve(points, _)
            | Self::Markers(points, _, _) => points,
            Self::Baseline(_) => &[],
        }
    }

    /// Returns the legend label for this element, if it has one.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Data(_, label) | Self::Curve(_, label) | Self::Markers(_, _, label) => {
                Some(label)
            }
            Self::Residuals(_) | Self::Baseline(_) => None,
        }
    }
}

/// One chart in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Caption above the chart
    pub title: String,

    /// X-axis label
    pub x_label: String,

    /// Y-axis label
    pub y_label: String,

    /// Whether to draw a legend
    pub legend: bool,

    /// What to draw, in drawing order
    pub elements: Vec<PlottingElement>,
}
impl Panel {
    /// Scatter, fitted curve, missing-year estimates and projection of a series.
    fn fit(title: String, y_label: &str, series: &SeriesAnalysis, config: &AnalysisConfig) -> Self {
        let to_year = |&(x, y): &(f64, f64)| (config.x_to_year(x), y);

        let samples = series.samples();
        let curve = match samples.x_range() {
            Some(range) => {
                let end = range.end + f64::from(config.curve_lookahead);
                series
                    .model()
                    .solve(SteppedValues::linspace(range.start..=end, config.curve_resolution))
            }
            None => Vec::new(),
        };

        let estimates = series
            .estimates
            .iter()
            .map(|(&year, &value)| (f64::from(year), value))
            .collect();

        let projection = series.projection;
        Self {
            title,
            x_label: "Year".to_string(),
            y_label: y_label.to_string(),
            legend: true,
            elements: vec![
                PlottingElement::Data(samples.iter().map(to_year).collect(), "Actual data".into()),
                PlottingElement::Curve(
                    curve.iter().map(to_year).collect(),
                    format!("Polynomial (degree {})", series.degree()),
                ),
                PlottingElement::Markers(estimates, MarkerShape::Square, "Estimates".into()),
                PlottingElement::Markers(
                    vec![(f64::from(projection.year), projection.value)],
                    MarkerShape::Star,
                    format!("Projection {}", projection.year),
                ),
            ],
        }
    }

    /// Residuals of a series around a zero line.
    fn residuals(title: String, series: &SeriesAnalysis, config: &AnalysisConfig) -> Self {
        let residuals = series
            .fit
            .residuals()
            .into_iter()
            .map(|(x, r)| (config.x_to_year(x), r))
            .collect();

        Self {
            title,
            x_label: "Year".to_string(),
            y_label: "Residual".to_string(),
            legend: false,
            elements: vec![
                PlottingElement::Residuals(residuals),
                PlottingElement::Baseline(0.0),
            ],
        }
    }

    /// Range of x covered by the elements, padded by one year on each side.
    #[must_use]
    pub fn x_range(&self) -> Range<f64> {
        let range = self.points().x_range().unwrap_or(0.0..1.0);
        range.start - 1.0..range.end + 1.0
    }

    /// Range of y covered by the elements, padded by 5% on each side.
    #[must_use]
    pub fn y_range(&self) -> Range<f64> {
        let baselines = self.elements.iter().filter_map(|e| match e {
            PlottingElement::Baseline(y) => Some(*y),
            _ => None,
        });
        let ys = self.points().into_iter().map(|(_, y)| y).chain(baselines);

        let (min, max) = ys
            .filter(|y| y.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), y| {
                (min.min(y), max.max(y))
            });
        if min > max {
            return 0.0..1.0;
        }

        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        min - pad..max + pad
    }

    fn points(&self) -> Vec<(f64, f64)> {
        self.elements
            .iter()
            .flat_map(|e| e.points().iter().copied())
            .collect()
    }
}

/// Everything drawn on the chart, computed from an analysis without touching a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChart {
    /// Top row, full width
    pub population: Panel,

    /// Middle row, full width
    pub internet: Panel,

    /// Bottom row, left
    pub population_residuals: Panel,

    /// Bottom row, right
    pub internet_residuals: Panel,

    /// Lines of text under the grid
    pub footer: Vec<String>,
}
impl SeriesChart {
    /// Builds the panels and footer for `report`.
    #[must_use]
    pub fn from_analysis(report: &AnalysisReport) -> Self {
        let config = &report.config;
        let country = &config.country;
        let span = |series: &SeriesAnalysis| match series.samples().x_range() {
            Some(r) => format!("{:.0}-{:.0}", config.x_to_year(r.start), config.x_to_year(r.end)),
            None => String::new(),
        };

        let population = Panel::fit(
            format!("Population growth of {country} ({}) with estimates", span(&report.population)),
            "Population",
            &report.population,
            config,
        );
        let internet = Panel::fit(
            format!("Internet users in {country} ({}) with estimates", span(&report.internet)),
            "Internet users (% of population)",
            &report.internet,
            config,
        );

        let population_residuals =
            Panel::residuals("Residuals - population model".into(), &report.population, config);
        let internet_residuals =
            Panel::residuals("Residuals - internet model".into(), &report.internet, config);

        let equation = |series: &SeriesAnalysis| {
            display::format_equation_with_precision(
                series.coefficients(),
                config.base_year,
                CAPTION_PRECISION,
            )
        };
        let footer = vec![
            format!("Population equation: {}", equation(&report.population)),
            format!("Internet equation: {}", equation(&report.internet)),
        ];

        Self {
            population,
            internet,
            population_residuals,
            internet_residuals,
            footer,
        }
    }

    /// The panels in drawing order: population, internet, then both residual panels.
    #[must_use]
    pub fn panels(&self) -> [&Panel; 4] {
        [
            &self.population,
            &self.internet,
            &self.population_residuals,
            &self.internet_residuals,
        ]
    }
}
