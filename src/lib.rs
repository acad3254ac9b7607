//! # Popfit
//! ## Filling the gaps in a country's yearly statistics
//!
//! Yearly population and internet-usage tables are rarely complete; a few years always go missing.
//! This library fits least-squares polynomials to what is there, reads the missing years off the curves,
//! and projects both series a few years past the last observation.
//!
//! It provides:
//! - A polynomial least-squares fit ([`CurveFit`]) and the polynomial it produces ([`Polynomial`])
//! - Human-readable equations, in terms of `x = year - base_year` ([`display`])
//! - Loading the yearly table from CSV or JSON ([`dataset`])
//! - The full analysis: gap estimates, projections and derived user counts ([`analysis`])
//! - A console report ([`report`]) and a 4-panel PNG chart ([`plotting`])
//! - Test assertions for fits ([`test`])
//!
//! The simplest use-case is to fit a series and evaluate it:
//! ```rust
//! # use popfit::{CurveFit, assert_r_squared};
//! let data = vec![(0.0, 1.0), (1.0, 2.0), (2.0, 5.0), (3.0, 10.0)];
//! let fit = CurveFit::new(data, 2).unwrap();
//!
//! assert_r_squared!(fit);
//! let y: f64 = fit.as_polynomial().y(4.0);
//! assert!((y - 17.0).abs() < 1e-9);
//!
//! let equation = popfit::display::format_equation(&[1.0, 0.0, 1.0], 1960);
//! assert_eq!(equation, "y = x^2 + 1 (where x = year - 1960)");
//! ```
//!
//! Or run the whole analysis on a table:
//! ```rust,no_run
//! # use popfit::{analysis::{analyze, AnalysisConfig}, dataset::Dataset, report::print_report};
//! let dataset = Dataset::from_path("data.csv").unwrap();
//! let report = analyze(&dataset, &AnalysisConfig::default()).unwrap();
//! print_report(&mut std::io::stdout(), &report).unwrap();
//! ```
//!
//! # Core Concepts
//! - A [`Polynomial`] is a mathematical function returning a value `y` for a given input `x`.
//!     - Coefficients are stored highest power first.
//!     - It can be evaluated anywhere, including far outside the data it came from.
//! - A [`CurveFit`] is a polynomial fitted to a set of data points.
//!     - It remembers its data, so it can report residuals and R².
//!     - [`CurveFit::y`] only answers inside the `x` range of its data; use the polynomial to extrapolate.
//! - Years are never fitted directly. Every series is shifted to `x = year - base_year` first,
//!   which keeps the powers of `x` small.
//!
//! # Implementation Details
//!
//! The fit solves the Vandermonde system with an SVD from `nalgebra`, which stays stable when the
//! normal equations would not.
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)] // Sample counts are tiny
#![allow(clippy::similar_names)] //       x, xs, y, ys

pub mod test;

pub mod analysis;
pub mod dataset;
pub mod display;
pub mod error;
pub mod plotting;
pub mod polynomial;
pub mod report;
pub mod statistics;
pub mod value;

mod fit;

pub use fit::*;
pub use polynomial::Polynomial;

pub use nalgebra;
