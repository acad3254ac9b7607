//! Error types for loading data, fitting and evaluating polynomials
//!
//! This module defines the failure modes of the whole analysis pipeline,
//! along with a convenient `Result` alias.
//! Plotting has its own error type, see [`crate::plotting::Error`].

/// Errors that can occur while loading a dataset or fitting a curve.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there are too few samples.
    ///
    /// A polynomial of degree `d` needs at least `d + 1` samples.
    #[error("{samples} samples are not enough to fit a degree {degree} polynomial")]
    InsufficientData {
        /// Number of samples provided
        samples: usize,
        /// Requested polynomial degree
        degree: usize,
    },

    /// The x and y sequences passed to the fitter have different lengths.
    #[error("x and y must have the same length (x: {x}, y: {y})")]
    DimensionMismatch {
        /// Number of x values
        x: usize,
        /// Number of y values
        y: usize,
    },

    /// A polynomial model needs at least one coefficient.
    #[error("A polynomial model needs at least one coefficient")]
    InvalidModel,

    /// The input x-value is outside the range the fit was computed on.
    ///
    /// Use `as_polynomial` to evaluate anyway (extrapolation).
    #[error("This fit only covers the x-value range {0}..{1}. Call `as_polynomial` to extrapolate")]
    DataRange(String, String),

    /// Failed to solve the least-squares system.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// The dataset contains no rows.
    #[error("No data available in {0}")]
    NoData(String),

    /// The input file could not be read.
    #[error("Failed to read `{path}`: {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The header of the input file lacks a required column.
    #[error("Required column `{0}` is missing from the input")]
    MissingColumn(&'static str),

    /// A CSV row could not be parsed.
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the analysis pipeline
pub type Result<T> = std::result::Result<T, Error>;
