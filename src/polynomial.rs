//! Polynomial models and their evaluation.
//!
//! A [`Polynomial`] holds coefficients highest power first and evaluates them
//! with Horner's method at any x. [`evaluate`] and [`evaluate_many`] do the
//! same for a raw coefficient slice.
use std::{borrow::Cow, ops::RangeInclusive};

use crate::{
    display,
    error::{Error, Result},
    statistics,
    value::{CoordExt, SteppedValues, Value},
};

/// Represents a polynomial function in powers of `x`.
///
/// Unlike [`crate::CurveFit`], this struct is **not tied to any dataset**, making it a canonical function that
/// can be evaluated for **any x-value** without range restrictions. Interpolation and extrapolation
/// are the same call; interpreting a value outside the fitted range as a projection is up to the caller.
///
/// Coefficients are stored **highest power first**:
/// `[a, b, c]` is `y = ax² + bx + c`.
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a new polynomial from its coefficients, highest power first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModel`] if `coefficients` is empty.
    ///
    /// # Example
    /// ```
    /// # use popfit::Polynomial;
    /// let poly = Polynomial::new(vec![1.0, 0.0, 1.0]).unwrap(); // x² + 1
    /// assert_eq!(poly.degree(), 2);
    /// assert_eq!(poly.y(4.0), 17.0);
    /// ```
    pub fn new(coefficients: impl Into<Cow<'a, [T]>>) -> Result<Self> {
        let coefficients = coefficients.into();
        if coefficients.is_empty() {
            return Err(Error::InvalidModel);
        }

        Ok(Self { coefficients })
    }

    /// Creates a polynomial borrowing its coefficients, highest power first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModel`] if `coefficients` is empty.
    pub fn borrowed(coefficients: &'a [T]) -> Result<Self> {
        Self::new(coefficients)
    }

    /// Returns a reference to the polynomial's coefficients, highest power first.
    ///
    /// For example in the expression `y(x) = 2x^2 - 3x + 1`;
    /// coefficients = [2.0, -3.0, 1.0]
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial.
    ///
    /// The number of coefficients is always `degree + 1`.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluates the polynomial at a given x-value using Horner's method.
    ///
    /// ```math
    /// y(x) = Σ c_i · x^(degree - i)
    /// ```
    ///
    /// # Example
    /// ```
    /// # use popfit::Polynomial;
    /// let poly = Polynomial::new(vec![3.0, 2.0, 1.0]).unwrap(); // 3x² + 2x + 1
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        self.coefficients
            .iter()
            .fold(T::zero(), |acc, &coef| acc * x + coef)
    }

    /// Evaluates the polynomial at each x-value, preserving order and length.
    pub fn evaluate_many(&self, x: impl IntoIterator<Item = T>) -> Vec<T> {
        x.into_iter().map(|x| self.y(x)).collect()
    }

    /// Evaluates the polynomial at multiple x-values.
    ///
    /// # Returns
    /// A `Vec` of `(x, y)` pairs corresponding to each input value.
    ///
    /// # Example
    /// ```
    /// # use popfit::Polynomial;
    /// let poly = Polynomial::new(vec![3.0, 2.0, 1.0]).unwrap(); // 3x² + 2x + 1
    /// let points = poly.solve(vec![0.0, 1.0, 2.0]);
    /// assert_eq!(points, vec![(0.0, 1.0), (1.0, 6.0), (2.0, 17.0)]);
    /// ```
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Evaluates the polynomial over a range of x-values with a fixed step.
    pub fn solve_range(&self, range: RangeInclusive<T>, step: T) -> Vec<(T, T)> {
        self.solve(SteppedValues::new(range, step))
    }

    /// Calculates the R-squared value for the model compared to provided data.
    ///
    /// See [`statistics::r_squared`] for more details.
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        let y_fit = self.evaluate_many(data.x_iter());
        statistics::r_squared(data.y_iter(), y_fit.into_iter())
    }

    /// Returns a human-readable string of the polynomial equation.
    ///
    /// See [`display::format_equation`]; `base_year` names the offset
    /// subtracted from calendar years before fitting.
    #[must_use]
    pub fn equation(&self, base_year: i32) -> String {
        display::format_equation(&self.coefficients, base_year)
    }
}

impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::write_polynomial(f, &self.coefficients, None)
    }
}

/// Evaluates raw coefficients (highest power first) at `x`.
///
/// # Errors
/// Returns [`Error::InvalidModel`] if `coefficients` is empty.
pub fn evaluate<T: Value>(coefficients: &[T], x: T) -> Result<T> {
    Ok(Polynomial::borrowed(coefficients)?.y(x))
}

/// Evaluates raw coefficients (highest power first) at every x, preserving order and length.
///
/// # Errors
/// Returns [`Error::InvalidModel`] if `coefficients` is empty.
pub fn evaluate_many<T: Value>(
    coefficients: &[T],
    x: impl IntoIterator<Item = T>,
) -> Result<Vec<T>> {
    Ok(Polynomial::borrowed(coefficients)?.evaluate_many(x))
}
