use std::{borrow::Cow, ops::RangeInclusive};

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    error::{Error, Result},
    statistics,
    value::{CoordExt, SteppedValues, Value},
    Polynomial,
};

/// Represents a least-squares polynomial fit to a set of `(x, y)` samples.
///
/// A `CurveFit` keeps the samples it was computed from and their x-range.
/// [`CurveFit::y`] only answers for x-values inside that range. To interpolate
/// gaps or project past the data, use [`CurveFit::as_polynomial`], which
/// drops the restriction.
///
/// The fitted model is stored as a [`Polynomial`], coefficients highest power first.
///
/// # Type Parameters
/// - `'data`: Lifetime of the borrowed samples, if borrowed.
/// - `T`: Numeric type, default is `f64`.
///
/// # Example
/// ```
/// # use popfit::CurveFit;
/// let data = [(0.0, 1.0), (1.0, 2.0), (2.0, 5.0), (3.0, 10.0)];
/// let fit = CurveFit::new(&data[..], 2).unwrap();
/// let poly = fit.as_polynomial();
/// let y: f64 = poly.y(4.0);
/// assert!((y - 17.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit<'data, T: Value = f64> {
    data: Cow<'data, [(T, T)]>,
    x_range: RangeInclusive<T>,
    function: Polynomial<'static, T>,
}
impl<'data, T: Value> CurveFit<'data, T> {
    /// Builds the Vandermonde design matrix and the observation vector.
    ///
    /// Row `i` is `[1, x_i, x_i^2, ..., x_i^(k-1)]`.
    fn create_matrix(data: &[(T, T)], k: usize) -> (DMatrix<T>, DVector<T>) {
        let mut bigx = DMatrix::zeros(data.len(), k);
        let b = DVector::from_iterator(data.len(), data.iter().map(|&(_, y)| y));

        for (mut row, &(x, _)) in bigx.row_iter_mut().zip(data.iter()) {
            let mut power = T::one();
            for j in 0..k {
                row[j] = power;
                power *= x;
            }
        }

        (bigx, b)
    }

    /// Solves `A * c = b` in the least-squares sense using SVD.
    ///
    /// Returned coefficients are lowest power first, matching the matrix columns.
    fn solve_matrix(matrix: DMatrix<T>, b: &DVector<T>) -> Result<Vec<T>> {
        let size = matrix.shape();

        let decomp = SVD::new_unordered(matrix, true, true);

        // ~= machine_epsilon * max(size) * max_singular
        let machine_epsilon = T::epsilon();
        let max_size = size.0.max(size.1);
        let sigma_max = decomp.singular_values.max();
        let epsilon = machine_epsilon * T::try_cast(max_size)? * sigma_max;

        let big_x = decomp.solve(b, epsilon).map_err(Error::Algebra)?;
        let coefficients: Vec<_> = big_x.data.into();

        if coefficients.iter().any(|c| c.is_nan()) {
            return Err(Error::Algebra("NaN in coefficients"));
        }

        Ok(coefficients)
    }

    /// Fits a polynomial of the given degree to `(x, y)` samples by ordinary least squares.
    ///
    /// # Errors
    /// - [`Error::InsufficientData`] if there are fewer than `degree + 1` samples.
    /// - [`Error::Algebra`] if the least-squares system cannot be solved.
    /// - [`Error::CastFailed`] if the sample count cannot be represented as `T`.
    ///
    /// # Example
    /// ```
    /// # use popfit::CurveFit;
    /// let data = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
    /// let fit = CurveFit::new(data, 2).unwrap();
    /// assert_eq!(fit.coefficients().len(), 3);
    /// ```
    pub fn new(data: impl Into<Cow<'data, [(T, T)]>>, degree: usize) -> Result<Self> {
        let data: Cow<_> = data.into();

        let k = degree + 1;
        if data.len() < k {
            return Err(Error::InsufficientData {
                samples: data.len(),
                degree,
            });
        }

        let x_range = data
            .x_range()
            .map(|r| r.start..=r.end)
            .ok_or(Error::InsufficientData { samples: 0, degree })?;

        let (m, b) = Self::create_matrix(&data, k);
        let mut coefs = Self::solve_matrix(m, &b)?;
        coefs.reverse();

        let function = Polynomial::new(coefs)?;
        Ok(Self {
            data,
            x_range,
            function,
        })
    }

    /// Fits a polynomial to separate x and y sequences.
    ///
    /// # Errors
    /// - [`Error::DimensionMismatch`] if `x` and `y` differ in length.
    /// - Anything [`CurveFit::new`] returns.
    pub fn from_xy(x: &[T], y: &[T], degree: usize) -> Result<CurveFit<'static, T>> {
        if x.len() != y.len() {
            return Err(Error::DimensionMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        let data: Vec<(T, T)> = x.iter().copied().zip(y.iter().copied()).collect();
        CurveFit::new(data, degree)
    }

    /// Returns an owned version of this curve fit, with a full copy of the data.
    #[must_use]
    pub fn to_owned(&self) -> CurveFit<'static, T> {
        CurveFit {
            data: Cow::Owned(self.data.to_vec()),
            x_range: self.x_range.clone(),
            function: self.function.clone(),
        }
    }

    /// Returns the degree of the fitted polynomial.
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// Returns the fitted coefficients, highest power first.
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Returns the samples the fit was computed from.
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the inclusive range of x-values in the samples.
    pub fn x_range(&self) -> RangeInclusive<T> {
        self.x_range.clone()
    }

    /// Evaluates the fit at `x`, which must lie within [`CurveFit::x_range`].
    ///
    /// # Errors
    /// Returns [`Error::DataRange`] if `x` is outside the fitted samples.
    /// Use [`CurveFit::as_polynomial`] to extrapolate.
    pub fn y(&self, x: T) -> Result<T> {
        if !self.x_range.contains(&x) {
            return Err(Error::DataRange(
                format!("{}", self.x_range.start()),
                format!("{}", self.x_range.end()),
            ));
        }

        Ok(self.function.y(x))
    }

    /// Returns the model's `(x, y)` at every sample x, in sample order.
    pub fn solution(&self) -> Vec<(T, T)> {
        self.function.solve(self.data.x_iter())
    }

    /// Evaluates the fit at multiple x-values.
    ///
    /// # Errors
    /// Returns [`Error::DataRange`] on the first x-value outside the fitted samples.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Result<Vec<(T, T)>> {
        x.into_iter().map(|x| Ok((x, self.y(x)?))).collect()
    }

    /// Evaluates the fit over its own x-range with a fixed step.
    pub fn solve_range(&self, step: T) -> Vec<(T, T)> {
        let range = self.x_range();
        self.function.solve(SteppedValues::new(range, step))
    }

    /// Computes the residual `y_i - f(x_i)` at each sample, as `(x, residual)` pairs.
    pub fn residuals(&self) -> Vec<(T, T)> {
        self.data
            .iter()
            .map(|&(x, y)| (x, y - self.function.y(x)))
            .collect()
    }

    /// Mean squared residual over the samples.
    pub fn mean_squared_error(&self) -> T {
        let y_fit = self.function.evaluate_many(self.data.x_iter());
        statistics::mean_squared_error(self.data.y_iter(), y_fit.into_iter())
    }

    /// Root mean squared residual over the samples, in the units of `y`.
    pub fn root_mean_squared_error(&self) -> T {
        let y_fit = self.function.evaluate_many(self.data.x_iter());
        statistics::root_mean_squared_error(self.data.y_iter(), y_fit.into_iter())
    }

    /// Coefficient of determination of the fit against its own samples.
    ///
    /// See [`statistics::r_squared`].
    pub fn r_squared(&self) -> T {
        self.function.r_squared(&self.data)
    }

    /// Returns a reference to the fitted polynomial, which evaluates anywhere.
    pub fn as_polynomial(&self) -> &Polynomial<'static, T> {
        &self.function
    }

    /// Consumes the fit, returning the fitted polynomial.
    pub fn into_polynomial(self) -> Polynomial<'static, T> {
        self.function
    }

    /// Returns the equation of the fit, noting the year substitution.
    ///
    /// See [`crate::display::format_equation`].
    #[must_use]
    pub fn equation(&self, base_year: i32) -> String {
        self.function.equation(base_year)
    }

    /// Returns a serializable summary of the fit.
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            data_points: self.data.len(),
            coefficients: self.coefficients().to_vec(),
            mse: self.mean_squared_error(),
            r_squared: self.r_squared(),
        }
    }
}

impl<T: Value> AsRef<Polynomial<'static, T>> for CurveFit<'_, T> {
    fn as_ref(&self) -> &Polynomial<'static, T> {
        &self.function
    }
}

impl<T: Value> std::fmt::Display for CurveFit<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)
    }
}

/// A set of diagnostic properties for a curve fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The degree of the fitted polynomial.
    pub degree: usize,

    /// The number of samples used in the fit.
    pub data_points: usize,

    /// The coefficients of the fitted polynomial, highest power first.
    pub coefficients: Vec<T>,

    /// The mean squared error of the fit.
    pub mse: T,

    /// The R² value of the fit.
    pub r_squared: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, assert_r_squared};

    #[test]
    fn test_known_quadratic() {
        let fit = CurveFit::from_xy(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 5.0, 10.0], 2).unwrap();
        assert_all_close!(fit.coefficients(), [1.0, 0.0, 1.0], tol = 1e-9);
        assert_close!(fit.as_polynomial().y(4.0), 17.0, tol = 1e-9);
    }

    #[test]
    fn test_exact_interpolation() {
        // degree = n - 1 passes through every sample
        let data = vec![(0.0, 3.0), (1.5, -2.0), (4.0, 7.25), (6.0, 1.0), (9.0, 12.0)];
        let fit = CurveFit::new(&data[..], data.len() - 1).unwrap();
        for (x, residual) in fit.residuals() {
            assert_close!(residual, 0.0, tol = 1e-8, "residual at x={}", x);
        }
    }

    #[test]
    fn test_minimum_samples() {
        let data = [(0.0, 1.0), (1.0, 4.0), (2.0, 2.0)];
        let fit = CurveFit::new(&data[..], 2).unwrap();
        assert_close!(fit.mean_squared_error(), 0.0, tol = 1e-20);

        let err = CurveFit::new(&data[..2], 2).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData {
                samples: 2,
                degree: 2
            }
        ));
    }

    #[test]
    fn test_empty_data() {
        let err = CurveFit::<f64>::new(Vec::new(), 0).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { samples: 0, .. }));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = CurveFit::from_xy(&[0.0, 1.0, 2.0], &[1.0, 2.0], 1).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { x: 3, y: 2 }));
    }

    #[test]
    fn test_normal_equations_hold() {
        // Noisy cubic, overdetermined
        let data: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let x = f64::from(i);
                let wobble = if i % 3 == 0 { 4.0 } else { -2.0 };
                (x, 0.02 * x * x * x - 0.5 * x * x + 3.0 * x + 10.0 + wobble)
            })
            .collect();
        let fit = CurveFit::new(&data[..], 3).unwrap();

        // A^T (y - A c) ~= 0, scaled by the size of each column
        let residuals = fit.residuals();
        for power in 0..=3 {
            let (dot, scale) = residuals.iter().fold((0.0, 0.0), |(dot, scale), &(x, r)| {
                let a = f64::powi(x, power);
                (dot + a * r, scale + a.abs())
            });
            assert!(
                dot.abs() <= 1e-9 * scale.max(1.0),
                "column x^{power} is not orthogonal to the residuals: {dot}"
            );
        }
        assert_r_squared!(fit, 0.99);
    }

    #[test]
    fn test_y_is_range_checked() {
        let data: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
        let fit = CurveFit::new(&data[..], 2).unwrap();
        assert!(fit.y(1.0).unwrap().is_finite());
        assert!(matches!(fit.y(-1.0), Err(Error::DataRange(_, _))));

        // The polynomial has no such restriction
        assert!(fit.as_polynomial().y(-1.0).is_finite());
    }

    #[test]
    fn test_solution_and_solve() {
        let data = [(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
        let fit = CurveFit::new(&data[..], 2).unwrap();
        assert_eq!(fit.solution().len(), data.len());
        assert_eq!(fit.solve([0.0, 2.0]).unwrap().len(), 2);
        assert!(fit.solve([3.0]).is_err());
        assert_eq!(fit.solve_range(0.5).len(), 5);
    }

    #[test]
    fn test_properties() {
        let data = [(0.0, 1.0), (1.0, 3.0), (2.0, 7.0), (3.0, 12.0)];
        let fit = CurveFit::new(&data[..], 1).unwrap();
        let props = fit.properties();
        assert_eq!(props.degree, 1);
        assert_eq!(props.data_points, 4);
        assert_eq!(props.coefficients.len(), 2);
        assert!(props.mse > 0.0);
        assert!(props.r_squared > 0.9 && props.r_squared < 1.0);

        let json = serde_json::to_string(&props).unwrap();
        let back: FitProperties<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.degree, props.degree);
    }

    #[test]
    fn test_as_and_into_polynomial() {
        let data = [(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
        let fit = CurveFit::new(&data[..], 2).unwrap();
        let borrowed = fit.as_polynomial().clone();
        let owned = fit.to_owned().into_polynomial();
        assert_eq!(borrowed.coefficients(), owned.coefficients());
        assert_eq!(fit.to_string(), borrowed.to_string());
    }
}
