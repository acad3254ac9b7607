//! Goodness-of-fit diagnostics for fitted curves
//!
//! Every function takes the observed values and the model's predictions as two
//! iterators of equal length, paired element by element.
//!
//! # Model Fit
//! - [`r_squared`]: Share of the variation in the observations explained by the model (0 to 1).
//!
//! # Error Metrics
//! - [`mean_squared_error`]: Average squared residual.
//! - [`root_mean_squared_error`]: Square root of the MSE, in the units of the data.
//!
//! # Example
//! ```rust
//! use popfit::statistics::{r_squared, root_mean_squared_error};
//!
//! let population = vec![87.8, 90.1, 92.5];
//! let model = vec![87.9, 90.0, 92.5];
//!
//! let r2 = r_squared(population.iter().copied(), model.iter().copied());
//! let rmse = root_mean_squared_error(population.into_iter(), model.into_iter());
//! assert!(r2 > 0.99 && rmse < 0.1);
//! ```
use crate::value::Value;

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns `NaN` if the iterator yields no elements.
///
/// ```rust
/// let m = popfit::statistics::mean(vec![1.0, 2.0, 3.0].into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Calculates the coefficient of determination of a model.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - SS_res / SS_tot
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// A constant series has `SS_tot = 0`; the result is then `1` for an exact
/// model and `-inf` otherwise, rather than `NaN`.
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total == T::zero() {
        return if ss_residual == T::zero() {
            T::one()
        } else {
            T::neg_infinity()
        };
    }

    T::one() - ss_residual / ss_total
}

/// Computes the mean squared error between observations and predictions.
///
/// ```
/// # use popfit::statistics::mean_squared_error;
/// let mse = mean_squared_error(vec![1.0, 2.0].into_iter(), vec![2.0, 4.0].into_iter());
/// assert_eq!(mse, 2.5);
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
        n += T::one();
    }
    total / n
}

/// Computes the root mean squared error between observations and predictions.
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean_squared_error(y, y_fit).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn mean_basic() {
        assert_eq!(mean(vec![2.0, 4.0, 9.0].into_iter()), 5.0);
        assert!(mean(Vec::<f64>::new().into_iter()).is_nan());
    }

    #[test]
    fn r_squared_perfect_fit() {
        let y = vec![1.0, 4.0, 9.0, 16.0];
        assert_eq!(r_squared(y.clone().into_iter(), y.into_iter()), 1.0);
    }

    #[test]
    fn r_squared_mean_model_is_zero() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        assert_close!(r_squared(y.into_iter(), y_fit.into_iter()), 0.0);
    }

    #[test]
    fn r_squared_known_value() {
        // SS_tot = 2, SS_res = 0.01 + 0.01 + 0.0025
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![1.1, 1.9, 3.05];
        assert_close!(
            r_squared(y.into_iter(), y_fit.into_iter()),
            1.0 - 0.0225 / 2.0,
            tol = 1e-12
        );
    }

    #[test]
    fn r_squared_constant_series() {
        let y = vec![5.0, 5.0, 5.0];
        assert_eq!(r_squared(y.clone().into_iter(), y.clone().into_iter()), 1.0);

        let off = vec![5.0, 6.0, 5.0];
        assert_eq!(
            r_squared(y.into_iter(), off.into_iter()),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn error_metrics() {
        let y = vec![-1.0, -2.0];
        let y_fit = vec![1.0, 2.0];
        assert_eq!(
            mean_squared_error(y.clone().into_iter(), y_fit.clone().into_iter()),
            10.0
        );
        assert_close!(
            root_mean_squared_error(y.into_iter(), y_fit.into_iter()),
            10.0_f64.sqrt()
        );
    }

    #[test]
    fn mse_is_symmetric() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        assert_eq!(
            mean_squared_error(y.clone().into_iter(), y_fit.clone().into_iter()),
            mean_squared_error(y_fit.into_iter(), y.into_iter())
        );
    }
}
