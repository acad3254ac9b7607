//! Numeric types and iteration utilities for polynomial curves.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used in polynomial fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   useful for generating evaluation points for polynomials.
//!
//! # Example
//!
//! ```rust
//! use popfit::value::SteppedValues;
//!
//! // 0.0, 0.1, ..., 1.0
//! let xs: Vec<f64> = SteppedValues::new(0.0..=1.0, 0.1).collect();
//! assert_eq!(xs.len(), 11);
//!
//! // 1000 evenly spaced points, end included
//! let xs: Vec<f64> = SteppedValues::linspace(0.0..=78.0, 1000).collect();
//! assert_eq!(xs.len(), 1000);
//! ```
use std::ops::{Range, RangeInclusive};

use crate::error::Error;

/// Numeric type for curves
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Check if the value is negative
    fn is_sign_negative(&self) -> bool {
        self < &Self::zero()
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
    limit: Option<usize>,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    ///
    /// A step that is not positive yields nothing.
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        let limit = if step > T::zero() { None } else { Some(0) };
        Self {
            range,
            step,
            index: T::zero(),
            limit,
        }
    }

    /// Creates an iterator over exactly `n` evenly spaced values, both ends included.
    ///
    /// `n == 1` yields only the start of the range, and `n == 0` yields nothing.
    pub fn linspace(range: RangeInclusive<T>, n: usize) -> Self {
        let intervals = T::from_positive_int(n.saturating_sub(1).max(1));
        let step = (*range.end() - *range.start()) / intervals;
        Self {
            range,
            step,
            index: T::zero(),
            limit: Some(n),
        }
    }

    fn step_index(&self) -> Option<usize> {
        num_traits::cast(self.index)
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(limit) = self.limit {
            // Fixed count; the end is pinned so rounding never drops it
            let i = self.step_index()?;
            if i >= limit {
                return None;
            }

            self.index += T::one();
            return Some(if i + 1 == limit && limit > 1 {
                *self.range.end()
            } else {
                *self.range.start() + T::from_positive_int(i) * self.step
            });
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(value)
        } else {
            None
        }
    }
}

/// Extension trait for accessing the `x` and `y` coordinates of a type.
///
/// This trait is intended for any type that conceptually represents a 2D
/// coordinate or point.
///
/// # Examples
///
/// ```
/// # use popfit::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y_iter().sum::<f64>(), 2.0);
/// assert_eq!(data.x_range(), Some(0.0..2.0));
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates of this value.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates of this value.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the range of x-coordinates of this value.
    fn x_range(&self) -> Option<Range<T>> {
        min_max(self.x_iter()).map(|(start, end)| start..end)
    }
}
impl<T: Value> CoordExt<T> for Vec<(T, T)> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}
impl<T: Value> CoordExt<T> for [(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

fn min_max<T: Value>(values: impl Iterator<Item = T>) -> Option<(T, T)> {
    values.fold(None, |acc: Option<(T, T)>, v| {
        Some(match acc {
            Some((min, max)) => (
                nalgebra::RealField::min(min, v),
                nalgebra::RealField::max(max, v),
            ),
            None => (v, v),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = SteppedValues::new(0.0..=1.0, 0.1);
        let values: Vec<_> = range.collect();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_year_range() {
        let values: Vec<f64> = SteppedValues::new(0.0..=63.0, 1.0).collect();
        assert_eq!(values.len(), 64);
        assert_eq!(values[63], 63.0);
    }

    #[test]
    fn test_non_positive_step_is_empty() {
        assert_eq!(SteppedValues::new(0.0..=1.0, 0.0).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, -0.5).count(), 0);
        assert_eq!(SteppedValues::new(0.0..=1.0, f64::NAN).count(), 0);
    }

    #[test]
    fn test_linspace_hits_both_ends() {
        let values: Vec<f64> = SteppedValues::linspace(0.0..=78.0, 1000).collect();
        assert_eq!(values.len(), 1000);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[999], 78.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert_eq!(SteppedValues::linspace(0.0..=1.0, 0).count(), 0);
        assert_eq!(
            SteppedValues::linspace(2.0..=5.0, 1).collect::<Vec<f64>>(),
            vec![2.0]
        );
        assert_eq!(
            SteppedValues::linspace(2.0..=5.0, 2).collect::<Vec<f64>>(),
            vec![2.0, 5.0]
        );
    }

    #[test]
    fn test_coord_ranges() {
        let data = vec![(3.0, 10.0), (1.0, -4.0), (2.0, 7.5)];
        assert_eq!(data.x_range(), Some(1.0..3.0));
        assert_eq!(data.y_iter().collect::<Vec<_>>(), vec![10.0, -4.0, 7.5]);
        assert_eq!(Vec::<(f64, f64)>::new().x_range(), None);

        let slice: &[(f64, f64)] = &data;
        assert_eq!(slice.x_range(), data.x_range());
    }
}
