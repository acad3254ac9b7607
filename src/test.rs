//! Assertion macros for testing fits and numeric output.
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal.
//! - Uses the machine epsilon for the type as the tolerance, or `tol = <expr>` if given.
//! - `assert_eq!` equivalent for floats.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] for two sequences of the same length.
//!
//! ### [`crate::assert_r_squared`]
//! Asserts that a [`crate::CurveFit`] explains its samples at least as well as a given R².
//! See [`crate::CurveFit::r_squared`] for more details.
//!
//! ```rust
//! # use popfit::{CurveFit, assert_close, assert_r_squared};
//! let data = [(0.0, 1.0), (1.0, 2.1), (2.0, 4.9), (3.0, 10.2)];
//! let fit = CurveFit::new(&data[..], 2).unwrap();
//! assert_r_squared!(fit, 0.99);
//! assert_close!(fit.as_polynomial().y(0.0), 1.0, tol = 0.2);
//! ```
