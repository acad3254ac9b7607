//! Utilities for displaying and formatting polynomials
//!
//! This module turns coefficient sequences (highest power first) into
//! human-readable equations such as
//! `y = 2.5x^2 - 3x + 1 (where x = year - 1960)`.
//!
//! # Key Concepts
//! - **[`Term`]**: Represents a single polynomial term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping negligible ones.
//! - [`format_variable`]: Renders `x` raised to a power.
//!
//! By default coefficients are written with the shortest representation that
//! parses back to the same value, so an equation string can be read back into
//! the exact coefficients that produced it.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

/// Coefficients with a magnitude below this are left out of equations
pub const NEGLIGIBLE_COEFFICIENT: f64 = 1e-10;

/// Precision used for equations in chart captions
pub const CAPTION_PRECISION: usize = 6;

/// Represents the sign of a polynomial term.
///
/// Used when formatting polynomial expressions to determine how a term
/// should be connected to the rest of the polynomial (e.g., with `+` or `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use popfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// Represents a single term of a polynomial for display purposes.
///
/// A `Term` combines the **sign** and the **formatted body** of a polynomial
/// component (e.g., `"2x^2"`, `"3.14"`, `"x"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term, without its sign.
    pub body: String,
}

impl Term {
    /// Creates a new polynomial term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Formats the term for `coef · x^degree`.
    ///
    /// Returns `None` when the coefficient is negligible.
    pub fn from_coef<T: Value>(coef: T, degree: i32, precision: Option<usize>) -> Option<Self> {
        let coef_str = format_coefficient(coef, degree, precision)?;
        let body = format!("{coef_str}{}", format_variable("x", degree));
        Some(Self::new(Sign::from_coef(coef), body))
    }
}

/// Formats the magnitude of a coefficient for display in a polynomial term.
///
/// - Returns `None` if the magnitude is below [`NEGLIGIBLE_COEFFICIENT`].
/// - Returns an empty string for a unit coefficient on a non-constant term (`x`, not `1x`).
/// - Otherwise formats `|coef|`, to `precision` decimals if given, or with the
///   shortest representation that parses back to the same value.
///
/// # Example
/// ```
/// # use popfit::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, None), None);
/// assert_eq!(format_coefficient(-2.5, 1, None), Some("2.5".to_string()));
/// assert_eq!(format_coefficient(2.5, 1, Some(2)), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1.0, 2, None), Some(String::new()));
/// ```
pub fn format_coefficient<T: Value>(
    coef: T,
    degree: i32,
    precision: Option<usize>,
) -> Option<String> {
    let abs = Value::abs(coef);
    let threshold = T::try_cast(NEGLIGIBLE_COEFFICIENT).ok()?;

    if abs < threshold {
        return None;
    }

    if degree != 0 && Value::abs(abs - T::one()) <= T::epsilon() {
        return Some(String::new());
    }

    Some(match precision {
        Some(precision) => format!("{abs:.precision$}"),
        None => format!("{abs}"),
    })
}

/// Formats the variable part of a polynomial term.
///
/// # Examples
/// ```
/// # use popfit::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 3), "x^3");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}^{exp}"),
    }
}

/// Writes `y = ...` for coefficients given highest power first.
///
/// - The first non-negligible term is written without a leading `+`; a negative one gets a bare `-`.
/// - Subsequent terms are joined with ` + ` or ` - `.
/// - If every term is negligible the result is `y = 0`.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
pub fn write_polynomial<T: Value, W: std::fmt::Write>(
    buffer: &mut W,
    coefficients: &[T],
    precision: Option<usize>,
) -> std::fmt::Result {
    let degree = coefficients.len().saturating_sub(1);
    let mut terms = coefficients
        .iter()
        .enumerate()
        .filter_map(|(i, &coef)| Term::from_coef(coef, (degree - i) as i32, precision));

    write!(buffer, "y = ")?;
    let Some(first) = terms.next() else {
        return write!(buffer, "0");
    };

    if first.sign == Sign::Negative {
        write!(buffer, "{}", first.sign.char())?;
    }
    write!(buffer, "{}", first.body)?;

    for term in terms {
        write!(buffer, " {} {}", term.sign.char(), term.body)?;
    }

    Ok(())
}

/// Formats an equation for coefficients given highest power first, noting the year substitution.
///
/// Coefficients keep full precision, so the string can be parsed back into the same values.
///
/// # Example
/// ```
/// # use popfit::display::format_equation;
/// assert_eq!(
///     format_equation(&[2.5, -3.0, 1.0], 1960),
///     "y = 2.5x^2 - 3x + 1 (where x = year - 1960)"
/// );
/// ```
#[must_use]
pub fn format_equation<T: Value>(coefficients: &[T], base_year: i32) -> String {
    equation_string(coefficients, base_year, None)
}

/// Formats an equation like [`format_equation`], rounding coefficients to `precision` decimals.
#[must_use]
pub fn format_equation_with_precision<T: Value>(
    coefficients: &[T],
    base_year: i32,
    precision: usize,
) -> String {
    equation_string(coefficients, base_year, Some(precision))
}

fn equation_string<T: Value>(coefficients: &[T], base_year: i32, precision: Option<usize>) -> String {
    let mut output = String::new();
    write_polynomial(&mut output, coefficients, precision).expect("String should be infallible");
    output.push_str(&format!(" (where x = year - {base_year})"));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads an equation produced by [`format_equation`] back into coefficients, highest power first.
    fn parse_equation(equation: &str, degree: usize) -> Vec<f64> {
        let body = equation
            .strip_prefix("y = ")
            .and_then(|s| s.split(" (where").next())
            .unwrap();

        let mut coefs = vec![0.0; degree + 1];
        if body == "0" {
            return coefs;
        }

        // Normalize "a - b + c" into signed tokens
        let mut sign = 1.0;
        let mut first = true;
        for token in body.split(' ') {
            match token {
                "+" => sign = 1.0,
                "-" => sign = -1.0,
                term => {
                    let (term, lead_sign) = match term.strip_prefix('-') {
                        Some(rest) if first => (rest, -1.0),
                        _ => (term, 1.0),
                    };
                    first = false;

                    let (coef, power) = match term.split_once('x') {
                        None => (term, 0),
                        Some((c, rest)) => {
                            let power = rest.strip_prefix('^').map_or(1, |p| p.parse().unwrap());
                            (c, power)
                        }
                    };
                    let coef: f64 = if coef.is_empty() { 1.0 } else { coef.parse().unwrap() };
                    coefs[degree - power] = sign * lead_sign * coef;
                }
            }
        }
        coefs
    }

    #[test]
    fn test_sign_from_coef() {
        assert_eq!(Sign::from_coef(1.0), Sign::Positive);
        assert_eq!(Sign::from_coef(-1.0), Sign::Negative);
        assert_eq!(Sign::from_coef(0.0), Sign::Positive);
    }

    #[test]
    fn test_sign_char() {
        assert_eq!(Sign::Positive.char(), '+');
        assert_eq!(Sign::Negative.char(), '-');
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(2.5, 1, None), Some("2.5".to_string()));
        assert_eq!(format_coefficient(-2.5, 1, None), Some("2.5".to_string()));
        assert_eq!(format_coefficient(1.0, 0, None), Some("1".to_string()));
        assert_eq!(format_coefficient(-1.0, 3, None), Some(String::new()));
        assert_eq!(
            format_coefficient(1234.5678912, 2, Some(6)),
            Some("1234.567891".to_string())
        );
    }

    #[test]
    fn test_format_coefficient_negligible() {
        assert_eq!(format_coefficient(0.0, 1, None), None);
        assert_eq!(format_coefficient(9e-11, 1, None), None);
        assert_eq!(format_coefficient(-9e-11, 0, None), None);
        assert!(format_coefficient(2e-10, 1, None).is_some());
    }

    #[test]
    fn test_format_variable() {
        assert_eq!(format_variable("x", 0), "");
        assert_eq!(format_variable("x", 1), "x");
        assert_eq!(format_variable("x", 2), "x^2");
    }

    #[test]
    fn test_negative_terms_use_subtraction() {
        let s = format_equation(&[-2.0, -3.5, 4.0, -1.25], 1960);
        assert_eq!(s, "y = -2x^3 - 3.5x^2 + 4x - 1.25 (where x = year - 1960)");
        assert!(!s.contains("+ -"));
    }

    #[test]
    fn test_skips_negligible_terms() {
        let s = format_equation(&[3.0, 1e-12, -7.0], 1994);
        assert_eq!(s, "y = 3x^2 - 7 (where x = year - 1994)");

        let s = format_equation(&[1e-11, 0.0, 0.0], 1960);
        assert_eq!(s, "y = 0 (where x = year - 1960)");

        let s = format_equation(&[0.0, 0.0, 5.0], 1960);
        assert_eq!(s, "y = 5 (where x = year - 1960)");
    }

    #[test]
    fn test_precision_for_captions() {
        let s = format_equation_with_precision(&[-4112.25, 3210987.5, 87_654_321.0], 1960, 6);
        assert_eq!(
            s,
            "y = -4112.250000x^2 + 3210987.500000x + 87654321.000000 (where x = year - 1960)"
        );
    }

    #[test]
    fn test_equation_round_trips() {
        let cases: [&[f64]; 5] = [
            &[-1_234.567_890_123, 3_456_789.012_345, 87_654_321.987_654],
            &[-0.000_123_456_789, 0.012_345_678_9, -0.004_321, 0.000_2],
            &[1.0, 0.0, -1.0],
            &[-1.0, 2.0],
            &[42.0],
        ];

        for coefs in cases {
            let degree = coefs.len() - 1;
            let equation = format_equation(coefs, 1960);
            let parsed = parse_equation(&equation, degree);
            for (a, b) in coefs.iter().zip(&parsed) {
                assert!(
                    (a - b).abs() <= NEGLIGIBLE_COEFFICIENT,
                    "{equation}: {a} != {b}"
                );
            }
        }
    }
}
