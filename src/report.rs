//! Console report of an [`AnalysisReport`].
use std::io::Write;

use crate::analysis::{AnalysisReport, SeriesAnalysis};

const RULE_WIDTH: usize = 61;

/// Rounds `value` to an integer and groups its digits in threes with `,`.
///
/// Non-finite values are written as-is.
///
/// ```
/// # use popfit::report::format_thousands;
/// assert_eq!(format_thousands(1_234_567.4), "1,234,567");
/// assert_eq!(format_thousands(-999.5), "-1,000");
/// assert_eq!(format_thousands(12.0), "12");
/// ```
#[must_use]
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Writes the estimates, equations and projections of `report`.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn print_report(out: &mut impl Write, report: &AnalysisReport) -> std::io::Result<()> {
    let config = &report.config;
    let country = &config.country;
    let population = &report.population;
    let internet = &report.internet;

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "  POPULATION AND INTERNET USAGE ESTIMATES: {}", country.to_uppercase())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;

    let mut item = Items::default();

    section(out, "1. ESTIMATES FOR MISSING YEARS")?;
    for (year, value) in &population.estimates {
        writeln!(
            out,
            "{} Population of {country} in {year}: {} people",
            item.label(),
            format_thousands(*value)
        )?;
    }
    writeln!(out)?;
    for (year, value) in &internet.estimates {
        writeln!(
            out,
            "{} Internet users in {country} in {year}: {value:.4}%",
            item.label()
        )?;
    }
    writeln!(out)?;

    let mut item = Items::default();
    section(out, "2. POLYNOMIAL EQUATIONS")?;
    equation(out, item.label(), "Percentage of internet users", internet, config.base_year)?;
    equation(out, item.label(), "Population growth", population, config.base_year)?;

    let mut item = Items::default();
    section(out, "3. PROJECTIONS")?;
    writeln!(
        out,
        "{} Population of {country} in {}: {} people",
        item.label(),
        population.projection.year,
        format_thousands(population.projection.value)
    )?;
    writeln!(
        out,
        "{} Internet users in {country} in {}: {} people",
        item.label(),
        internet.projection.year,
        format_thousands(report.internet_users)
    )?;
    writeln!(
        out,
        "   (Percentage: {:.4}% of a population of {} people)",
        internet.projection.value,
        format_thousands(report.population_at_internet_projection.value)
    )?;

    Ok(())
}

fn section(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

fn equation(
    out: &mut impl Write,
    item: String,
    title: &str,
    series: &SeriesAnalysis,
    base_year: i32,
) -> std::io::Result<()> {
    writeln!(out, "{item} {title} (degree {}, R² = {:.4}):", series.degree(), series.fit.r_squared())?;
    writeln!(out, "   {}", series.fit.equation(base_year))?;
    writeln!(out)
}

/// Produces list labels `a.`, `b.`, ...
#[derive(Default)]
struct Items(u8);
impl Items {
    fn label(&mut self) -> String {
        let label = char::from(b'a' + self.0 % 26);
        self.0 += 1;
        format!("{label}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{analyze, AnalysisConfig},
        dataset::{Dataset, Observation},
    };

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(-0.4), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(279_798_049.6), "279,798,050");
        assert_eq!(format_thousands(-1_234_567.0), "-1,234,567");
        assert_eq!(format_thousands(f64::NAN), "NaN");
    }

    #[test]
    fn test_item_labels() {
        let mut items = Items::default();
        assert_eq!(items.label(), "a.");
        assert_eq!(items.label(), "b.");
    }

    #[test]
    fn test_report_contents() {
        let observations = (1960..=2023)
            .filter(|y| ![2005, 2006, 2015, 2016].contains(y))
            .map(|year| {
                let x = f64::from(year - 1960);
                Observation {
                    year,
                    population: 1e8 + 1e6 * x + 1e4 * x * x,
                    internet_pct: if year < 1994 { 0.0 } else { 0.05 * (x - 33.0) * (x - 33.0) },
                }
            })
            .collect();
        let dataset = Dataset::new(observations).unwrap();
        let config = AnalysisConfig::default();
        let report = analyze(&dataset, &config).unwrap();

        let mut out = Vec::new();
        print_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        // 2005: x = 45 -> 1e8 + 45e6 + 20.25e6
        assert!(text.contains("Population of Indonesia in 2005: 165,250,000 people"), "{text}");
        assert!(text.contains("Internet users in Indonesia in 2016: "));
        assert!(text.contains("(where x = year - 1960)"));
        assert!(text.contains("Population of Indonesia in 2030: "));
        assert!(text.contains("in 2035: "));
        assert!(!text.contains("+ -"));
        assert!(text.contains("R² = 1.0000"));
    }
}
