//! Rendering an analysis to a PNG chart with `plotters`.
//!
//! The chart is a 3×2 grid:
//! - row 1 (full width): population samples, fitted curve, missing-year estimates and projection;
//! - row 2 (full width): the same for the internet percentage;
//! - row 3: residuals of each model around a zero line;
//!
//! followed by both equations under the grid.
//!
//! What goes on the chart is computed by [`SeriesChart::from_analysis`], which
//! does not draw anything. [`render_chart`] draws it.
//!
//! Text uses the system sans-serif font.
use std::path::Path;

use plotters::{coord::Shift, prelude::*};

use crate::analysis::AnalysisReport;

mod element;
pub use element::*;

const MAX_LBL_WIDTH: usize = 120;

/// Options for the chart image
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Size of the output image in pixels
    pub size: (u32, u32),

    /// Font size of panel captions
    pub title_font_size: f64,

    /// Font size of axis labels, legends and the footer
    pub label_font_size: f64,

    /// Height of the strip under the grid holding the equations, in pixels
    pub footer_height: u32,
}
impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size: (1600, 2000),
            title_font_size: 24.0,
            label_font_size: 16.0,
            footer_height: 90,
        }
    }
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Draws the chart for `report` to a PNG file at `path`.
///
/// # Errors
/// Returns an error if the image cannot be drawn or written.
pub fn render_chart<'a>(
    path: &'a Path,
    report: &AnalysisReport,
    options: &ChartOptions,
) -> Result<(), Error<'a>> {
    let chart = SeriesChart::from_analysis(report);
    tracing::debug!(path = %path.display(), size = ?options.size, "rendering chart");

    let root = BitMapBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE)?;

    let grid_height: i32 = cast(options.size.1.saturating_sub(options.footer_height))?;
    let (grid, footer) = root.split_vertically(grid_height);

    let rows = grid.split_evenly((3, 1));
    let [top, middle, bottom] = &rows[..] else {
        return Err(Error::Layout);
    };
    let residuals = bottom.split_evenly((1, 2));
    let [left, right] = &residuals[..] else {
        return Err(Error::Layout);
    };

    for (area, panel) in [top, middle, left, right].into_iter().zip(chart.panels()) {
        draw_panel(area, panel, options)?;
    }
    draw_footer(&footer, &chart.footer, options)?;

    root.present()?;
    tracing::info!(path = %path.display(), "chart saved");
    Ok(())
}

fn draw_panel<'a>(area: &Area<'a>, panel: &Panel, options: &ChartOptions) -> Result<(), Error<'a>> {
    let label_font = FontDesc::new(FontFamily::SansSerif, options.label_font_size, FontStyle::Normal);

    let x_range = panel.x_range();
    let y_range = panel.y_range();
    let y_precision = axis_precision(y_range.end - y_range.start);
    let mut context = ChartBuilder::on(area);
    context
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .caption(
            &panel.title,
            FontDesc::new(FontFamily::SansSerif, options.title_font_size, FontStyle::Normal),
        );
    let mut context = context.build_cartesian_2d(x_range.clone(), y_range)?;

    context
        .configure_mesh()
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .light_line_style(BLACK.mix(0.05))
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| axis_value(*v, y_precision))
        .draw()?;

    for element in &panel.elements {
        match element {
            PlottingElement::Data(points, label) => {
                let style = BLUE.filled();
                context
                    .draw_series(points.iter().map(|&p| Circle::new(p, 4, style)))?
                    .label(short_label(label))
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, style));
            }

            PlottingElement::Residuals(points) => {
                let style = RGBColor(255, 165, 0).filled();
                context.draw_series(points.iter().map(|&p| Circle::new(p, 4, style)))?;
            }

            PlottingElement::Curve(points, label) => {
                let style = ShapeStyle::from(&RED).stroke_width(2);
                context
                    .draw_series(LineSeries::new(points.iter().copied(), style))?
                    .label(short_label(label))
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }

            PlottingElement::Markers(points, MarkerShape::Square, label) => {
                let style = GREEN.filled();
                context
                    .draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p) + Rectangle::new([(-6, -6), (6, 6)], style)
                    }))?
                    .label(short_label(label))
                    .legend(move |(x, y)| Rectangle::new([(x + 4, y - 6), (x + 16, y + 6)], style));
            }

            PlottingElement::Markers(points, MarkerShape::Star, label) => {
                let style = ShapeStyle::from(&RGBColor(128, 0, 128)).stroke_width(3);
                context
                    .draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p)
                            + PathElement::new(vec![(-10, 0), (10, 0)], style)
                            + PathElement::new(vec![(0, -10), (0, 10)], style)
                            + Cross::new((0, 0), 7, style)
                    }))?
                    .label(short_label(label))
                    .legend(move |(x, y)| Cross::new((x + 10, y), 6, style));
            }

            PlottingElement::Baseline(y) => {
                let style = ShapeStyle::from(&RED).stroke_width(2);
                context.draw_series(LineSeries::new(
                    [(x_range.start, *y), (x_range.end, *y)],
                    style,
                ))?;
            }
        }
    }

    if panel.legend {
        context
            .configure_series_labels()
            .label_font(label_font)
            .background_style(WHITE.mix(0.5))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    Ok(())
}

fn draw_footer<'a>(area: &Area<'a>, lines: &[String], options: &ChartOptions) -> Result<(), Error<'a>> {
    let style = TextStyle::from(FontDesc::new(
        FontFamily::SansSerif,
        options.label_font_size,
        FontStyle::Normal,
    ))
    .color(&BLACK);

    let line_height: i32 = cast(options.label_font_size * 1.6)?;
    for (i, line) in lines.iter().enumerate() {
        let y = 15 + line_height * cast::<_, i32>(i)?;
        area.draw_text(line, &style, (160, y))?;
    }
    Ok(())
}

/// Formats an axis value: large magnitudes with thousands separators, small ones to `precision` decimals.
fn axis_value(v: f64, precision: usize) -> String {
    if v.abs() >= 1000.0 {
        return crate::report::format_thousands(v);
    }

    let s = format!("{v:.precision$}");
    match s.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => s,
    }
}

/// Decimals needed to tell ticks apart on an axis spanning `span`.
fn axis_precision(span: f64) -> usize {
    if !span.is_finite() || span <= 0.0 {
        return 1;
    }

    let digits = (-span.log10()).ceil() + 1.0;
    num_traits::cast(digits.clamp(1.0, 12.0)).unwrap_or(1)
}

/// Shorten label and add [...] if too long
fn short_label(label: &str) -> String {
    if label.chars().count() > MAX_LBL_WIDTH {
        let mut s: String = label.chars().take(MAX_LBL_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        label.to_string()
    }
}

fn cast<'root, T: num_traits::NumCast, U: num_traits::NumCast>(value: T) -> Result<U, Error<'root>> {
    num_traits::cast(value).ok_or(Error::Cast)
}

/// Error occurring during plotting
#[derive(Debug, thiserror::Error)]
pub enum Error<'root> {
    /// Error drawing the plot
    #[error("Error drawing plot: {0}")]
    Draw(#[from] DrawingAreaErrorKind<<BitMapBackend<'root> as DrawingBackend>::ErrorType>),

    /// The drawing area could not be split into the grid
    #[error("Could not lay out the chart grid")]
    Layout,

    /// Error casting a value
    #[error("A value could not be represented in pixels")]
    Cast,
}
