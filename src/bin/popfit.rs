use std::path::Path;

use anyhow::{anyhow, Context};
use popfit::{
    analysis::{analyze, AnalysisConfig},
    dataset::Dataset,
    plotting::{render_chart, ChartOptions},
    report::print_report,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "Data Tugas Pemrograman A.csv";
const DEFAULT_OUTPUT: &str = "visualisasi_fitting_kurva.png";

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    //
    // Positional arguments: input table, then output image.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        eprintln!("Usage: popfit [input.csv|input.json] [output.png]");
        eprintln!("  input   defaults to \"{DEFAULT_INPUT}\"");
        eprintln!("  output  defaults to \"{DEFAULT_OUTPUT}\"");
        return Ok(());
    }
    let input = Path::new(args.first().map_or(DEFAULT_INPUT, String::as_str));
    let output = Path::new(args.get(1).map_or(DEFAULT_OUTPUT, String::as_str));

    let dataset = Dataset::from_path(input)
        .with_context(|| format!("Failed to load dataset from {}", input.display()))?;
    tracing::info!(path = %input.display(), rows = dataset.len(), "loaded dataset");

    let config = AnalysisConfig::default();
    let report = analyze(&dataset, &config).context("Failed to fit the series")?;

    print_report(&mut std::io::stdout(), &report).context("Failed to write the report")?;

    render_chart(output, &report, &ChartOptions::default())
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("Failed to render chart to {}", output.display()))?;
    println!();
    println!("Chart saved to {}", output.display());

    Ok(())
}
