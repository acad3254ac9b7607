use criterion::{criterion_group, criterion_main, Criterion};
use popfit::{
    analysis::{analyze, AnalysisConfig},
    dataset::{Dataset, Observation},
    display::format_equation,
    CurveFit, Polynomial,
};
use std::hint::black_box;

/// One observation per year, 1960 to 2023, shaped like the real series.
fn gen_observations() -> Vec<Observation> {
    (1960..=2023)
        .map(|year| {
            let x = f64::from(year - 1960);
            let t = f64::from((year - 1994).max(0));
            Observation {
                year,
                population: 9e7 + 2.5e6 * x + 8e3 * x * x,
                internet_pct: 0.002 * t * t * t + 0.03 * t * t,
            }
        })
        .collect()
}

fn gen_sample_data() -> Vec<(f64, f64)> {
    let y = Polynomial::new(vec![8e3, 2.5e6, 9e7]).expect("Invalid polynomial");
    y.solve_range(0.0..=63.0, 1.0)
}

fn fit(data: &[(f64, f64)], degree: usize) -> CurveFit<'_> {
    CurveFit::new(data, degree).expect("Failed to fit data")
}

fn criterion_benchmark(c: &mut Criterion) {
    //
    // Fitting cost by degree, on a table-sized series
    let samples = gen_sample_data();
    let mut group = c.benchmark_group("fit_vs_degree");
    group.bench_function("Degree=2", |b| b.iter(|| fit(black_box(&samples), 2)));
    group.bench_function("Degree=3", |b| b.iter(|| fit(black_box(&samples), 3)));
    group.bench_function("Degree=6", |b| b.iter(|| fit(black_box(&samples), 6)));
    group.finish();

    //
    // Evaluating and formatting a fitted model
    let model = fit(&samples, 3).into_polynomial();
    let mut group = c.benchmark_group("model");
    group.bench_function("y", |b| b.iter(|| model.y(black_box(75.0))));
    group.bench_function("curve_1000", |b| {
        b.iter(|| model.solve(popfit::value::SteppedValues::linspace(0.0..=78.0, 1000)))
    });
    group.bench_function("format_equation", |b| {
        b.iter(|| format_equation(black_box(model.coefficients()), 1960))
    });
    group.finish();

    //
    // The whole analysis, without output
    let dataset = Dataset::new(gen_observations()).expect("Invalid dataset");
    let config = AnalysisConfig::default();
    c.bench_function("analyze", |b| {
        b.iter(|| analyze(black_box(&dataset), &config).expect("Failed to analyze"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
