use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vp_core::{ExerciseStyle, ModelParameters, OptionType};
use vp_instruments::PlainVanillaPayoff;
use vp_pricingengines::{binomial_option_price, black_scholes_price, MonteCarloEngine};

fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_option_price");
    for steps in [100usize, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("american_put", steps), &steps, |b, &n| {
            b.iter(|| {
                binomial_option_price(
                    black_box(100.0),
                    100.0,
                    0.05,
                    0.2,
                    1.0,
                    n,
                    OptionType::Put,
                    ExerciseStyle::American,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let model = ModelParameters::new(100.0, 0.05, 0.2, 1.0).unwrap();
    let call = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
    let mut group = c.benchmark_group("monte_carlo_engine");
    for workers in [1usize, 4] {
        let engine = MonteCarloEngine::builder()
            .paths(100_000)
            .workers(workers)
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("call_100k", workers), &engine, |b, e| {
            b.iter(|| e.calculate(black_box(&model), &call).unwrap())
        });
    }
    group.finish();
}

fn bench_black_scholes(c: &mut Criterion) {
    c.bench_function("black_scholes_call", |b| {
        b.iter(|| black_scholes_price(OptionType::Call, black_box(100.0), 100.0, 0.05, 0.2, 1.0))
    });
}

criterion_group!(benches, bench_binomial, bench_monte_carlo, bench_black_scholes);
criterion_main!(benches);
