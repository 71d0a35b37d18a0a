//! Benchmarks for bond pricing and yield solving.
//!
//! Run with: cargo bench -p bondcalc-bonds

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bondcalc_bonds::{BondModel, BondTerms, YtmMethod, YtmSolver};

fn create_bond(years: f64, freq: u32) -> BondModel {
    BondModel::new(
        BondTerms::builder()
            .face_value(1000.0)
            .coupon_rate(0.05)
            .years_to_maturity(years)
            .periods_per_year(freq)
            .build()
            .unwrap(),
    )
}

fn bench_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("price");

    for (years, freq) in [(2.0, 2), (10.0, 2), (30.0, 12)] {
        let bond = create_bond(years, freq);
        let label = format!("{}y_x{}", years, freq);
        group.bench_with_input(BenchmarkId::from_parameter(label), &bond, |b, bond| {
            b.iter(|| bond.price(black_box(0.045)).unwrap());
        });
    }

    group.finish();
}

fn bench_analytics(c: &mut Criterion) {
    let bond = create_bond(10.0, 2);

    c.bench_function("analytics_10y_semiannual", |b| {
        b.iter(|| bond.analytics(black_box(0.045)).unwrap());
    });
}

fn bench_ytm(c: &mut Criterion) {
    let mut group = c.benchmark_group("ytm");
    let bond = create_bond(10.0, 2);
    let price = bond.price(0.045).unwrap();

    for method in [YtmMethod::Brent, YtmMethod::Bisection] {
        let solver = YtmSolver::default().with_method(method);
        group.bench_with_input(
            BenchmarkId::from_parameter(method),
            &solver,
            |b, solver| {
                b.iter(|| bond.ytm_with(black_box(price), solver).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_price, bench_analytics, bench_ytm);
criterion_main!(benches);
