/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use defcorr_rs::ewald::{
    optimize_ewald_param, AnisotropicPotential, DielectricTensor, EwaldConfig,
};
use defcorr_rs::lattice::Lattice;

fn ewald_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ewald Sums");

    let lattice = Lattice::cubic(10.0).unwrap();
    let eps = DielectricTensor::new([[6.0, 1.0, 0.5], [1.0, 5.0, 0.2], [0.5, 0.2, 7.0]]).unwrap();
    let config = EwaldConfig::default();

    group.bench_function("optimize_ewald_param", |b| {
        b.iter(|| optimize_ewald_param(black_box(&lattice), black_box(&eps), &config).unwrap())
    });

    let model = AnisotropicPotential::new(&lattice, &eps, &EwaldConfig::with_accuracy(8.0)).unwrap();

    group.bench_function("lattice_energy", |b| b.iter(|| black_box(model.lattice_energy())));

    let targets: Vec<[f64; 3]> = (1..=64)
        .map(|i| {
            let f = i as f64 / 64.0;
            [f, (3.0 * f) % 1.0, (7.0 * f) % 1.0]
        })
        .collect();

    group.bench_function("model_potential_64_sites", |b| {
        b.iter(|| black_box(model.model_potential(black_box(&[0.0; 3]), &targets)))
    });

    group.finish();
}

criterion_group!(benches, ewald_benchmark);
criterion_main!(benches);
