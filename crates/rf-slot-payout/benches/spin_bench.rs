//! Spin and evaluation benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rf_slot_payout::{
    GridSpec, LinePayTable, MachineConfig, PayTable, SlotMachine, classic_symbols, generate,
};

/// Full spin: draw, scan, tally, pay
fn bench_spin(c: &mut Criterion) {
    let machine: SlotMachine = SlotMachine::seeded(MachineConfig::default(), 42).unwrap();

    c.bench_function("spin_5x3", |b| b.iter(|| black_box(machine.spin(1.0).unwrap())));
}

/// Evaluation only, across grid sizes
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for &(width, height) in &[(5usize, 3usize), (8, 5), (16, 8)] {
        let line_pays =
            LinePayTable::new((2..=width.max(height)).map(|len| (len, 0.2 * len as f64)));
        let config = MachineConfig::new(GridSpec::new(width, height), classic_symbols())
            .with_line_pays(line_pays);
        let paytable = PayTable::from_config(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(config.grid, paytable.catalog(), &mut rng).unwrap();

        group.bench_with_input(
            BenchmarkId::new("grid", format!("{width}x{height}")),
            &grid,
            |b, grid| b.iter(|| black_box(paytable.evaluate(grid).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_spin, bench_evaluate);
criterion_main!(benches);
