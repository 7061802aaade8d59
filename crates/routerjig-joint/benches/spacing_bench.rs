use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use routerjig_core::Units;
use routerjig_joint::{EdgeGeometry, EquallySpaced, Joint, RouterBit, SpacingStrategy, VariableSpaced};
use routerjig_settings::Config;
use std::hint::black_box;

fn geometry(board_width: i32) -> EdgeGeometry {
    let bit = RouterBit::new(Units::default(), 16, 24, 7.0).expect("valid bit");
    EdgeGeometry::new(&bit, board_width, 2)
}

fn bench_spacing(c: &mut Criterion) {
    let mut group = c.benchmark_group("spacing_recompute");

    for &board_width in &[240i32, 960, 3840] {
        group.bench_with_input(
            BenchmarkId::new("equal", board_width),
            &board_width,
            |b, &w| {
                let mut equal = EquallySpaced::new(geometry(w)).expect("equal spacing");
                b.iter(|| {
                    equal.recompute_cuts().expect("recompute");
                    black_box(equal.cuts().len())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("variable", board_width),
            &board_width,
            |b, &w| {
                let mut variable = VariableSpaced::new(geometry(w)).expect("variable spacing");
                b.iter(|| {
                    variable.recompute_cuts().expect("recompute");
                    black_box(variable.cuts().len())
                })
            },
        );
    }

    group.finish();
}

fn bench_cut_boards(c: &mut Criterion) {
    let mut config = Config::default();
    config.boards.double_active = true;
    config.boards.dd_active = true;
    let mut joint = Joint::new(&config).expect("default joint");

    c.bench_function("cut_boards_with_inserts", |b| {
        b.iter(|| {
            joint.cut_boards().expect("cut boards");
            black_box(joint.geometry().max_gap)
        })
    });
}

criterion_group!(benches, bench_spacing, bench_cut_boards);
criterion_main!(benches);
