use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wukong::{
    compute_visible, create_rng, render_all, DungeonGenerator, GameState, GenerationConfig,
    Generator, HeadlessDisplay, Position, TileGrid,
};

fn bench_compute_visible_open(c: &mut Criterion) {
    let mut grid = TileGrid::new(80, 22);
    let cells: Vec<Position> = grid.positions().collect();
    for pos in cells {
        grid.carve(pos);
    }

    c.bench_function("compute_visible_open_map", |b| {
        b.iter(|| compute_visible(black_box(Position::new(40, 11)), 10, &grid))
    });
}

fn bench_refresh_generated_level(c: &mut Criterion) {
    let mut state = GameState::new(&GenerationConfig::new(12345)).unwrap();

    c.bench_function("fov_refresh_generated_level", |b| {
        b.iter(|| {
            state.fov.invalidate();
            state.refresh_visibility()
        })
    });
}

fn bench_generate_level(c: &mut Criterion) {
    let config = GenerationConfig::new(12345);
    let generator = DungeonGenerator::new();

    c.bench_function("generate_level", |b| {
        b.iter(|| {
            let mut rng = create_rng(black_box(&config));
            generator.generate(&config, &mut rng).unwrap()
        })
    });
}

fn bench_render_all(c: &mut Criterion) {
    let mut state = GameState::new(&GenerationConfig::new(12345)).unwrap();
    let mut display = HeadlessDisplay::new(80, 24);

    c.bench_function("render_all_headless", |b| {
        b.iter(|| render_all(&mut state, &mut display, 0).unwrap())
    });
}

criterion_group!(
    benches,
    bench_compute_visible_open,
    bench_refresh_generated_level,
    bench_generate_level,
    bench_render_all
);
criterion_main!(benches);
