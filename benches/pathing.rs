use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use wallmaze::generators::{self, MazeParams};
use wallmaze::grid::Grid;
use wallmaze::pathing;
use wallmaze::units::{Height, Width};

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = generators::generate(&MazeParams::new(Width(350), Height(350)));
        let start_coord = g.default_start();
        b.iter(|| pathing::Distances::new(&g, start_coord))
    });
}

fn bench_find_path_open_room(c: &mut Criterion) {
    c.bench_function("find_path_open_room", |b| {
        let g = Grid::bordered(Width(350), Height(350));
        let (start_coord, end_coord) = (g.default_start(), g.default_end());
        b.iter(|| pathing::find_path(&g, start_coord, end_coord))
    });
}

fn bench_find_path_maze(c: &mut Criterion) {
    c.bench_function("find_path_maze", |b| {
        let g = generators::generate(&MazeParams::new(Width(350), Height(350)).with_skip_chance(0.5));
        let (start_coord, end_coord) = (g.default_start(), g.default_end());
        b.iter(|| pathing::find_path(&g, start_coord, end_coord))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_find_path_open_room,
    bench_find_path_maze
);
criterion_main!(benches);
