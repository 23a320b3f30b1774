use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use tetmesh::Tetrahedron;
use tetmesh::topology::build_neighbours;

/// A strip of `n` tetrahedra, each sharing exactly one face with the next,
/// none sharing a face with anything further away. Cheap to build at any
/// size and exercises the same per-face local search a real mesh would.
fn tet_strip(n: usize) -> Vec<Tetrahedron> {
    (0..n as i64)
        .map(|i| Tetrahedron::new(1, [i + 1, i + 2, i + 3, i + 4]).unwrap())
        .collect()
}

/// `O(T^2)` reference used only to compare against, not part of the
/// library's public surface — kept local to this bench.
fn naive_neighbours(tets: &[Tetrahedron]) -> Vec<Option<usize>> {
    let mut neighbours = vec![None; 4 * tets.len()];
    for a in 0..tets.len() {
        for b in (a + 1)..tets.len() {
            for (fa, face_a) in tets[a].faces().iter().enumerate() {
                for (fb, face_b) in tets[b].faces().iter().enumerate() {
                    if face_a == face_b {
                        neighbours[4 * a + fa] = Some(b);
                        neighbours[4 * b + fb] = Some(a);
                    }
                }
            }
        }
    }
    neighbours
}

fn neighbours(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbours");

    for size in [100, 1_000, 10_000] {
        let tets = tet_strip(size);
        group.bench_with_input(BenchmarkId::new("build_neighbours", size), &tets, |b, tets| {
            b.iter(|| {
                std::hint::black_box(build_neighbours(tets).unwrap());
            })
        });
    }
}

fn naive_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_neighbours");

    for size in [100, 500, 1_000] {
        let tets = tet_strip(size);
        group.bench_with_input(BenchmarkId::new("naive_neighbours", size), &tets, |b, tets| {
            b.iter(|| {
                std::hint::black_box(naive_neighbours(tets));
            })
        });
    }
}

criterion_group!(bench, neighbours, naive_baseline);
criterion_main!(bench);
