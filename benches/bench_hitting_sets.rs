use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hitset::generate;
use hitset::hsdag::HsDag;
use hitset::problem::Problem;
use hitset::rctree::RcTree;
use hitset::solution::SolutionSet;

fn bench_hsdag(conflicts: Vec<SolutionSet<usize>>, prune: bool) -> usize {
    let mut dag = HsDag::new(conflicts);
    dag.solve(prune, false).unwrap();
    dag.amount_of_nodes_constructed()
}

fn bench_rctree(conflicts: Vec<SolutionSet<usize>>, prune: bool) -> usize {
    let mut tree = RcTree::new(conflicts);
    tree.solve(prune, false).unwrap();
    tree.amount_of_nodes_constructed()
}

fn bench_per_conflict_list_width(c: &mut Criterion) {
    for width in [4, 8, 16, 32] {
        let conflicts = generate::linear(width, 3);
        c.bench_function(&format!("bench_hsdag_linear_width_{width}"), |b| {
            b.iter(|| black_box(bench_hsdag(conflicts.clone(), true)))
        });
        c.bench_function(&format!("bench_rctree_linear_width_{width}"), |b| {
            b.iter(|| black_box(bench_rctree(conflicts.clone(), true)))
        });
    }
}

fn bench_pruned_vs_unpruned(c: &mut Criterion) {
    let conflicts = generate::linear(12, 3);
    for prune in [false, true] {
        c.bench_function(&format!("bench_hsdag_prune_{prune}"), |b| {
            b.iter(|| black_box(bench_hsdag(conflicts.clone(), prune)))
        });
    }
}

criterion_group!(
    benches,
    bench_per_conflict_list_width,
    bench_pruned_vs_unpruned
);
criterion_main!(benches);
