//! Conflict-list generators, external collaborators used by tests and
//! benchmarks, not by the solving core. Sketched per §6.

use crate::solution::SolutionSet;

/// `amount_conflicts` random conflicts, each built by drawing
/// `max_cardinality` elements (with repetition, as the original generator
/// does) from `1..=max_cardinality`.
///
/// Mirrors `getconflicts.random_set_of_conflicts`.
pub fn random_conflicts(
    rng: &mut impl rand::Rng,
    amount_conflicts: usize,
    max_cardinality: usize,
) -> Vec<SolutionSet<usize>> {
    (0..amount_conflicts)
        .map(|_| {
            SolutionSet::from_iter(
                (0..max_cardinality).map(|_| rng.gen_range(1..=max_cardinality)),
            )
        })
        .collect()
}

/// A deterministic chain of `width` conflicts, each of cardinality
/// `cardinality`, consecutive conflicts overlapping in exactly one element.
/// `linear(4, 3)` reproduces the fixture named in the concrete-scenario
/// table (§8): `[{1,2,3},{3,4,5},{5,6,7},{7,8,9}]`.
pub fn linear(width: usize, cardinality: usize) -> Vec<SolutionSet<usize>> {
    let step = cardinality - 1;
    (0..width)
        .map(|i| {
            let start = i * step + 1;
            SolutionSet::from_iter(start..start + cardinality)
        })
        .collect()
}
