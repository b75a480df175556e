//! Shared proptest strategies for the engine test suites, in the style of
//! the teacher crate's own `testing` module (`arb_strategy`,
//! `arb_test_graph_and_nodes`): small, composable `Strategy` functions
//! rather than `Arbitrary` impls.

use proptest::collection::{hash_set, vec};
use proptest::prelude::*;

use crate::solution::SolutionSet;

/// A conflict: a non-empty set of small integers up to `max_element`.
pub fn arb_conflict(max_element: usize) -> impl Strategy<Value = SolutionSet<usize>> {
    hash_set(1..=max_element, 1..=max_element).prop_map(SolutionSet::from_iter)
}

/// A conflict list of up to `max_conflicts` conflicts over `1..=max_element`.
pub fn arb_conflict_list(
    max_conflicts: usize,
    max_element: usize,
) -> impl Strategy<Value = Vec<SolutionSet<usize>>> {
    vec(arb_conflict(max_element), 0..=max_conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hsdag::HsDag;
    use crate::problem::Problem;
    use crate::rctree::RcTree;

    proptest! {
        #[test]
        fn test_hsdag_solutions_are_sound_and_complete(
            conflicts in arb_conflict_list(5, 6),
            prune in any::<bool>(),
            sort in any::<bool>(),
        ) {
            let original = conflicts.clone();
            let mut dag = HsDag::new(conflicts);
            dag.solve(prune, sort).unwrap();
            prop_assert_eq!(dag.original_conflicts(), original.as_slice());
            prop_assert!(dag.verify());
            prop_assert!(dag.nodes_in_graph() <= dag.amount_of_nodes_constructed());
        }

        #[test]
        fn test_hsdag_and_rctree_agree(
            conflicts in arb_conflict_list(4, 5),
            prune in any::<bool>(),
        ) {
            let mut dag = HsDag::new(conflicts.clone());
            dag.solve(prune, false).unwrap();
            let mut tree = RcTree::new(conflicts);
            tree.solve(prune, false).unwrap();

            let dag_solutions = dag.enumerate_solutions();
            let tree_solutions = tree.enumerate_solutions();
            prop_assert_eq!(dag_solutions.len(), tree_solutions.len());
            for solution in &dag_solutions {
                prop_assert!(tree_solutions.contains(solution));
            }
        }

        #[test]
        fn test_reset_clears_everything(conflicts in arb_conflict_list(4, 5)) {
            let mut dag = HsDag::new(conflicts);
            dag.solve(true, false).unwrap();
            dag.reset();
            prop_assert!(dag.enumerate_solutions().is_empty());
            prop_assert_eq!(dag.amount_of_nodes_constructed(), 0);
            prop_assert_eq!(dag.nodes_in_graph(), 0);
        }
    }
}
