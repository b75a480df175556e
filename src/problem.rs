//! The solver contract shared by [`crate::hsdag::HsDag`] and
//! [`crate::rctree::RcTree`], and the conflict-list bookkeeping both of
//! them embed.

use std::hash::Hash;

use crate::error::Error;
use crate::solution::SolutionSet;

/// Holds the caller's conflict list and derives a working copy for each
/// `solve` call, without ever mutating the original.
#[derive(Debug, Clone)]
pub struct ConflictList<E>
where
    E: Eq + Hash + Clone,
{
    list_of_conflicts: Vec<SolutionSet<E>>,
    working_list_of_conflicts: Option<Vec<SolutionSet<E>>>,
}

impl<E> ConflictList<E>
where
    E: Eq + Hash + Clone,
{
    /// Takes ownership of the caller's conflict list.
    pub fn new(list_of_conflicts: Vec<SolutionSet<E>>) -> Self {
        Self {
            list_of_conflicts,
            working_list_of_conflicts: None,
        }
    }

    /// The original, caller-supplied conflict list. Never mutated by `solve`.
    pub fn original(&self) -> &[SolutionSet<E>] {
        &self.list_of_conflicts
    }

    /// Builds `working_list_of_conflicts`: a cardinality-sorted clone if
    /// `sort`, else a plain clone preserving input order.
    pub fn prepare_working_copy(&mut self, sort: bool) {
        use itertools::Itertools;

        let mut working = self.list_of_conflicts.clone();
        if sort {
            working = working.into_iter().sorted_by_key(|conflict| conflict.len()).collect();
        }
        self.working_list_of_conflicts = Some(working);
    }

    /// The working copy built by [`Self::prepare_working_copy`], if any.
    pub fn working(&self) -> Option<&[SolutionSet<E>]> {
        self.working_list_of_conflicts.as_deref()
    }

    /// Exclusive access to the working copy, for removing redundant labels
    /// discovered during pruning.
    pub fn working_mut(&mut self) -> Option<&mut Vec<SolutionSet<E>>> {
        self.working_list_of_conflicts.as_mut()
    }

    /// Drops the working copy; it is not needed once construction is done.
    pub fn discard_working_copy(&mut self) {
        self.working_list_of_conflicts = None;
    }
}

/// Common contract implemented by both graph-construction engines.
pub trait Problem<E>
where
    E: Eq + Hash + Clone,
{
    /// Builds the graph, returning the wall-clock seconds elapsed.
    ///
    /// `prune` enables relabel-and-trim pruning (§4.4.1); `sort` sorts the
    /// working conflict list by ascending cardinality before construction,
    /// which forces `prune` off regardless of the argument (sorting already
    /// obviates it).
    fn solve(&mut self, prune: bool, sort: bool) -> Result<f64, Error>;

    /// Discards the graph and resets the constructed-node counter to zero.
    fn reset(&mut self);

    /// The `path_from_root` of every ticked node, in breadth-first order.
    fn enumerate_solutions(&self) -> Vec<SolutionSet<E>>;

    /// Re-checks every enumerated solution against the *original* conflict
    /// list with [`SolutionSet::is_minimal_hitting`].
    fn verify(&self) -> bool;

    /// Every allocation ever made this `solve`, including later-trimmed ones.
    fn amount_of_nodes_constructed(&self) -> usize;

    /// Size of the live arena, i.e. nodes reachable by BFS from the root.
    fn nodes_in_graph(&self) -> usize;
}
