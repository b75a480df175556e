//! Reiter's hitting-set DAG, with Greiner et al.'s corrections: closing,
//! pruning (relabel + trim + conflict elision), and node reuse by path
//! equality.

use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::engine::{self, EngineNode, Pending};
use crate::error::Error;
use crate::graph::{Graph, NodeId};
use crate::problem::{ConflictList, Problem};
use crate::solution::SolutionSet;

/// A node of the hitting-set DAG.
#[derive(Debug, Clone)]
pub struct Node<E>
where
    E: Eq + Hash + Clone,
{
    path_from_root: SolutionSet<E>,
    label: Option<SolutionSet<E>>,
    closed: bool,
    ticked: bool,
}

impl<E> Node<E>
where
    E: Eq + Hash + Clone,
{
    fn new(path_from_root: SolutionSet<E>) -> Self {
        Self {
            path_from_root,
            label: None,
            closed: false,
            ticked: false,
        }
    }
}

impl<E> EngineNode<E> for Node<E>
where
    E: Eq + Hash + Clone,
{
    fn path_from_root(&self) -> &SolutionSet<E> {
        &self.path_from_root
    }

    fn label(&self) -> Option<&SolutionSet<E>> {
        self.label.as_ref()
    }

    fn set_label(&mut self, label: Option<SolutionSet<E>>) -> Result<(), Error> {
        if self.ticked {
            return Err(Error::InvalidState);
        }
        self.label = label;
        Ok(())
    }

    fn is_ticked(&self) -> bool {
        self.ticked
    }

    fn tick(&mut self) {
        self.label = None;
        self.ticked = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Builds and holds the hitting-set DAG for a list of conflicts.
#[derive(Debug)]
pub struct HsDag<E>
where
    E: Eq + Hash + Clone,
{
    conflicts: ConflictList<E>,
    graph: Graph<E, Node<E>>,
    nodes: Vec<NodeId>,
    root: Option<NodeId>,
    amount_of_nodes_constructed: usize,
}

impl<E> HsDag<E>
where
    E: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Builds an engine over `list_of_conflicts`. Call [`Problem::solve`]
    /// to construct the DAG.
    pub fn new(list_of_conflicts: Vec<SolutionSet<E>>) -> Self {
        Self {
            conflicts: ConflictList::new(list_of_conflicts),
            graph: Graph::new(),
            nodes: Vec::new(),
            root: None,
            amount_of_nodes_constructed: 0,
        }
    }

    /// The caller's original conflict list, never mutated by `solve`.
    pub fn original_conflicts(&self) -> &[SolutionSet<E>] {
        self.conflicts.original()
    }

    fn prepare_to_process_nodes(&mut self, sort: bool) -> Pending {
        self.conflicts.prepare_working_copy(sort);
        let root = self.graph.insert(Node::new(SolutionSet::new()));
        self.root = Some(root);
        self.amount_of_nodes_constructed += 1;
        let mut pending = Pending::new();
        pending.push_back(root);
        pending
    }

    #[instrument(skip(self, pending), fields(prune))]
    fn process_nodes(&mut self, pending: &mut Pending, prune: bool) -> Result<(), Error> {
        while let Some(processing) = pending.pop_front() {
            if engine::attempt_closing_node(&mut self.graph, &self.nodes, processing) {
                engine::remove_closed_node(&mut self.graph, processing);
                debug!(?processing, "closed node");
                continue;
            }
            let working = self.conflicts.working().expect("prepared before processing").to_vec();
            engine::label_node(&mut self.graph, &working, processing)?;
            if !self.nodes.is_empty() && prune {
                self.prune(processing)?;
                if self.graph.is_orphan(processing) && self.graph.is_childless(processing) {
                    continue;
                }
            }
            if self.graph.get(processing).label().is_some() {
                self.create_children(processing, pending);
            }
            self.nodes.push(processing);
        }
        Ok(())
    }

    /// Greiner et al.'s corrected pruning (spec §4.4.1): rewrites any
    /// previously built non-ticked node whose label is a strict superset of
    /// `processing`'s, trimming the now-redundant subtree and evicting the
    /// *replaced* label from the working conflict list.
    fn prune(&mut self, processing: NodeId) -> Result<(), Error> {
        if engine::label_was_previously_used(&self.graph, &self.nodes, processing) {
            return Ok(());
        }
        let processing_label = match self.graph.get(processing).label() {
            Some(label) => label.clone(),
            None => return Ok(()),
        };
        let candidates: Vec<NodeId> = self.nodes.clone();
        for other in candidates {
            let other_node = self.graph.get(other);
            if other_node.is_ticked() {
                continue;
            }
            let other_label = match other_node.label() {
                Some(label) => label.clone(),
                None => continue,
            };
            if !processing_label.is_proper_subset(&other_label) {
                continue;
            }
            let difference = other_label.difference(&processing_label);
            self.graph.get_mut(other).set_label(Some(processing_label.clone()))?;
            for element in difference.iter() {
                engine::trim_subdag(&mut self.graph, &mut self.nodes, other, element);
            }
            if let Some(working) = self.conflicts.working_mut() {
                working.retain(|conflict| conflict != &other_label);
            }
        }
        Ok(())
    }

    fn create_children(&mut self, processing: NodeId, pending: &mut Pending) {
        let label = self
            .graph
            .get(processing)
            .label()
            .expect("only called when labeled")
            .clone();
        let path = self.graph.get(processing).path_from_root().clone();
        for element in label.iter() {
            let mut path_with_element = path.clone();
            path_with_element.insert(element.clone());
            let child = match engine::find_existing_node(&self.graph, &self.nodes, &path_with_element)
            {
                Some(existing) => existing,
                None => {
                    self.amount_of_nodes_constructed += 1;
                    self.graph.insert(Node::new(path_with_element))
                }
            };
            self.graph.connect(processing, element.clone(), child);
            pending.push_back(child);
        }
    }
}

impl<E> Problem<E> for HsDag<E>
where
    E: Eq + Hash + Clone + std::fmt::Debug,
{
    #[instrument(skip(self))]
    fn solve(&mut self, prune: bool, sort: bool) -> Result<f64, Error> {
        let start = Instant::now();
        self.reset();
        if !self.conflicts.original().is_empty() {
            let mut pending = self.prepare_to_process_nodes(sort);
            let prune = if sort { false } else { prune };
            self.process_nodes(&mut pending, prune)?;
            self.conflicts.discard_working_copy();
        }
        Ok(start.elapsed().as_secs_f64())
    }

    fn reset(&mut self) {
        self.amount_of_nodes_constructed = 0;
        self.graph = Graph::new();
        self.nodes.clear();
        self.root = None;
        self.conflicts.discard_working_copy();
    }

    fn enumerate_solutions(&self) -> Vec<SolutionSet<E>> {
        engine::enumerate_ticked(&self.graph, self.root)
    }

    fn verify(&self) -> bool {
        self.enumerate_solutions()
            .iter()
            .all(|solution| solution.is_minimal_hitting(self.conflicts.original()))
    }

    fn amount_of_nodes_constructed(&self) -> usize {
        self.amount_of_nodes_constructed
    }

    fn nodes_in_graph(&self) -> usize {
        match self.root {
            Some(root) => self.graph.bfs_from(root).len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashset;

    fn conflicts(sets: Vec<Vec<i32>>) -> Vec<SolutionSet<i32>> {
        sets.into_iter().map(SolutionSet::from_iter).collect()
    }

    fn solve_and_collect(input: Vec<Vec<i32>>, prune: bool, sort: bool) -> Vec<SolutionSet<i32>> {
        let mut dag = HsDag::new(conflicts(input));
        dag.solve(prune, sort).unwrap();
        dag.enumerate_solutions()
    }

    fn assert_same_solutions(actual: Vec<SolutionSet<i32>>, expected: Vec<Vec<i32>>) {
        let expected: Vec<SolutionSet<i32>> = expected.into_iter().map(SolutionSet::from_iter).collect();
        assert_eq!(actual.len(), expected.len(), "actual: {actual:?}");
        for e in &expected {
            assert!(actual.contains(e), "missing {e} in {actual:?}");
        }
    }

    #[test]
    fn test_empty_conflicts_yields_no_solutions() {
        for prune in [false, true] {
            for sort in [false, true] {
                let mut dag: HsDag<i32> = HsDag::new(Vec::new());
                let elapsed = dag.solve(prune, sort).unwrap();
                assert!(elapsed < 0.5);
                assert!(dag.enumerate_solutions().is_empty());
                assert_eq!(dag.nodes_in_graph(), 0);
                assert!(dag.verify());
            }
        }
    }

    #[test]
    fn test_two_overlapping_conflicts() {
        for prune in [false, true] {
            for sort in [false, true] {
                let actual = solve_and_collect(vec![vec![1, 3], vec![1, 4]], prune, sort);
                assert_same_solutions(actual, vec![vec![1], vec![3, 4]]);
            }
        }
    }

    #[test]
    fn test_singleton_conflict_forces_every_branch() {
        let actual = solve_and_collect(vec![vec![3, 4, 5], vec![1]], true, false);
        assert_same_solutions(actual, vec![vec![1, 3], vec![1, 4], vec![1, 5]]);
    }

    #[test]
    fn test_three_conflicts_with_shared_elements() {
        let actual = solve_and_collect(vec![vec![1, 2], vec![3, 4], vec![1, 2, 5]], true, false);
        assert_same_solutions(
            actual,
            vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]],
        );
    }

    #[test]
    fn test_eight_conflicts_four_solutions() {
        let input = vec![
            vec![1, 2, 3, 4],
            vec![3],
            vec![2, 4],
            vec![15],
            vec![9, 2, 15],
            vec![9, 3],
            vec![8, 7],
            vec![8, 9, 1, 7],
        ];
        let actual = solve_and_collect(input, true, false);
        assert_same_solutions(
            actual,
            vec![
                vec![8, 2, 3, 15],
                vec![2, 3, 7, 15],
                vec![8, 3, 4, 15],
                vec![3, 4, 7, 15],
            ],
        );
    }

    #[test]
    fn test_solving_does_not_alter_conflicts() {
        let input = conflicts(vec![vec![1, 3], vec![1, 4]]);
        let original = input.clone();
        let mut dag = HsDag::new(input);
        dag.solve(true, false).unwrap();
        assert_eq!(dag.conflicts.original(), original.as_slice());
    }

    #[test]
    fn test_ticking_clears_label() {
        let mut node: Node<i32> = Node::new(SolutionSet::from_iter(hashset! {1}));
        node.set_label(Some(SolutionSet::from_iter(hashset! {2}))).unwrap();
        node.tick();
        assert!(node.label().is_none());
        assert!(node.is_ticked());
    }

    #[test]
    fn test_relabeling_ticked_node_is_invalid_state() {
        let mut node: Node<i32> = Node::new(SolutionSet::new());
        node.tick();
        let result = node.set_label(Some(SolutionSet::from_iter(hashset! {1})));
        assert!(matches!(result, Err(Error::InvalidState)));
    }

    #[test]
    fn test_root_has_one_child_per_label_element() {
        let mut dag = HsDag::new(conflicts(vec![vec![1, 2]]));
        dag.solve(true, false).unwrap();
        let root = dag.root.unwrap();
        assert_eq!(dag.graph.children(root).len(), 2);
    }

    #[test]
    fn test_conflict_list_containing_empty_set_yields_no_solutions() {
        // The empty conflict can never be hit, so no path ever ticks.
        let mut dag: HsDag<i32> = HsDag::new(vec![SolutionSet::new(), SolutionSet::from_iter(hashset! {1})]);
        dag.solve(true, false).unwrap();
        assert!(dag.enumerate_solutions().is_empty());
    }

    #[test]
    fn test_live_vs_constructed_without_trimming() {
        let mut dag = HsDag::new(conflicts(vec![vec![1, 3], vec![1, 4]]));
        dag.solve(false, false).unwrap();
        assert!(dag.nodes_in_graph() <= dag.amount_of_nodes_constructed());
    }

    #[test]
    fn test_solve_runs_cleanly_under_a_tracing_subscriber() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut dag = HsDag::new(conflicts(vec![vec![1, 2, 3, 4], vec![3], vec![2, 4]]));
            dag.solve(true, false).unwrap();
            assert!(dag.verify());
        });
    }
}
