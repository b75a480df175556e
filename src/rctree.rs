//! Wotawa's reduced-complexity tree: a tree (at most one parent per node)
//! that avoids the combinatorial duplication a naive tree would produce by
//! tracking, per node, the cumulative (`theta`) and local (`theta_c`) sets
//! of edge labels already emitted by an ancestor's sibling subtree.

use std::hash::Hash;
use std::time::Instant;

use tracing::instrument;

use crate::engine::{self, EngineNode, Pending};
use crate::error::Error;
use crate::graph::{Graph, NodeId};
use crate::problem::{ConflictList, Problem};
use crate::solution::SolutionSet;

/// A node of the reduced-complexity tree.
#[derive(Debug, Clone)]
pub struct Node<E>
where
    E: Eq + Hash + Clone,
{
    path_from_root: SolutionSet<E>,
    label: Option<SolutionSet<E>>,
    closed: bool,
    ticked: bool,
    theta: SolutionSet<E>,
    theta_c: SolutionSet<E>,
}

impl<E> Node<E>
where
    E: Eq + Hash + Clone,
{
    fn new(path_from_root: SolutionSet<E>, theta: SolutionSet<E>, theta_c: SolutionSet<E>) -> Self {
        Self {
            path_from_root,
            label: None,
            closed: false,
            ticked: false,
            theta,
            theta_c,
        }
    }

    /// The cumulative edge-label prohibition inherited along the path from root.
    pub fn theta(&self) -> &SolutionSet<E> {
        &self.theta
    }

    /// The edge labels this node's older siblings already occupied when it
    /// was spawned.
    pub fn theta_c(&self) -> &SolutionSet<E> {
        &self.theta_c
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

/// Builds and holds the reduced-complexity tree for a list of conflicts.
#[derive(Debug)]
pub struct RcTree<E>
where
    E: Eq + Hash + Clone,
{
    conflicts: ConflictList<E>,
    graph: Graph<E, Node<E>>,
    nodes: Vec<NodeId>,
    root: Option<NodeId>,
    amount_of_nodes_constructed: usize,
}

impl<E> RcTree<E>
where
    E: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Builds an engine over `list_of_conflicts`. Call [`Problem::solve`]
    /// to construct the tree.
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
        let root = self
            .graph
            .insert(Node::new(SolutionSet::new(), SolutionSet::new(), SolutionSet::new()));
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
                continue;
            }
            let working = self.conflicts.working().expect("prepared before processing").to_vec();
            engine::label_node(&mut self.graph, &working, processing)?;
            if !self.nodes.is_empty() && prune {
                self.prune(processing, pending)?;
                if self.graph.is_orphan(processing) && self.graph.is_childless(processing) {
                    continue;
                }
            }
            if self.graph.get(processing).label().is_some() {
                self.spawn_allowed_children(processing, pending);
            }
            self.nodes.push(processing);
        }
        Ok(())
    }

    fn prune(&mut self, processing: NodeId, pending: &mut Pending) -> Result<(), Error> {
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
            self.relabel_and_trim(&processing_label, other, &other_label, pending)?;
        }
        Ok(())
    }

    /// RC-Tree's relabel-and-trim computes the difference in the *opposite*
    /// direction from HS-DAG's (`processing.label \ other.label`, per
    /// `rctree.py`'s `_relabel_and_trim`), then widens theta along the
    /// surviving descendants and lets them spawn children that were
    /// previously suppressed.
    fn relabel_and_trim(
        &mut self,
        processing_label: &SolutionSet<E>,
        other: NodeId,
        other_label_old: &SolutionSet<E>,
        pending: &mut Pending,
    ) -> Result<(), Error> {
        let difference = processing_label.difference(other_label_old);
        self.graph.get_mut(other).set_label(Some(processing_label.clone()))?;
        for element in difference.iter() {
            engine::trim_subdag(&mut self.graph, &mut self.nodes, other, element);
        }
        self.update_thetas_and_create_allowed_children(other, &difference, pending);
        if let Some(working) = self.conflicts.working_mut() {
            working.retain(|conflict| conflict != other_label_old);
        }
        Ok(())
    }

    fn update_thetas_and_create_allowed_children(
        &mut self,
        node: NodeId,
        difference: &SolutionSet<E>,
        pending: &mut Pending,
    ) {
        for descendant in self.graph.bfs_from(node) {
            let narrowed = self.graph.get(descendant).theta.difference(difference);
            self.graph.get_mut(descendant).theta = narrowed;
            self.spawn_allowed_children(descendant, pending);
        }
    }

    /// Creates a child for every edge in `label(node) \ theta(node)` that
    /// does not already have one. Called both at a node's initial labeling
    /// and, after a trim widens `theta` further down the tree, to spawn the
    /// newly-allowed children; idempotent over edges already present, so
    /// repeated calls as theta narrows never discard or duplicate a
    /// previously built subtree.
    fn spawn_allowed_children(&mut self, node: NodeId, pending: &mut Pending) {
        let label = match self.graph.get(node).label() {
            Some(label) => label.clone(),
            None => return,
        };
        let theta = self.graph.get(node).theta.clone();
        let allowed = label.difference(&theta);
        for element in allowed.iter() {
            if self.graph.children(node).contains_key(element) {
                continue;
            }
            let existing_sibling_labels =
                SolutionSet::from_iter(self.graph.children(node).keys().cloned());
            let theta_c = label.intersection(&existing_sibling_labels);
            let child_theta = theta_c.union(&self.graph.get(node).theta);
            let mut path = self.graph.get(node).path_from_root().clone();
            path.insert(element.clone());
            self.amount_of_nodes_constructed += 1;
            let child = self.graph.insert(Node::new(path, child_theta, theta_c));
            self.graph.connect(node, element.clone(), child);
            pending.push_back(child);
        }
    }
}

impl<E> Problem<E> for RcTree<E>
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
