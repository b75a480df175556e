//! Behavior shared between the HS-DAG and RC-Tree engines: closing,
//! labeling, ticking, trimming, and breadth-first solution enumeration.
//!
//! The source models RC-Tree as a subclass of HS-DAG; Rust has no open
//! class inheritance, so the shared steps are free functions generic over
//! an [`EngineNode`], and each concrete engine (`hsdag::HsDag`,
//! `rctree::RcTree`) calls into them from its own `solve` loop, overriding
//! only child generation and relabel-and-trim.

use std::collections::VecDeque;
use std::hash::Hash;

use tracing::trace;

use crate::error::Error;
use crate::graph::{Graph, NodeId};
use crate::solution::SolutionSet;

/// The fields every engine's node type must expose for the shared steps to
/// operate on.
pub trait EngineNode<E>
where
    E: Eq + Hash + Clone,
{
    /// The union of edge labels from the root to this node.
    fn path_from_root(&self) -> &SolutionSet<E>;

    /// The conflict witnessing that `path_from_root` is not yet hitting,
    /// if this node has not ticked.
    fn label(&self) -> Option<&SolutionSet<E>>;

    /// Assigns a label. Fails with [`Error::InvalidState`] if the node is
    /// already ticked.
    fn set_label(&mut self, label: Option<SolutionSet<E>>) -> Result<(), Error>;

    /// Whether `path_from_root` is already a hitting set.
    fn is_ticked(&self) -> bool;

    /// Marks the node as ticked, clearing its label.
    fn tick(&mut self);

    /// Whether the node has been closed against a dominating ticked ancestor.
    fn is_closed(&self) -> bool;

    /// Marks the node as closed.
    fn close(&mut self);
}

/// If some already-processed node in `nodes` is ticked with a
/// `path_from_root` that is a proper subset of `processing`'s, closes
/// `processing` and detaches it from its parents. Returns whether it
/// closed.
pub fn attempt_closing_node<E, N>(
    graph: &mut Graph<E, N>,
    nodes: &[NodeId],
    processing: NodeId,
) -> bool
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    let processing_path = graph.get(processing).path_from_root().clone();
    for &other in nodes {
        let other_node = graph.get(other);
        if other_node.is_ticked() && other_node.path_from_root().is_proper_subset(&processing_path)
        {
            graph.get_mut(processing).close();
            graph.disconnect_from_parents(processing);
            return true;
        }
    }
    false
}

/// Scans `working_conflicts` in order for the first conflict disjoint from
/// `processing`'s `path_from_root`, assigning it as the label; if none
/// exists, ticks the node (a solution has been found).
pub fn label_node<E, N>(
    graph: &mut Graph<E, N>,
    working_conflicts: &[SolutionSet<E>],
    processing: NodeId,
) -> Result<(), Error>
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    let path = graph.get(processing).path_from_root().clone();
    for conflict in working_conflicts {
        if conflict.is_disjoint(&path) {
            graph.get_mut(processing).set_label(Some(conflict.clone()))?;
            return Ok(());
        }
    }
    graph.get_mut(processing).tick();
    Ok(())
}

/// Whether `processing`'s label equals some already-processed node's label,
/// or `processing` is itself ticked; in either case pruning is redundant.
pub fn label_was_previously_used<E, N>(
    graph: &Graph<E, N>,
    nodes: &[NodeId],
    processing: NodeId,
) -> bool
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    let processing_node = graph.get(processing);
    if processing_node.is_ticked() {
        return true;
    }
    let label = processing_node.label().cloned();
    nodes
        .iter()
        .any(|&other| graph.get(other).label() == label.as_ref())
}

/// Removes `node`'s outgoing parent edges (it has been closed). Python's
/// `_remove_closed_node`: the node stays in the arena, detached.
pub fn remove_closed_node<E, N>(graph: &mut Graph<E, N>, node: NodeId)
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    graph.disconnect_from_parents(node);
}

/// Removes the outgoing edge labeled `edge` from `parent`, then walks the
/// detached sub-graph breadth-first, unlinking every descendant's own
/// children and dropping orphaned nodes from `nodes`. Returns the ids
/// removed from `nodes`, in BFS order, for callers (RC-Tree) that need to
/// recompute derived state over the same set.
pub fn trim_subdag<E, N>(
    graph: &mut Graph<E, N>,
    nodes: &mut Vec<NodeId>,
    parent: NodeId,
    edge: &E,
) -> Vec<NodeId>
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    let removed_root = match graph.disconnect_child(parent, edge) {
        Some(id) => id,
        None => return Vec::new(),
    };
    let subdag = graph.bfs_from(removed_root);
    let mut removed = Vec::new();
    for id in subdag {
        graph.disconnect_children(id);
        if graph.is_orphan(id) {
            if let Some(pos) = nodes.iter().position(|&n| n == id) {
                nodes.remove(pos);
            }
            removed.push(id);
            trace!(?edge, "trimmed node from sub-dag");
        }
    }
    removed
}

/// Breadth-first from `root`: an existing node whose `path_from_root`
/// equals `path_with_conflict`, if any.
pub fn find_existing_node<E, N>(
    graph: &Graph<E, N>,
    nodes: &[NodeId],
    path_with_conflict: &SolutionSet<E>,
) -> Option<NodeId>
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    nodes
        .iter()
        .copied()
        .find(|&id| graph.get(id).path_from_root() == path_with_conflict)
}

/// In breadth-first order from `root`, the `path_from_root` of every
/// ticked node, yielded exactly once.
pub fn enumerate_ticked<E, N>(graph: &Graph<E, N>, root: Option<NodeId>) -> Vec<SolutionSet<E>>
where
    E: Eq + Hash + Clone,
    N: EngineNode<E>,
{
    let Some(root) = root else {
        return Vec::new();
    };
    graph
        .bfs_from(root)
        .into_iter()
        .filter(|&id| graph.get(id).is_ticked())
        .map(|id| graph.get(id).path_from_root().clone())
        .collect()
}

/// A FIFO work queue of pending node ids, matching Reiter's BFS discipline.
pub type Pending = VecDeque<NodeId>;
