//! Arena of nodes addressed by a stable [`NodeId`], with breadth-first
//! traversal.
//!
//! Mirrors the spec's explicit language-neutral design note: an arena plus
//! stable integer indices rather than a reference-counted node graph.
//! Logical deletion clears a slot's edges; the "live" set of a graph is
//! whatever [`Graph::bfs_from`] reaches from a root, not anything tracked
//! by the arena itself.

use std::collections::VecDeque;

use indexmap::IndexMap;

/// Identifies a node within one [`Graph`]. Cheap to copy, compares by
/// identity (arena slot), not by the node's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An arena of `N`-typed node payloads, connected by edges labeled `E`.
#[derive(Debug)]
pub struct Graph<E, N>
where
    E: Eq + std::hash::Hash + Clone,
{
    slots: Vec<Slot<E, N>>,
}

#[derive(Debug)]
struct Slot<E, N>
where
    E: Eq + std::hash::Hash + Clone,
{
    payload: N,
    parents: IndexMap<E, NodeId>,
    children: IndexMap<E, NodeId>,
}

impl<E, N> Default for Graph<E, N>
where
    E: Eq + std::hash::Hash + Clone,
{
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<E, N> Graph<E, N>
where
    E: Eq + std::hash::Hash + Clone,
{
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots ever allocated, including ones later orphaned by trimming.
    pub fn allocated_len(&self) -> usize {
        self.slots.len()
    }

    /// Allocates a new node holding `payload`, with no edges.
    pub fn insert(&mut self, payload: N) -> NodeId {
        self.slots.push(Slot {
            payload,
            parents: IndexMap::new(),
            children: IndexMap::new(),
        });
        NodeId(self.slots.len() - 1)
    }

    /// Shared access to a node's payload.
    pub fn get(&self, id: NodeId) -> &N {
        &self.slots[id.0].payload
    }

    /// Exclusive access to a node's payload.
    pub fn get_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.slots[id.0].payload
    }

    /// The edge labels and child ids of a node, in creation order.
    pub fn children(&self, id: NodeId) -> &IndexMap<E, NodeId> {
        &self.slots[id.0].children
    }

    /// The edge labels and parent ids of a node, in creation order.
    pub fn parents(&self, id: NodeId) -> &IndexMap<E, NodeId> {
        &self.slots[id.0].parents
    }

    /// Whether `id` has no parent edges.
    pub fn is_orphan(&self, id: NodeId) -> bool {
        self.slots[id.0].parents.is_empty()
    }

    /// Whether `id` has no child edges.
    pub fn is_childless(&self, id: NodeId) -> bool {
        self.slots[id.0].children.is_empty()
    }

    /// Connects `parent --edge--> child`, recording both directions.
    pub fn connect(&mut self, parent: NodeId, edge: E, child: NodeId) {
        self.slots[parent.0].children.insert(edge.clone(), child);
        self.slots[child.0].parents.insert(edge, parent);
    }

    /// Removes the outgoing edge labeled `edge` from `parent`, and the
    /// corresponding incoming edge from whichever child it pointed to.
    /// Returns the former child, if the edge existed.
    pub fn disconnect_child(&mut self, parent: NodeId, edge: &E) -> Option<NodeId> {
        let child = self.slots[parent.0].children.shift_remove(edge)?;
        self.slots[child.0].parents.shift_remove(edge);
        Some(child)
    }

    /// Removes every parent edge of `id`, detaching it from the graph on
    /// the incoming side. Each former parent loses the matching child
    /// entry.
    pub fn disconnect_from_parents(&mut self, id: NodeId) {
        let parents: Vec<(E, NodeId)> = self.slots[id.0]
            .parents
            .drain(..)
            .collect();
        for (edge, parent) in parents {
            self.slots[parent.0].children.shift_remove(&edge);
        }
    }

    /// Removes every child edge of `id`; each former child loses the
    /// matching parent entry.
    pub fn disconnect_children(&mut self, id: NodeId) {
        let children: Vec<(E, NodeId)> = self.slots[id.0]
            .children
            .drain(..)
            .collect();
        for (edge, child) in children {
            self.slots[child.0].parents.shift_remove(&edge);
        }
    }

    /// Breadth-first node ids reachable from `root`, each yielded once.
    /// Materialized eagerly: callers that mutate the graph mid-traversal
    /// (trimming) must snapshot descendants before unlinking, which every
    /// caller in this crate already does.
    pub fn bfs_from(&self, root: NodeId) -> Vec<NodeId> {
        let mut visited = std::collections::HashSet::new();
        let mut order = Vec::new();
        let mut pending = VecDeque::new();
        pending.push_back(root);
        visited.insert(root);
        while let Some(id) = pending.pop_front() {
            order.push(id);
            for child in self.slots[id.0].children.values() {
                if visited.insert(*child) {
                    pending.push_back(*child);
                }
            }
        }
        order
    }
}
