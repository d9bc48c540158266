//! Timing DAG data structures.
//!
//! The [`TimingDag`] is a pin-keyed registry of [`TimingNode`]s. Each node owns
//! at most one outgoing [`TimingEdge`] per target pin. The DAG is built by
//! replaying [`Path`]s: common prefixes collapse into shared nodes, identical
//! arcs merge into one edge whose count accumulates, and divergent suffixes
//! branch from a shared node.

use crate::ids::{NetId, TimingNodeId};
use crate::path::Path;
use crate::pin::Pin;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use phydb_common::{PhyDbError, PhyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A timing arc toward `target`, attributed to a net.
///
/// `count` is the number of identical electrical arcs collapsed into this
/// logical arc; it is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingEdge {
    /// The pin the arc ends at.
    pub target: Pin,
    /// The net the arc belongs to.
    pub net: NetId,
    /// Arc delay.
    pub delay: f64,
    /// Number of collapsed arcs.
    pub count: u32,
}

impl TimingEdge {
    /// Creates a timing edge.
    pub fn new(target: Pin, net: NetId, delay: f64, count: u32) -> Self {
        Self {
            target,
            net,
            delay,
            count,
        }
    }

    /// Checks that the delay is non-negative and the count at least 1.
    ///
    /// `hop` is the position reported in the error.
    pub fn validate(&self, hop: usize) -> PhyResult<()> {
        if self.delay.is_nan() || self.delay < 0.0 {
            return Err(PhyDbError::NegativeDelay {
                delay: self.delay,
                hop,
            });
        }
        if self.count == 0 {
            return Err(PhyDbError::ZeroEdgeCount { hop });
        }
        Ok(())
    }

    fn matches(&self, other: &TimingEdge) -> bool {
        self.net == other.net && self.delay == other.delay
    }
}

/// A pin in the timing DAG together with its outgoing edges.
#[derive(Debug, Clone)]
pub struct TimingNode {
    id: TimingNodeId,
    pin: Pin,
    out_edges: Vec<TimingEdge>,
    out_index: HashMap<Pin, usize>,
}

impl TimingNode {
    fn new(id: TimingNodeId, pin: Pin) -> Self {
        Self {
            id,
            pin,
            out_edges: Vec::new(),
            out_index: HashMap::new(),
        }
    }

    /// Returns the ID of this node.
    pub fn id(&self) -> TimingNodeId {
        self.id
    }

    /// Returns the pin this node represents.
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Returns the outgoing edges in insertion order.
    pub fn out_edges(&self) -> &[TimingEdge] {
        &self.out_edges
    }

    /// Returns the number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    /// Returns `true` if this node has an outgoing edge toward `target`.
    pub fn has_out_edge(&self, target: Pin) -> bool {
        self.out_index.contains_key(&target)
    }

    /// Returns the outgoing edge toward `target`.
    pub fn out_edge(&self, target: Pin) -> PhyResult<&TimingEdge> {
        self.find_out_edge(target)
            .ok_or_else(|| PhyDbError::UnknownPin {
                pin: target.to_string(),
                context: "node out edges",
            })
    }

    /// Inserts a new outgoing edge; fails if one toward the same target exists.
    ///
    /// Use [`add_edge`](Self::add_edge) to merge into an existing edge.
    pub fn insert_out_edge(&mut self, edge: TimingEdge) -> PhyResult<&mut TimingEdge> {
        if !edge.target.is_mapped() {
            return Err(PhyDbError::ReservedPin);
        }
        if self.has_out_edge(edge.target) {
            return Err(PhyDbError::DuplicatePin {
                pin: edge.target.to_string(),
                context: "node out edges",
            });
        }
        let slot = self.out_edges.len();
        edge.validate(slot)?;
        self.out_edges.push(edge);
        self.out_index.insert(edge.target, slot);
        Ok(&mut self.out_edges[slot])
    }

    /// Merges `edge` into this node.
    ///
    /// If an edge toward the same target exists, its delay and net must be
    /// identical to `edge`'s and the counts are summed. Otherwise `edge` is
    /// inserted as a new outgoing edge. The node is unchanged on failure.
    pub fn add_edge(&mut self, edge: TimingEdge) -> PhyResult<()> {
        match self.out_index.get(&edge.target) {
            Some(&slot) => {
                edge.validate(slot)?;
                let merged = merge(self.pin, &self.out_edges[slot], &edge)?;
                self.out_edges[slot] = merged;
                tracing::trace!(from = %self.pin, to = %edge.target, count = merged.count, "merged timing edge");
            }
            None => {
                self.insert_out_edge(edge)?;
            }
        }
        Ok(())
    }

    fn find_out_edge(&self, target: Pin) -> Option<&TimingEdge> {
        self.out_index.get(&target).map(|&slot| &self.out_edges[slot])
    }
}

/// Returns `stored` with `edge`'s count added; fails on a net or delay
/// mismatch or if the count overflows.
fn merge(from: Pin, stored: &TimingEdge, edge: &TimingEdge) -> PhyResult<TimingEdge> {
    if !stored.matches(edge) {
        return Err(inconsistent(from, stored, edge));
    }
    let count = stored
        .count
        .checked_add(edge.count)
        .ok_or_else(|| PhyDbError::EdgeCountOverflow {
            from: from.to_string(),
            to: edge.target.to_string(),
            stored: stored.count,
            added: edge.count,
        })?;
    Ok(TimingEdge { count, ..*stored })
}

fn inconsistent(from: Pin, stored: &TimingEdge, edge: &TimingEdge) -> PhyDbError {
    PhyDbError::InconsistentEdge {
        from: from.to_string(),
        to: edge.target.to_string(),
        stored_net: stored.net.as_raw(),
        stored_delay: stored.delay,
        net: edge.net.as_raw(),
        delay: edge.delay,
    }
}

/// The merged directed graph of all replayed timing paths.
#[derive(Debug, Clone, Default)]
pub struct TimingDag {
    nodes: Vec<TimingNode>,
    index: HashMap<Pin, TimingNodeId>,
}

impl TimingDag {
    /// Creates an empty DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `pin` has a node in the DAG.
    pub fn contains(&self, pin: Pin) -> bool {
        self.index.contains_key(&pin)
    }

    /// Returns the node ID of `pin`, or `None` if it has no node.
    pub fn node_id(&self, pin: Pin) -> Option<TimingNodeId> {
        self.index.get(&pin).copied()
    }

    /// Creates the node for `pin`; fails if it already exists.
    pub fn add_node(&mut self, pin: Pin) -> PhyResult<&mut TimingNode> {
        if !pin.is_mapped() {
            return Err(PhyDbError::ReservedPin);
        }
        if self.contains(pin) {
            return Err(PhyDbError::DuplicatePin {
                pin: pin.to_string(),
                context: "timing DAG",
            });
        }
        let id = self.push_node(pin);
        Ok(&mut self.nodes[id.as_raw() as usize])
    }

    /// Returns the node for `pin`; fails if it does not exist.
    pub fn get_node(&self, pin: Pin) -> PhyResult<&TimingNode> {
        let id = self.require(pin)?;
        Ok(&self.nodes[id.as_raw() as usize])
    }

    /// Returns the node for `pin` mutably; fails if it does not exist.
    pub fn get_node_mut(&mut self, pin: Pin) -> PhyResult<&mut TimingNode> {
        let id = self.require(pin)?;
        Ok(&mut self.nodes[id.as_raw() as usize])
    }

    /// Returns the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not allocated by this DAG.
    pub fn node(&self, id: TimingNodeId) -> &TimingNode {
        &self.nodes[id.as_raw() as usize]
    }

    /// Folds `path` into the DAG.
    ///
    /// Starting at the node for the path's root (created if absent), each hop
    /// is merged into the current node and the walk advances to the hop's
    /// target, creating that node on first visit. The whole path is checked
    /// for edge consistency first, so a rejected path leaves the DAG
    /// unchanged. An empty path is a no-op.
    pub fn add_path(&mut self, path: &Path) -> PhyResult<()> {
        let Some(root) = path.root() else {
            return Ok(());
        };
        self.check_path(path)?;

        let mut current = self.ensure_node(root);
        for edge in path.edges() {
            self.nodes[current.as_raw() as usize].add_edge(*edge)?;
            current = self.ensure_node(edge.target);
        }
        tracing::trace!(root = %root, hops = path.len(), nodes = self.nodes.len(), "added path to timing DAG");
        Ok(())
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the DAG has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the total number of logical edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(TimingNode::out_degree).sum()
    }

    /// Iterates over nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &TimingNode> {
        self.nodes.iter()
    }

    /// Returns the IDs of all nodes in creation order.
    pub fn node_ids(&self) -> Vec<TimingNodeId> {
        self.nodes.iter().map(TimingNode::id).collect()
    }

    /// Returns all nodes with no incoming edges.
    pub fn source_nodes(&self) -> Vec<TimingNodeId> {
        let has_incoming: std::collections::HashSet<Pin> = self
            .nodes
            .iter()
            .flat_map(|n| n.out_edges.iter().map(|e| e.target))
            .collect();
        self.nodes
            .iter()
            .filter(|n| !has_incoming.contains(&n.pin))
            .map(|n| n.id)
            .collect()
    }

    /// Returns all nodes with no outgoing edges.
    pub fn sink_nodes(&self) -> Vec<TimingNodeId> {
        self.nodes
            .iter()
            .filter(|n| n.out_edges.is_empty())
            .map(|n| n.id)
            .collect()
    }

    /// Returns every node in topological order.
    ///
    /// Fails with [`PhyDbError::CyclicDag`] if the replayed paths formed a
    /// cycle. Edges toward pins without a node are ignored.
    pub fn topological_order(&self) -> PhyResult<Vec<TimingNodeId>> {
        let mut graph: DiGraph<TimingNodeId, ()> =
            DiGraph::with_capacity(self.nodes.len(), self.edge_count());
        for node in &self.nodes {
            graph.add_node(node.id);
        }
        for node in &self.nodes {
            for edge in &node.out_edges {
                if let Some(to) = self.node_id(edge.target) {
                    graph.add_edge(
                        NodeIndex::new(node.id.as_raw() as usize),
                        NodeIndex::new(to.as_raw() as usize),
                        (),
                    );
                }
            }
        }
        toposort(&graph, None)
            .map(|order| order.into_iter().map(|ix| graph[ix]).collect())
            .map_err(|cycle| {
                let pin = self.node(graph[cycle.node_id()]).pin;
                tracing::warn!(%pin, "timing DAG contains a cycle");
                PhyDbError::CyclicDag {
                    pin: pin.to_string(),
                }
            })
    }

    fn require(&self, pin: Pin) -> PhyResult<TimingNodeId> {
        self.node_id(pin).ok_or_else(|| PhyDbError::UnknownPin {
            pin: pin.to_string(),
            context: "timing DAG",
        })
    }

    fn push_node(&mut self, pin: Pin) -> TimingNodeId {
        let id = TimingNodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(TimingNode::new(id, pin));
        self.index.insert(pin, id);
        tracing::debug!(%pin, id = id.as_raw(), "created timing node");
        id
    }

    fn ensure_node(&mut self, pin: Pin) -> TimingNodeId {
        match self.node_id(pin) {
            Some(id) => id,
            None => self.push_node(pin),
        }
    }

    /// Replays every hop of `path` against the stored edges and the path's
    /// own earlier hops without mutating anything.
    fn check_path(&self, path: &Path) -> PhyResult<()> {
        let mut pending: HashMap<(Pin, Pin), TimingEdge> = HashMap::new();
        for (hop, (source, edge)) in path.hops().enumerate() {
            edge.validate(hop)?;
            let key = (source, edge.target);
            let stored = pending.get(&key).copied().or_else(|| {
                self.node_id(source)
                    .and_then(|id| self.node(id).find_out_edge(edge.target).copied())
            });
            let merged = match stored {
                Some(stored) => merge(source, &stored, edge)?,
                None => *edge,
            };
            pending.insert(key, merged);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(comp: i32, pin: i32) -> Pin {
        Pin::new(comp, pin)
    }

    fn path(hops: &[(Pin, Pin, u32, f64)]) -> Path {
        let mut path = Path::new();
        for &(src, tgt, net, delay) in hops {
            path.add_edge(src, tgt, NetId::from_raw(net), delay, 1).unwrap();
        }
        path
    }

    #[test]
    fn empty_dag() {
        let dag = TimingDag::new();
        assert!(dag.is_empty());
        assert_eq!(dag.edge_count(), 0);
        assert!(dag.source_nodes().is_empty());
        assert!(dag.topological_order().unwrap().is_empty());
    }

    #[test]
    fn add_node_then_get() {
        let mut dag = TimingDag::new();
        let id = dag.add_node(p(0, 0)).unwrap().id();
        assert!(dag.contains(p(0, 0)));
        assert_eq!(dag.get_node(p(0, 0)).unwrap().id(), id);
        assert_eq!(dag.node(id).pin(), p(0, 0));
    }

    #[test]
    fn add_node_twice_fails() {
        let mut dag = TimingDag::new();
        dag.add_node(p(0, 0)).unwrap();
        assert!(matches!(
            dag.add_node(p(0, 0)),
            Err(PhyDbError::DuplicatePin { .. })
        ));
        assert_eq!(dag.len(), 1);
    }

    #[test]
    fn get_missing_node_fails() {
        let dag = TimingDag::new();
        assert!(matches!(
            dag.get_node(p(4, 4)),
            Err(PhyDbError::UnknownPin { .. })
        ));
        assert_eq!(dag.node_id(p(4, 4)), None);
    }

    #[test]
    fn unmapped_node_rejected() {
        let mut dag = TimingDag::new();
        assert_eq!(dag.add_node(Pin::UNMAPPED).unwrap_err(), PhyDbError::ReservedPin);
    }

    #[test]
    fn insert_out_edge_twice_fails() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        let edge = TimingEdge::new(p(1, 0), NetId::from_raw(0), 0.2, 1);
        node.insert_out_edge(edge).unwrap();
        assert!(node.insert_out_edge(edge).is_err());
        assert_eq!(node.out_degree(), 1);
    }

    #[test]
    fn identical_edges_merge_counts() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        node.add_edge(TimingEdge::new(p(1, 0), NetId::from_raw(3), 0.2, 2))
            .unwrap();
        node.add_edge(TimingEdge::new(p(1, 0), NetId::from_raw(3), 0.2, 5))
            .unwrap();
        assert_eq!(node.out_degree(), 1);
        assert_eq!(node.out_edge(p(1, 0)).unwrap().count, 7);
    }

    #[test]
    fn mismatched_delay_rejected() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        node.add_edge(TimingEdge::new(p(1, 0), NetId::from_raw(3), 0.2, 1))
            .unwrap();
        let err = node
            .add_edge(TimingEdge::new(p(1, 0), NetId::from_raw(3), 0.25, 1))
            .unwrap_err();
        assert!(matches!(err, PhyDbError::InconsistentEdge { .. }));
        assert_eq!(node.out_edge(p(1, 0)).unwrap().count, 1);
    }

    #[test]
    fn mismatched_net_rejected() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        node.add_edge(TimingEdge::new(p(1, 0), NetId::from_raw(3), 0.2, 1))
            .unwrap();
        let err = node
            .add_edge(TimingEdge::new(p(1, 0), NetId::from_raw(4), 0.2, 1))
            .unwrap_err();
        assert!(matches!(err, PhyDbError::InconsistentEdge { net: 4, stored_net: 3, .. }));
    }

    #[test]
    fn node_rejects_negative_delay_and_zero_count() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        let net = NetId::from_raw(0);
        assert_eq!(
            node.add_edge(TimingEdge::new(p(1, 0), net, -1.0, 1))
                .unwrap_err(),
            PhyDbError::NegativeDelay {
                delay: -1.0,
                hop: 0
            }
        );
        assert!(matches!(
            node.insert_out_edge(TimingEdge::new(p(1, 0), net, f64::NAN, 1)),
            Err(PhyDbError::NegativeDelay { .. })
        ));
        assert_eq!(
            node.add_edge(TimingEdge::new(p(1, 0), net, 0.1, 0))
                .unwrap_err(),
            PhyDbError::ZeroEdgeCount { hop: 0 }
        );
        assert_eq!(node.out_degree(), 0);

        node.add_edge(TimingEdge::new(p(1, 0), net, 0.1, 1)).unwrap();
        assert!(matches!(
            node.add_edge(TimingEdge::new(p(1, 0), net, 0.1, 0)),
            Err(PhyDbError::ZeroEdgeCount { .. })
        ));
        assert_eq!(node.out_edge(p(1, 0)).unwrap().count, 1);
    }

    #[test]
    fn node_rejects_partially_unmapped_target() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        let edge = TimingEdge::new(Pin::new(1, -1), NetId::from_raw(0), 0.1, 1);
        assert_eq!(node.add_edge(edge).unwrap_err(), PhyDbError::ReservedPin);
        assert_eq!(node.out_degree(), 0);
    }

    #[test]
    fn merge_count_overflow_rejected() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        let net = NetId::from_raw(0);
        node.add_edge(TimingEdge::new(p(1, 0), net, 0.1, u32::MAX))
            .unwrap();
        assert!(matches!(
            node.add_edge(TimingEdge::new(p(1, 0), net, 0.1, 1)),
            Err(PhyDbError::EdgeCountOverflow {
                stored: u32::MAX,
                added: 1,
                ..
            })
        ));
        assert_eq!(node.out_edge(p(1, 0)).unwrap().count, u32::MAX);
    }

    #[test]
    fn count_overflow_leaves_dag_unchanged() {
        let (p1, p2, p3) = (p(0, 0), p(1, 0), p(2, 0));
        let net = NetId::from_raw(0);
        let mut saturated = Path::new();
        saturated.add_edge(p1, p2, net, 0.1, u32::MAX).unwrap();
        let mut dag = TimingDag::new();
        dag.add_path(&saturated).unwrap();

        let mut longer = Path::new();
        longer.add_edge(p1, p2, net, 0.1, 1).unwrap();
        longer.add_edge(p2, p3, net, 0.2, 1).unwrap();
        assert!(matches!(
            dag.add_path(&longer),
            Err(PhyDbError::EdgeCountOverflow { .. })
        ));
        assert_eq!(dag.len(), 2);
        assert!(!dag.contains(p3));
        assert_eq!(dag.get_node(p1).unwrap().out_edge(p2).unwrap().count, u32::MAX);
    }

    #[test]
    fn count_overflow_within_one_path_rejected() {
        let (p1, p2) = (p(0, 0), p(1, 0));
        let net = NetId::from_raw(0);
        let mut looping = Path::new();
        looping.add_edge(p1, p2, net, 0.1, u32::MAX).unwrap();
        looping.add_edge(p2, p1, net, 0.1, 1).unwrap();
        looping.add_edge(p1, p2, net, 0.1, 1).unwrap();
        let mut dag = TimingDag::new();
        assert!(dag.add_path(&looping).is_err());
        assert!(dag.is_empty());
    }

    #[test]
    fn out_edge_missing_fails() {
        let mut dag = TimingDag::new();
        let node = dag.add_node(p(0, 0)).unwrap();
        assert!(!node.has_out_edge(p(1, 0)));
        assert!(node.out_edge(p(1, 0)).is_err());
    }

    #[test]
    fn shared_prefix_becomes_shared_nodes() {
        let (p1, p2, p3, p4) = (p(0, 0), p(1, 0), p(2, 0), p(3, 0));
        let a = path(&[(p1, p2, 0, 0.1), (p2, p3, 1, 0.2)]);
        let b = path(&[(p1, p2, 0, 0.1), (p2, p4, 2, 0.3)]);

        let mut dag = TimingDag::new();
        dag.add_path(&a).unwrap();
        let p1_after_a = dag.node_id(p1).unwrap();
        dag.add_path(&b).unwrap();

        assert_eq!(dag.node_id(p1), Some(p1_after_a));
        assert_eq!(dag.len(), 4);

        let n1 = dag.get_node(p1).unwrap();
        assert_eq!(n1.out_degree(), 1);
        assert_eq!(n1.out_edge(p2).unwrap().count, 2);

        let n2 = dag.get_node(p2).unwrap();
        assert_eq!(n2.out_degree(), 2);
        assert!(n2.has_out_edge(p3));
        assert!(n2.has_out_edge(p4));

        assert_eq!(dag.source_nodes(), vec![p1_after_a]);
        assert_eq!(dag.sink_nodes().len(), 2);
    }

    #[test]
    fn empty_path_is_noop() {
        let mut dag = TimingDag::new();
        dag.add_path(&Path::new()).unwrap();
        assert!(dag.is_empty());
    }

    #[test]
    fn rejected_path_leaves_dag_unchanged() {
        let (p1, p2, p3, p4) = (p(0, 0), p(1, 0), p(2, 0), p(3, 0));
        let mut dag = TimingDag::new();
        dag.add_path(&path(&[(p1, p2, 0, 0.1), (p2, p3, 1, 0.2)]))
            .unwrap();

        // Matches on the first hop, conflicts on the second.
        let bad = path(&[(p1, p2, 0, 0.1), (p2, p3, 1, 0.9), (p3, p4, 2, 0.1)]);
        assert!(matches!(
            dag.add_path(&bad),
            Err(PhyDbError::InconsistentEdge { .. })
        ));
        assert_eq!(dag.len(), 3);
        assert_eq!(dag.get_node(p1).unwrap().out_edge(p2).unwrap().count, 1);
        assert!(!dag.contains(p4));
    }

    #[test]
    fn self_conflicting_path_rejected() {
        let (p1, p2) = (p(0, 0), p(1, 0));
        let bad = path(&[(p1, p2, 0, 0.1), (p2, p1, 0, 0.1), (p1, p2, 0, 0.4)]);
        let mut dag = TimingDag::new();
        assert!(dag.add_path(&bad).is_err());
        assert!(dag.is_empty());
    }

    #[test]
    fn topological_order_respects_edges() {
        let (p1, p2, p3, p4) = (p(0, 0), p(1, 0), p(2, 0), p(3, 0));
        let mut dag = TimingDag::new();
        dag.add_path(&path(&[(p2, p3, 1, 0.2)])).unwrap();
        dag.add_path(&path(&[(p1, p2, 0, 0.1), (p2, p4, 2, 0.3)]))
            .unwrap();

        let order = dag.topological_order().unwrap();
        let pos = |pin: Pin| {
            let id = dag.node_id(pin).unwrap();
            order.iter().position(|&x| x == id).unwrap()
        };
        assert!(pos(p1) < pos(p2));
        assert!(pos(p2) < pos(p3));
        assert!(pos(p2) < pos(p4));
    }

    #[test]
    fn cycle_detected() {
        let (p1, p2) = (p(0, 0), p(1, 0));
        let mut dag = TimingDag::new();
        dag.add_path(&path(&[(p1, p2, 0, 0.1)])).unwrap();
        dag.add_path(&path(&[(p2, p1, 0, 0.1)])).unwrap();
        assert!(matches!(
            dag.topological_order(),
            Err(PhyDbError::CyclicDag { .. })
        ));
    }

    #[test]
    fn random_paths_from_common_root_accumulate_counts() {
        let mut rng = StdRng::seed_from_u64(42);
        let root = p(0, 0);
        let mut dag = TimingDag::new();
        let mut total_first_hops = 0u32;

        for _ in 0..50 {
            let len = rng.gen_range(1..6);
            let mut hops = Vec::new();
            let mut src = root;
            for depth in 1..=len {
                // Fan-out of two per level; delay and net are functions of
                // the hop so repeated hops always agree.
                let tgt = p(depth, rng.gen_range(0..2));
                let net = (depth * 10 + tgt.pin_id) as u32;
                hops.push((src, tgt, net, f64::from(net) * 0.01));
                src = tgt;
            }
            dag.add_path(&path(&hops)).unwrap();
            total_first_hops += 1;
        }

        let root_node = dag.get_node(root).unwrap();
        let counted: u32 = root_node.out_edges().iter().map(|e| e.count).sum();
        assert_eq!(counted, total_first_hops);
        assert!(root_node.out_degree() <= 2);
        assert!(dag.topological_order().is_ok());
    }
}
