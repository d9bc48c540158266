//! Timing paths: contiguous chains of timing edges.

use crate::graph::TimingEdge;
use crate::ids::NetId;
use crate::pin::Pin;
use phydb_common::{PhyDbError, PhyResult};
use serde::{Deserialize, Serialize};

/// An ordered chain of timing edges starting at a root pin.
///
/// Each stored edge is one hop; its source is the previous hop's target (or
/// the root for the first hop). An empty path has no root. Deserialization
/// replays every hop through [`Path::add_edge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct Path {
    root: Option<Pin>,
    edges: Vec<TimingEdge>,
}

#[derive(Deserialize)]
struct RawPath {
    root: Option<Pin>,
    edges: Vec<TimingEdge>,
}

impl TryFrom<RawPath> for Path {
    type Error = PhyDbError;

    fn try_from(raw: RawPath) -> PhyResult<Self> {
        let mut source = match (raw.root, raw.edges.is_empty()) {
            (None, true) => return Ok(Path::new()),
            (Some(root), false) => root,
            (None, false) => {
                return Err(PhyDbError::MalformedPath {
                    reason: "hops without a root",
                })
            }
            (Some(_), true) => {
                return Err(PhyDbError::MalformedPath {
                    reason: "root without hops",
                })
            }
        };
        let mut path = Path::new();
        for edge in raw.edges {
            path.add_edge(source, edge.target, edge.net, edge.delay, edge.count)?;
            source = edge.target;
        }
        Ok(path)
    }
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the hop `source -> target`.
    ///
    /// The first hop sets the root to `source`. Every later hop must start
    /// where the previous one ended, the delay must be non-negative and the
    /// count at least 1. The path is unchanged on failure.
    pub fn add_edge(
        &mut self,
        source: Pin,
        target: Pin,
        net: NetId,
        delay: f64,
        count: u32,
    ) -> PhyResult<()> {
        if !source.is_mapped() || !target.is_mapped() {
            return Err(PhyDbError::ReservedPin);
        }
        let edge = TimingEdge::new(target, net, delay, count);
        edge.validate(self.edges.len())?;
        match self.edges.last() {
            None => self.root = Some(source),
            Some(last) if last.target != source => {
                return Err(PhyDbError::DiscontinuousPath {
                    expected: last.target.to_string(),
                    found: source.to_string(),
                });
            }
            Some(_) => {}
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Resets the path to the empty state.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.root = None;
    }

    /// Returns the first pin of the path, or `None` if the path is empty.
    pub fn root(&self) -> Option<Pin> {
        self.root
    }

    /// Returns the last pin of the path, or `None` if the path is empty.
    pub fn sink(&self) -> Option<Pin> {
        self.edges.last().map(|e| e.target)
    }

    /// Returns the hops in order.
    pub fn edges(&self) -> &[TimingEdge] {
        &self.edges
    }

    /// Iterates over `(source, edge)` pairs in order.
    pub fn hops(&self) -> impl Iterator<Item = (Pin, &TimingEdge)> {
        let sources = self
            .root
            .into_iter()
            .chain(self.edges.iter().map(|e| e.target));
        sources.zip(self.edges.iter())
    }

    /// Returns the number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the path has no hops.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the sum of all hop delays.
    pub fn total_delay(&self) -> f64 {
        self.edges.iter().map(|e| e.delay).sum()
    }
}
