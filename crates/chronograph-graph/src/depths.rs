//! Graph resolve depths
//!
//! A traversal budget: per edge kind and direction, how many hops to
//! expand when building a result subgraph. A depth of 0 means "do not
//! traverse this kind/direction at all from here"; 255 is the maximum.

use crate::edge::KnowledgeGraphEdgeKind;
use serde::{Deserialize, Serialize};

/// Direction of an edge relative to the element being expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeDirection {
    Incoming,
    Outgoing,
}

/// The remaining hop budget for one edge kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeResolveDepths {
    pub incoming: u8,
    pub outgoing: u8,
}

impl EdgeResolveDepths {
    /// Create a budget with the same depth in both directions
    pub fn symmetric(depth: u8) -> Self {
        Self {
            incoming: depth,
            outgoing: depth,
        }
    }

    /// The budget for one direction
    pub fn depth(&self, direction: EdgeDirection) -> u8 {
        match direction {
            EdgeDirection::Incoming => self.incoming,
            EdgeDirection::Outgoing => self.outgoing,
        }
    }

    fn depth_mut(&mut self, direction: EdgeDirection) -> &mut u8 {
        match direction {
            EdgeDirection::Incoming => &mut self.incoming,
            EdgeDirection::Outgoing => &mut self.outgoing,
        }
    }
}

/// The per-kind traversal budget of a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResolveDepths {
    pub has_left_entity: EdgeResolveDepths,
    pub has_right_entity: EdgeResolveDepths,
}

/// Every (kind, direction) pair a traversal budget tracks
pub const EDGE_KIND_DIRECTIONS: [(KnowledgeGraphEdgeKind, EdgeDirection); 4] = [
    (KnowledgeGraphEdgeKind::HasLeftEntity, EdgeDirection::Incoming),
    (KnowledgeGraphEdgeKind::HasLeftEntity, EdgeDirection::Outgoing),
    (KnowledgeGraphEdgeKind::HasRightEntity, EdgeDirection::Incoming),
    (KnowledgeGraphEdgeKind::HasRightEntity, EdgeDirection::Outgoing),
];

impl GraphResolveDepths {
    /// Create a budget with the same depth for every kind and direction
    pub fn uniform(depth: u8) -> Self {
        Self {
            has_left_entity: EdgeResolveDepths::symmetric(depth),
            has_right_entity: EdgeResolveDepths::symmetric(depth),
        }
    }

    /// The remaining budget for one kind and direction
    pub fn depth(&self, kind: KnowledgeGraphEdgeKind, direction: EdgeDirection) -> u8 {
        match kind {
            KnowledgeGraphEdgeKind::HasLeftEntity => self.has_left_entity.depth(direction),
            KnowledgeGraphEdgeKind::HasRightEntity => self.has_right_entity.depth(direction),
        }
    }

    /// Set the budget for one kind and direction
    pub fn set_depth(&mut self, kind: KnowledgeGraphEdgeKind, direction: EdgeDirection, depth: u8) {
        let depths = match kind {
            KnowledgeGraphEdgeKind::HasLeftEntity => &mut self.has_left_entity,
            KnowledgeGraphEdgeKind::HasRightEntity => &mut self.has_right_entity,
        };
        *depths.depth_mut(direction) = depth;
    }

    /// A copy of this budget with one kind/direction spent by one hop
    pub fn decremented(&self, kind: KnowledgeGraphEdgeKind, direction: EdgeDirection) -> Self {
        let mut next = *self;
        let current = next.depth(kind, direction);
        next.set_depth(kind, direction, current.saturating_sub(1));
        next
    }

    /// Returns true if no kind/direction has budget left
    pub fn is_exhausted(&self) -> bool {
        EDGE_KIND_DIRECTIONS
            .iter()
            .all(|(kind, direction)| self.depth(*kind, *direction) == 0)
    }
}
