// archgen-core/src/core/diagram.rs
// ============================================================================
// Module: ArchGen Diagram Document
// Description: The final structured diagram document and its parts.
// Purpose: Renderer-agnostic output of the pipeline; positions are absolute
//          canvas coordinates so a renderer needs no further layout work.
// Dependencies: crate::core::{identifiers, node, rules}, serde
// ============================================================================

//! ## Overview
//! A [`DiagramDoc`] is fully self-describing: zones with absolute geometry
//! and parent nesting, nodes placed inside their zones, edges with security
//! metadata and boundary flags, plus the decision and anti-pattern trails
//! carried over from classification. Serialization order is struct order,
//! so documents diff cleanly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EdgeId;
use crate::core::identifiers::GroupId;
use crate::core::identifiers::NodeId;
use crate::core::identifiers::ZoneId;
use crate::core::node::Category;
use crate::core::rules::EdgeCategory;
use crate::core::rules::EdgeSecurity;

// ============================================================================
// SECTION: Geometry
// ============================================================================

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Builds a rectangle from origin and size.
    #[must_use]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w,
            h,
        }
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.h
    }

    /// True when the interiors of both rectangles intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when `other` lies entirely inside this rectangle.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

// ============================================================================
// SECTION: Zones
// ============================================================================

/// A placed zone band with absolute geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRect {
    /// Stable zone id.
    pub id: ZoneId,
    /// Display label, upper-cased by convention.
    pub label: String,
    /// Absolute geometry.
    #[serde(flatten)]
    pub rect: Rect,
    /// Enclosing zone, if any. Wrappers nest: pipeline inside platform.
    pub parent: Option<ZoneId>,
    /// Paint order; parents paint below children.
    pub z_index: u8,
    /// Dashed border styling hint.
    pub dashed: bool,
    /// Filled background styling hint.
    pub filled: bool,
}

// ============================================================================
// SECTION: Nodes and Edges
// ============================================================================

/// A placed node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Stable node id.
    pub id: NodeId,
    /// Display name.
    pub label: String,
    /// One-line subtitle under the label.
    pub subtitle: String,
    /// Functional category.
    pub category: Category,
    /// The zone this node sits in.
    pub zone: ZoneId,
    /// Absolute geometry.
    #[serde(flatten)]
    pub rect: Rect,
}

/// A materialized edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    /// Sequential edge id, `e1`, `e2`, ... in rule order.
    pub id: EdgeId,
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Short label rendered on the edge.
    pub label: String,
    /// Semantic category.
    pub category: EdgeCategory,
    /// True when the edge crosses the platform trust boundary.
    pub crosses_boundary: bool,
    /// Transport and classification metadata. Present on boundary-crossing
    /// edges and on edges whose rule declares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<EdgeSecurity>,
}

/// A named group of nodes, used for legends and selection aids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGroup {
    /// Stable group id.
    pub id: GroupId,
    /// Display label.
    pub label: String,
    /// Member node ids, in display order.
    pub node_ids: Vec<NodeId>,
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// The complete diagram document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramDoc {
    /// Derived title, e.g. `Oracle DB → BigQuery Data Platform`.
    pub title: String,
    /// Derived subtitle with node and edge counts.
    pub subtitle: String,
    /// The prompt the document was generated from.
    pub prompt: String,
    /// Placed zones, paint order.
    pub zones: Vec<ZoneRect>,
    /// Placed nodes.
    pub nodes: Vec<DiagramNode>,
    /// Materialized edges, id order.
    pub edges: Vec<DiagramEdge>,
    /// Node groups for legends.
    pub groups: Vec<NodeGroup>,
    /// Classification decision trail.
    pub decisions: Vec<String>,
    /// Refused patterns with reasons.
    pub anti_patterns: Vec<String>,
}

impl DiagramDoc {
    /// Looks up a placed node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Looks up a placed zone by id.
    #[must_use]
    pub fn zone(&self, id: &ZoneId) -> Option<&ZoneRect> {
        self.zones.iter().find(|zone| &zone.id == id)
    }
}
