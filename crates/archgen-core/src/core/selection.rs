// archgen-core/src/core/selection.rs
// ============================================================================
// Module: ArchGen Selection
// Description: Node selection with its decision and anti-pattern trails.
// Purpose: The value passed from classifier to expander to layout; carries
//          the chosen ids plus the audit trail of why they were chosen.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`Selection`] is an ordered set of node ids plus two human-readable
//! trails: decisions (why nodes were added) and anti-patterns (what the
//! prompt asked for that the rules refused). The classifier produces the
//! base selection; the closure expander grows it in place. `BTreeSet`
//! ordering makes every downstream pass deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NodeId;

// ============================================================================
// SECTION: Selection
// ============================================================================

/// An ordered node selection with its audit trails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected node ids, ordered.
    pub nodes: BTreeSet<NodeId>,
    /// Source ids within `nodes`, kept separately for titling and wiring.
    pub sources: BTreeSet<NodeId>,
    /// Why each selection step happened, in pass order.
    pub decisions: Vec<String>,
    /// Requested patterns the rules refused, with the reason.
    pub anti_patterns: Vec<String>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node id. Returns true when the id was not already present.
    pub fn add(&mut self, id: NodeId) -> bool {
        self.nodes.insert(id)
    }

    /// Adds a source id to both the node set and the source set.
    pub fn add_source(&mut self, id: NodeId) {
        self.sources.insert(id.clone());
        self.nodes.insert(id);
    }

    /// Records a decision message.
    pub fn decide(&mut self, message: impl Into<String>) {
        self.decisions.push(message.into());
    }

    /// Records an anti-pattern message.
    pub fn refuse(&mut self, message: impl Into<String>) {
        self.anti_patterns.push(message.into());
    }

    /// True when the id is selected.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no nodes are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when `other` selects every node this selection does.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.nodes.is_subset(&other.nodes)
    }
}
