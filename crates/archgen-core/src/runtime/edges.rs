// archgen-core/src/runtime/edges.rs
// ============================================================================
// Module: ArchGen Edge Materializer
// Description: Turns the rule table into concrete edges for a closure.
// Purpose: Both-endpoints gating, first-rule-wins pair dedup, sequential
//          ids, boundary flags, and security metadata where it belongs.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A rule fires once per selected source, and only when its target is also
//! selected. A `(from, to)` pair is claimed by the first rule that produces
//! it; later rules naming the same pair are ignored, so the table can carry
//! redundant rows safely. Edge ids are `e1`, `e2`, ... in rule declaration
//! order, which makes documents reproducible byte for byte.
//!
//! An edge crosses the trust boundary in two cases: an external source
//! feeding an inside-platform target, or any edge terminating at a
//! consumer. Lateral traffic to external identity, logging, and alerting
//! vendors stays unflagged. Rule security is copied verbatim when present;
//! boundary-crossing edges without their own get the platform baseline,
//! and internal edges carry none.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::Catalog;
use crate::core::CatalogOverlay;
use crate::core::Category;
use crate::core::DiagramEdge;
use crate::core::EdgeId;
use crate::core::EdgeRuleSet;
use crate::core::EdgeSecurity;
use crate::core::NodeId;
use crate::core::Selection;

// ============================================================================
// SECTION: Edge Materializer
// ============================================================================

/// Materializes edges from the rule table.
#[derive(Debug, Clone)]
pub struct EdgeMaterializer {
    rules: EdgeRuleSet,
}

impl Default for EdgeMaterializer {
    fn default() -> Self {
        Self::new(EdgeRuleSet::builtin())
    }
}

impl EdgeMaterializer {
    /// Creates a materializer over a rule set.
    #[must_use]
    pub fn new(rules: EdgeRuleSet) -> Self {
        Self {
            rules,
        }
    }

    /// Materializes every edge whose endpoints are both in the closure.
    #[must_use]
    pub fn materialize(
        &self,
        catalog: &Catalog,
        overlay: &CatalogOverlay,
        closure: &Selection,
    ) -> Vec<DiagramEdge> {
        let mut edges = Vec::new();
        let mut seen: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();
        let mut next = 1u32;

        for rule in self.rules.edge_rules() {
            if !closure.contains(&rule.target) {
                continue;
            }
            for from in &rule.sources {
                if !closure.contains(from) {
                    continue;
                }
                let pair = (from.clone(), rule.target.clone());
                if !seen.insert(pair) {
                    continue;
                }
                let crosses = self.crosses_boundary(catalog, overlay, from, &rule.target);
                let security = match &rule.security {
                    Some(sec) => Some(sec.clone()),
                    None if crosses => Some(EdgeSecurity::baseline()),
                    None => None,
                };
                edges.push(DiagramEdge {
                    id: EdgeId::from(format!("e{next}")),
                    from: from.clone(),
                    to: rule.target.clone(),
                    label: rule.label.clone(),
                    category: rule.category,
                    crosses_boundary: crosses,
                    security,
                });
                next += 1;
            }
        }
        edges
    }

    /// True for external-source ingress and consumer egress, nothing else.
    fn crosses_boundary(
        &self,
        catalog: &Catalog,
        overlay: &CatalogOverlay,
        from: &NodeId,
        to: &NodeId,
    ) -> bool {
        let Some(from_entry) = overlay.resolve(catalog, from) else {
            return false;
        };
        let Some(to_entry) = overlay.resolve(catalog, to) else {
            return false;
        };
        if to_entry.category == Category::Consumer {
            return true;
        }
        from_entry.category == Category::Source && to_entry.zone.is_inside_platform()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Panic-based assertions are permitted in tests.")]

    use crate::runtime::closure::ClosureExpander;

    use super::*;

    fn edges_for(sources: &[&str]) -> Vec<DiagramEdge> {
        let mut sel = Selection::new();
        for id in sources {
            sel.add_source(NodeId::from(*id));
        }
        ClosureExpander::default().expand(&mut sel);
        EdgeMaterializer::default().materialize(&Catalog::builtin(), &CatalogOverlay::new(), &sel)
    }

    #[test]
    fn test_both_endpoints_must_be_selected() {
        let edges = edges_for(&["oracle_db"]);
        assert!(edges.iter().any(|e| e.from.as_str() == "oracle_db" && e.to.as_str() == "datastream"));
        // Kafka is absent, so no pubsub feed exists.
        assert!(!edges.iter().any(|e| e.from.as_str() == "kafka_stream"));
    }

    #[test]
    fn test_pairs_are_unique() {
        let edges = edges_for(&["oracle_db", "kafka_stream", "salesforce"]);
        let mut pairs = BTreeSet::new();
        for edge in &edges {
            assert!(pairs.insert((edge.from.clone(), edge.to.clone())), "duplicate {} -> {}", edge.from, edge.to);
        }
    }

    #[test]
    fn test_edge_ids_are_sequential() {
        let edges = edges_for(&["oracle_db"]);
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(edge.id.as_str(), format!("e{}", i + 1));
        }
    }

    fn find<'a>(edges: &'a [DiagramEdge], from: &str, to: &str) -> &'a DiagramEdge {
        edges
            .iter()
            .find(|e| e.from.as_str() == from && e.to.as_str() == to)
            .unwrap_or_else(|| panic!("missing edge {from} -> {to}"))
    }

    #[test]
    fn test_source_ingestion_edge_crosses_boundary() {
        let edges = edges_for(&["oracle_db"]);
        let cdc = find(&edges, "oracle_db", "datastream");
        assert!(cdc.crosses_boundary);
        let sec = cdc.security.as_ref().unwrap_or_else(|| panic!("missing CDC security"));
        assert_eq!(sec.transport, "TLS 1.3 + IPSec");
    }

    #[test]
    fn test_consumer_edge_crosses_boundary() {
        let edges = edges_for(&["oracle_db"]);
        let reports = find(&edges, "looker", "analysts");
        assert!(reports.crosses_boundary);
        // Crossing without rule security gets the platform baseline.
        assert_eq!(reports.security, Some(EdgeSecurity::baseline()));
    }

    #[test]
    fn test_internal_edge_stays_inside_boundary() {
        let edges = edges_for(&["oracle_db"]);
        let clean = find(&edges, "bronze", "silver");
        assert!(!clean.crosses_boundary);
        assert!(clean.security.is_none());
    }

    #[test]
    fn test_platform_to_alerting_vendor_stays_unflagged() {
        let mut sel = Selection::new();
        sel.add_source(NodeId::from("oracle_db"));
        sel.add(NodeId::from("pagerduty"));
        ClosureExpander::default().expand(&mut sel);
        let edges =
            EdgeMaterializer::default().materialize(&Catalog::builtin(), &CatalogOverlay::new(), &sel);
        let alerts = find(&edges, "cloud_monitoring", "pagerduty");
        assert!(!alerts.crosses_boundary);
    }

    #[test]
    fn test_external_identity_ingress_stays_unflagged() {
        let edges = edges_for(&["aws_s3"]);
        let sso = find(&edges, "entra_id", "cloud_iam");
        assert!(!sso.crosses_boundary);
    }

    #[test]
    fn test_every_boundary_edge_carries_security_metadata() {
        for edge in edges_for(&["oracle_db", "kafka_stream", "salesforce", "aws_s3"]) {
            if edge.crosses_boundary {
                let sec = edge
                    .security
                    .as_ref()
                    .unwrap_or_else(|| panic!("bare boundary edge {} -> {}", edge.from, edge.to));
                assert!(!sec.transport.is_empty());
                assert!(!sec.auth.is_empty());
            }
        }
    }
}
