// archgen-core/src/runtime/closure.rs
// ============================================================================
// Module: ArchGen Closure Expander
// Description: Grows a base selection into its mandatory closure.
// Purpose: Guarantee that any selection, whatever classifier produced it,
//          contains the always-on set and the wiring its sources need.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The expander is the safety net under pluggable classifiers: it unions
//! the always-on set and, per source class present, the class's wiring row.
//! One pass suffices because additions are drawn from fixed tables keyed
//! only by the source set, which the pass never changes. The operation is
//! idempotent and monotone: expanding twice equals expanding once, and a
//! larger base never yields a smaller closure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::EdgeRuleSet;
use crate::core::Selection;
use crate::core::SourceClass;

// ============================================================================
// SECTION: Closure Expander
// ============================================================================

/// Table-driven closure expander over a rule set.
#[derive(Debug, Clone)]
pub struct ClosureExpander {
    rules: EdgeRuleSet,
}

impl Default for ClosureExpander {
    fn default() -> Self {
        Self::new(EdgeRuleSet::builtin())
    }
}

impl ClosureExpander {
    /// Creates an expander over a rule set.
    #[must_use]
    pub fn new(rules: EdgeRuleSet) -> Self {
        Self {
            rules,
        }
    }

    /// Expands a base selection into its closure, in place.
    ///
    /// Additions that were already present record no decision, so an
    /// already-closed selection passes through untouched.
    pub fn expand(&self, sel: &mut Selection) {
        let mut newly_added = false;
        for id in self.rules.always_on() {
            newly_added |= sel.add(id.clone());
        }
        if newly_added {
            sel.decide("Closure: mandatory platform services added");
        }

        let classes: BTreeSet<SourceClass> =
            sel.sources.iter().map(|id| self.rules.classify_source(id)).collect();

        for class in SourceClass::ALL {
            if !classes.contains(&class) {
                continue;
            }
            let Some(row) = self.rules.wiring_for(class) else {
                continue;
            };
            let mut wired = false;
            for id in row.additions() {
                wired |= sel.add(id.clone());
            }
            if wired {
                sel.decide(class.decision());
            }
        }
    }

    /// Expands a copy, leaving the base untouched.
    #[must_use]
    pub fn closure_of(&self, base: &Selection) -> Selection {
        let mut closed = base.clone();
        self.expand(&mut closed);
        closed
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::core::NodeId;

    use super::*;

    fn base_with_sources(ids: &[&str]) -> Selection {
        let mut sel = Selection::new();
        for id in ids {
            sel.add_source(NodeId::from(*id));
        }
        sel
    }

    #[test]
    fn test_always_on_joins_every_closure() {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&Selection::new());
        for id in ["cloud_iam", "gcs_raw", "bronze", "silver", "gold", "looker"] {
            assert!(closed.contains(&NodeId::from(id)), "missing {id}");
        }
    }

    #[test]
    fn test_onprem_source_pulls_vpn_and_datastream() {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&base_with_sources(&["oracle_db"]));
        assert!(closed.contains(&NodeId::from("cloud_vpn")));
        assert!(closed.contains(&NodeId::from("vpc")));
        assert!(closed.contains(&NodeId::from("datastream")));
    }

    #[test]
    fn test_streaming_source_pulls_stream_stack() {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&base_with_sources(&["kafka_stream"]));
        assert!(closed.contains(&NodeId::from("pubsub")));
        assert!(closed.contains(&NodeId::from("dataflow_ing")));
        assert!(closed.contains(&NodeId::from("bq_staging")));
        assert!(closed.contains(&NodeId::from("dataflow_proc")));
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let expander = ClosureExpander::default();
        let once = expander.closure_of(&base_with_sources(&["oracle_db", "kafka_stream"]));
        let twice = expander.closure_of(&once);
        assert_eq!(once.nodes, twice.nodes);
    }

    #[test]
    fn test_expansion_is_monotone() {
        let expander = ClosureExpander::default();
        let small = expander.closure_of(&base_with_sources(&["oracle_db"]));
        let large = expander.closure_of(&base_with_sources(&["oracle_db", "salesforce"]));
        assert!(small.nodes.iter().all(|id| large.contains(id)));
    }
}
