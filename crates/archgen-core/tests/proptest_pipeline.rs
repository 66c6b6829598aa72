// crates/archgen-core/tests/proptest_pipeline.rs
// ============================================================================
// Module: Pipeline Property-Based Tests
// Description: Property tests for closure, layout, and edge invariants.
// Purpose: Detect invariant violations across arbitrary source subsets.
// ============================================================================

//! Property-based tests for the pipeline invariants: closure idempotence
//! and monotonicity, edge gating and dedup, and zone non-overlap.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use archgen_core::Catalog;
use archgen_core::CatalogOverlay;
use archgen_core::ClosureExpander;
use archgen_core::EdgeMaterializer;
use archgen_core::LayoutEngine;
use archgen_core::Category;
use archgen_core::NodeId;
use archgen_core::Selection;
use proptest::prelude::*;

/// All selectable source ids from the built-in catalog.
fn source_ids() -> Vec<String> {
    Catalog::builtin()
        .iter()
        .filter(|entry| entry.category == Category::Source)
        .map(|entry| entry.id.as_str().to_string())
        .collect()
}

/// Strategy: an arbitrary subset of the built-in sources.
fn source_subset() -> impl Strategy<Value = Vec<String>> {
    let ids = source_ids();
    proptest::sample::subsequence(ids.clone(), 0..=ids.len())
}

fn selection_of(sources: &[String]) -> Selection {
    let mut sel = Selection::new();
    for id in sources {
        sel.add_source(NodeId::from(id.as_str()));
    }
    sel
}

proptest! {
    #[test]
    fn closure_is_idempotent(sources in source_subset()) {
        let expander = ClosureExpander::default();
        let once = expander.closure_of(&selection_of(&sources));
        let twice = expander.closure_of(&once);
        prop_assert_eq!(&once.nodes, &twice.nodes);
    }

    #[test]
    fn closure_is_monotone(sources in source_subset(), extra in source_subset()) {
        let expander = ClosureExpander::default();
        let small = expander.closure_of(&selection_of(&sources));

        let mut superset = sources.clone();
        superset.extend(extra);
        let large = expander.closure_of(&selection_of(&superset));

        prop_assert!(small.nodes.is_subset(&large.nodes));
    }

    #[test]
    fn closure_contains_always_on(sources in source_subset()) {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&selection_of(&sources));
        for id in ["cloud_iam", "gcs_raw", "bronze", "silver", "gold", "looker"] {
            prop_assert!(closed.contains(&NodeId::from(id)));
        }
    }

    #[test]
    fn edges_are_gated_and_unique(sources in source_subset()) {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&selection_of(&sources));
        let edges = EdgeMaterializer::default().materialize(
            &Catalog::builtin(),
            &CatalogOverlay::new(),
            &closed,
        );

        let mut pairs = BTreeSet::new();
        for edge in &edges {
            prop_assert!(closed.contains(&edge.from), "ungated source {}", edge.from);
            prop_assert!(closed.contains(&edge.to), "ungated target {}", edge.to);
            prop_assert!(pairs.insert((edge.from.clone(), edge.to.clone())));
        }
    }

    #[test]
    fn sibling_zone_rects_never_overlap(sources in source_subset()) {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&selection_of(&sources));
        let layout = LayoutEngine::default().layout(
            &Catalog::builtin(),
            &CatalogOverlay::new(),
            &closed,
        );

        for (i, a) in layout.zones.iter().enumerate() {
            for b in layout.zones.iter().skip(i + 1) {
                let nested = a.rect.contains_rect(&b.rect) || b.rect.contains_rect(&a.rect);
                prop_assert!(
                    nested || !a.rect.overlaps(&b.rect),
                    "zones {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn every_closure_node_with_catalog_entry_is_placed(sources in source_subset()) {
        let expander = ClosureExpander::default();
        let closed = expander.closure_of(&selection_of(&sources));
        let catalog = Catalog::builtin();
        let layout = LayoutEngine::default().layout(&catalog, &CatalogOverlay::new(), &closed);

        for id in &closed.nodes {
            if catalog.contains(id) {
                prop_assert!(layout.nodes.iter().any(|n| &n.id == id), "unplaced {id}");
            }
        }
    }
}
