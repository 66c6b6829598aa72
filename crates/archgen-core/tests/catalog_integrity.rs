// crates/archgen-core/tests/catalog_integrity.rs
// ============================================================================
// Module: Catalog Integrity Tests
// Description: Referential integrity of the built-in tables.
// ============================================================================
//! ## Overview
//! The built-in rule set must reference only built-in catalog ids; the
//! validator must also report danglers in damaged tables without failing.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use archgen_core::Catalog;
use archgen_core::CatalogEntry;
use archgen_core::CatalogOverlay;
use archgen_core::Category;
use archgen_core::EdgeRuleSet;
use archgen_core::NodeId;
use archgen_core::ValidationWarning;
use archgen_core::ZoneKind;

#[test]
fn builtin_tables_are_internally_consistent() {
    let warnings = Catalog::builtin().validate(&EdgeRuleSet::builtin());
    assert!(warnings.is_empty(), "dangling references: {warnings:?}");
}

#[test]
fn validator_reports_unknown_rule_endpoints() {
    // A trimmed catalog makes most rule endpoints dangle.
    let catalog = Catalog::from_entries(vec![CatalogEntry::new(
        "oracle_db",
        "Oracle DB",
        "On-prem RDBMS",
        Category::Source,
        ZoneKind::Sources,
    )]);
    let warnings = catalog.validate(&EdgeRuleSet::builtin());
    assert!(warnings.iter().any(|w| matches!(w, ValidationWarning::UnknownRuleTarget { .. })));
    assert!(warnings.iter().any(|w| matches!(w, ValidationWarning::UnknownAlwaysOn { .. })));
}

#[test]
fn overlay_lookup_prefers_the_static_catalog() {
    let catalog = Catalog::builtin();
    let mut overlay = CatalogOverlay::new();
    overlay.insert(CatalogEntry::new(
        "oracle_db",
        "Shadowed",
        "Should not win",
        Category::Source,
        ZoneKind::Sources,
    ));
    let entry = overlay.resolve(&catalog, &NodeId::from("oracle_db")).unwrap();
    assert_eq!(entry.display_name, "Oracle DB");
}

#[test]
fn overlay_supplies_entries_the_catalog_lacks() {
    let catalog = Catalog::builtin();
    let mut overlay = CatalogOverlay::new();
    let id = NodeId::from("custom_warehouse");
    assert!(overlay.resolve(&catalog, &id).is_none());
    overlay.insert(CatalogEntry::new(
        "custom_warehouse",
        "Custom Warehouse",
        "Late-bound",
        Category::Source,
        ZoneKind::Sources,
    ));
    assert!(overlay.resolve(&catalog, &id).is_some());
}

#[test]
fn source_priorities_order_the_medallion_progression() {
    let catalog = Catalog::builtin();
    let priority = |id: &str| catalog.get(&NodeId::from(id)).unwrap().sort_priority;
    assert!(priority("bronze") < priority("silver"));
    assert!(priority("silver") < priority("gold"));
}
