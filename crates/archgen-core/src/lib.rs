// crates/archgen-core/src/lib.rs
// ============================================================================
// Module: ArchGen Core
// Description: Deterministic architecture diagram generation engine.
// Purpose: Turn free-text data-integration prompts into structured,
//          renderer-agnostic diagram documents.
// Dependencies: serde, sha2, thiserror
// ============================================================================

//! ## Overview
//! ArchGen converts a prompt like "Oracle CDC to BigQuery with Dataform"
//! into a complete diagram document: a rule classifier picks the base node
//! set and records its decisions, the closure expander guarantees the
//! mandatory platform services and per-source wiring, the layout engine
//! computes non-overlapping banded geometry, and the edge materializer
//! instantiates the rule table over the selection.
//!
//! Invariants:
//! - The same prompt always yields the same document.
//! - Every closure contains the always-on set.
//! - Sibling zone rectangles never overlap.
//!
//! All passes are pure synchronous functions over immutable tables;
//! [`DiagramEngine`] is `Send + Sync` and needs no locking.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::Catalog;
pub use crate::core::CatalogEntry;
pub use crate::core::CatalogOverlay;
pub use crate::core::Category;
pub use crate::core::DiagramDoc;
pub use crate::core::DiagramEdge;
pub use crate::core::DiagramNode;
pub use crate::core::EdgeCategory;
pub use crate::core::EdgeId;
pub use crate::core::EdgeRule;
pub use crate::core::EdgeRuleSet;
pub use crate::core::EdgeSecurity;
pub use crate::core::GroupId;
pub use crate::core::NodeGroup;
pub use crate::core::NodeId;
pub use crate::core::PromptKey;
pub use crate::core::Rect;
pub use crate::core::Selection;
pub use crate::core::SourceClass;
pub use crate::core::ValidationWarning;
pub use crate::core::ZoneId;
pub use crate::core::ZoneKind;
pub use crate::core::ZoneRect;
pub use crate::interfaces::CacheError;
pub use crate::interfaces::ClassifyError;
pub use crate::interfaces::DiagramCache;
pub use crate::interfaces::NodeResolver;
pub use crate::interfaces::NullCache;
pub use crate::interfaces::NullResolver;
pub use crate::interfaces::PromptClassifier;
pub use crate::interfaces::ResolveError;
pub use crate::runtime::ClosureExpander;
pub use crate::runtime::DiagramEngine;
pub use crate::runtime::EdgeMaterializer;
pub use crate::runtime::GenerateError;
pub use crate::runtime::LayoutConfig;
pub use crate::runtime::LayoutEngine;
pub use crate::runtime::RuleClassifier;
