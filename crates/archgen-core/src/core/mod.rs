// archgen-core/src/core/mod.rs
// ============================================================================
// Module: ArchGen Core Types
// Description: Identifiers, catalog, rule tables, selections, and documents.
// Purpose: Pure data model shared by the runtime passes and the interfaces.
// Dependencies: serde, sha2
// ============================================================================

//! ## Overview
//! Everything in `core` is plain data: no I/O, no clocks, no global state.
//! The runtime passes consume these types and produce a [`DiagramDoc`];
//! determinism falls out of ordered collections and declaration-ordered
//! tables.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod diagram;
pub mod identifiers;
pub mod node;
pub mod prompt_key;
pub mod rules;
pub mod selection;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use catalog::Catalog;
pub use catalog::CatalogOverlay;
pub use catalog::ValidationWarning;
pub use diagram::DiagramDoc;
pub use diagram::DiagramEdge;
pub use diagram::DiagramNode;
pub use diagram::NodeGroup;
pub use diagram::Rect;
pub use diagram::ZoneRect;
pub use identifiers::EdgeId;
pub use identifiers::GroupId;
pub use identifiers::NodeId;
pub use identifiers::ZoneId;
pub use node::CatalogEntry;
pub use node::Category;
pub use node::NodeTags;
pub use node::ZoneKind;
pub use prompt_key::PromptKey;
pub use rules::EdgeCategory;
pub use rules::EdgeRule;
pub use rules::EdgeRuleSet;
pub use rules::EdgeSecurity;
pub use rules::SourceClass;
pub use rules::WiringRow;
pub use selection::Selection;
