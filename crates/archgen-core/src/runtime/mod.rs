// archgen-core/src/runtime/mod.rs
// ============================================================================
// Module: ArchGen Runtime
// Description: The four pipeline passes and their assembly.
// Purpose: Classify, expand, lay out, and materialize, in that order.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Each pass is a standalone struct over the shared rule tables, usable on
//! its own; [`engine::DiagramEngine`] wires them together behind the
//! classifier, resolver, and cache seams.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod classifier;
pub mod closure;
pub mod edges;
pub mod engine;
pub mod layout;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use classifier::RuleClassifier;
pub use closure::ClosureExpander;
pub use edges::EdgeMaterializer;
pub use engine::DiagramEngine;
pub use engine::GenerateError;
pub use layout::Layout;
pub use layout::LayoutConfig;
pub use layout::LayoutEngine;
