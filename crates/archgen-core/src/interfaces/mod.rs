// archgen-core/src/interfaces/mod.rs
// ============================================================================
// Module: ArchGen Interfaces
// Description: Backend-agnostic interfaces for classification, resolution,
//              and caching.
// Purpose: Define the contract surfaces used by the ArchGen runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how ArchGen integrates with pluggable backends without
//! embedding backend-specific details. Implementations must be deterministic
//! for a given input; the built-in rule classifier is the reference
//! implementation of [`PromptClassifier`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::CatalogEntry;
use crate::core::DiagramDoc;
use crate::core::NodeId;
use crate::core::PromptKey;
use crate::core::Selection;

// ============================================================================
// SECTION: Prompt Classifier
// ============================================================================

/// Classifier errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The classifier backend reported an error.
    #[error("classifier error: {0}")]
    Backend(String),
}

/// Maps a free-text prompt to a base node selection.
///
/// Implementations may consult any backend, but the returned selection must
/// be reproducible for the same prompt. Downstream passes guarantee the
/// mandatory closure regardless of what the classifier returns.
pub trait PromptClassifier {
    /// Classifies a prompt into a base selection with decision trails.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] when the backend cannot classify.
    fn classify(&self, prompt: &str) -> Result<Selection, ClassifyError>;
}

// ============================================================================
// SECTION: Node Resolver
// ============================================================================

/// Node resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver backend reported an error.
    #[error("node resolver error: {0}")]
    Backend(String),
}

/// Late-binds node ids unknown to the static catalog.
///
/// Resolved entries live in a request-scoped overlay; the shared catalog is
/// never mutated. Returning `Ok(None)` means the id stays unknown and the
/// runtime skips whatever referenced it.
pub trait NodeResolver {
    /// Resolves an unknown id into a synthesized catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the backend fails; an unknown id is
    /// `Ok(None)`, not an error.
    fn resolve(&self, id: &NodeId) -> Result<Option<CatalogEntry>, ResolveError>;
}

/// Resolver that knows nothing. Unknown ids stay unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl NodeResolver for NullResolver {
    fn resolve(&self, _id: &NodeId) -> Result<Option<CatalogEntry>, ResolveError> {
        Ok(None)
    }
}

// ============================================================================
// SECTION: Diagram Cache
// ============================================================================

/// Cache errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cache I/O error.
    #[error("diagram cache io error: {0}")]
    Io(String),
    /// Cached data failed to deserialize.
    #[error("diagram cache corruption: {0}")]
    Corrupt(String),
}

/// Keyed store for generated documents.
///
/// Keys are normalized prompt digests, so equivalent prompts share entries.
/// A cache miss is `Ok(None)`; errors are reserved for genuine backend
/// failures.
pub trait DiagramCache {
    /// Loads a cached document by prompt key.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails.
    fn load(&self, key: &PromptKey) -> Result<Option<DiagramDoc>, CacheError>;

    /// Stores a document under its prompt key.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails.
    fn store(&self, key: &PromptKey, doc: &DiagramDoc) -> Result<(), CacheError>;
}

/// Cache that never hits and never stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl DiagramCache for NullCache {
    fn load(&self, _key: &PromptKey) -> Result<Option<DiagramDoc>, CacheError> {
        Ok(None)
    }

    fn store(&self, _key: &PromptKey, _doc: &DiagramDoc) -> Result<(), CacheError> {
        Ok(())
    }
}
