// archgen-core/src/runtime/engine.rs
// ============================================================================
// Module: ArchGen Diagram Engine
// Description: End-to-end pipeline from prompt to diagram document.
// Purpose: Own the catalog, rule tables, and layout config; wire the
//          classifier, resolver, and cache seams into one generate call.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! `generate` runs classify, expand, resolve, layout, and materialize, then
//! assembles the document with its derived title and legend groups. The
//! cache short-circuits classification and expansion: a hit replays the
//! cached selection and trails, while layout and edges always re-run so
//! config changes take effect without invalidation. Cache writes are
//! best-effort; a failing store never fails the request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Catalog;
use crate::core::CatalogOverlay;
use crate::core::Category;
use crate::core::DiagramDoc;
use crate::core::EdgeRuleSet;
use crate::core::GroupId;
use crate::core::NodeGroup;
use crate::core::NodeId;
use crate::core::PromptKey;
use crate::core::Selection;
use crate::core::SourceClass;
use crate::core::ZoneKind;
use crate::interfaces::ClassifyError;
use crate::interfaces::DiagramCache;
use crate::interfaces::NodeResolver;
use crate::interfaces::NullCache;
use crate::interfaces::NullResolver;
use crate::interfaces::PromptClassifier;
use crate::interfaces::ResolveError;
use crate::runtime::classifier::RuleClassifier;
use crate::runtime::closure::ClosureExpander;
use crate::runtime::edges::EdgeMaterializer;
use crate::runtime::layout::LayoutConfig;
use crate::runtime::layout::LayoutEngine;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Generation pipeline errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The classifier backend failed.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    /// The node resolver backend failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

// ============================================================================
// SECTION: Diagram Engine
// ============================================================================

/// The assembled pipeline. `Send + Sync`; share one across threads.
pub struct DiagramEngine {
    catalog: Catalog,
    rules: EdgeRuleSet,
    expander: ClosureExpander,
    materializer: EdgeMaterializer,
    layout: LayoutEngine,
    classifier: Box<dyn PromptClassifier + Send + Sync>,
    resolver: Box<dyn NodeResolver + Send + Sync>,
    cache: Box<dyn DiagramCache + Send + Sync>,
}

impl std::fmt::Debug for DiagramEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagramEngine").field("catalog_len", &self.catalog.len()).finish_non_exhaustive()
    }
}

impl Default for DiagramEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl DiagramEngine {
    /// Builds an engine over the built-in tables with null seams.
    #[must_use]
    pub fn new(layout: LayoutConfig) -> Self {
        let rules = EdgeRuleSet::builtin();
        Self {
            catalog: Catalog::builtin(),
            expander: ClosureExpander::new(rules.clone()),
            materializer: EdgeMaterializer::new(rules.clone()),
            layout: LayoutEngine::new(layout),
            classifier: Box::new(RuleClassifier::new(rules.clone())),
            resolver: Box::new(NullResolver),
            cache: Box::new(NullCache),
            rules,
        }
    }

    /// Replaces the classifier seam.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl PromptClassifier + Send + Sync + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Replaces the resolver seam.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl NodeResolver + Send + Sync + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replaces the cache seam.
    #[must_use]
    pub fn with_cache(mut self, cache: impl DiagramCache + Send + Sync + 'static) -> Self {
        self.cache = Box::new(cache);
        self
    }

    /// The static catalog the engine was built with.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The rule set the engine was built with.
    #[must_use]
    pub fn rules(&self) -> &EdgeRuleSet {
        &self.rules
    }

    /// Generates a diagram document for a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when the classifier or resolver backend
    /// fails. Cache failures are degraded, never surfaced.
    pub fn generate(&self, prompt: &str) -> Result<DiagramDoc, GenerateError> {
        let key = PromptKey::derive(prompt);

        // A cache hit replays the selection; layout and edges still re-run.
        let closure = match self.cache.load(&key) {
            Ok(Some(cached)) => selection_from_doc(&cached),
            Ok(None) | Err(_) => {
                let mut sel = self.classifier.classify(prompt)?;
                self.expander.expand(&mut sel);
                sel
            }
        };

        let overlay = self.build_overlay(&closure)?;
        let laid = self.layout.layout(&self.catalog, &overlay, &closure);
        let edges = self.materializer.materialize(&self.catalog, &overlay, &closure);

        let subtitle = format!("{} nodes · {} edges", laid.nodes.len(), edges.len());
        let doc = DiagramDoc {
            title: self.build_title(&closure),
            subtitle,
            prompt: prompt.to_string(),
            zones: laid.zones,
            nodes: laid.nodes,
            edges,
            groups: self.build_groups(&closure),
            decisions: closure.decisions.clone(),
            anti_patterns: closure.anti_patterns.clone(),
        };

        // Best-effort store.
        let _ = self.cache.store(&key, &doc);
        Ok(doc)
    }

    /// Late-binds closure ids missing from the static catalog.
    fn build_overlay(&self, closure: &Selection) -> Result<CatalogOverlay, ResolveError> {
        let mut overlay = CatalogOverlay::new();
        for id in &closure.nodes {
            if self.catalog.contains(id) {
                continue;
            }
            if let Some(entry) = self.resolver.resolve(id)? {
                overlay.insert(entry);
            }
        }
        Ok(overlay)
    }

    /// Title from the detected sources, at most four named.
    fn build_title(&self, closure: &Selection) -> String {
        let names: Vec<&str> = closure
            .sources
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .map(|entry| entry.display_name.as_str())
            .take(4)
            .collect();
        if names.is_empty() {
            "GCP → BigQuery Data Platform".to_string()
        } else {
            format!("{} → BigQuery Data Platform", names.join(" + "))
        }
    }

    /// Legend groups: one per present source class, one per pipeline phase,
    /// plus operations.
    fn build_groups(&self, closure: &Selection) -> Vec<NodeGroup> {
        let mut groups = Vec::new();
        for class in SourceClass::ALL {
            let members: Vec<NodeId> = closure
                .sources
                .iter()
                .filter(|id| self.rules.classify_source(id) == class)
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }
            let (id, label) = match class {
                SourceClass::OnPrem => ("onprem-sources", "On-Prem Sources"),
                SourceClass::CrossCloud => ("cross-cloud-sources", "Cross-Cloud Sources"),
                SourceClass::Saas => ("saas-sources", "SaaS Sources"),
                SourceClass::Streaming => ("streaming-sources", "Streaming Sources"),
                SourceClass::PlatformNative => ("native-sources", "Platform-Native Sources"),
            };
            groups.push(NodeGroup {
                id: GroupId::from(id),
                label: label.to_string(),
                node_ids: members,
            });
        }

        // Layer bands, source to consumer. Empty bands are skipped.
        const PHASES: [(&str, &str, &[ZoneKind]); 8] = [
            ("l1", "L1 · Sources", &[ZoneKind::Sources]),
            ("l2", "L2 · Connectivity & Identity", &[ZoneKind::Connectivity, ZoneKind::ExtIdentity]),
            ("l3", "L3 · Ingestion", &[ZoneKind::Ingestion]),
            ("l4", "L4 · Landing", &[ZoneKind::Landing]),
            ("l5", "L5 · Processing", &[ZoneKind::Processing]),
            ("l6", "L6 · Medallion", &[ZoneKind::Medallion]),
            ("l7", "L7 · Serving", &[ZoneKind::Serving]),
            ("l8", "L8 · Consumers", &[ZoneKind::Consumers]),
        ];
        for (id, label, zones) in PHASES {
            let members: Vec<NodeId> = closure
                .nodes
                .iter()
                .filter(|node| self.catalog.get(node).is_some_and(|entry| zones.contains(&entry.zone)))
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }
            groups.push(NodeGroup {
                id: GroupId::from(id),
                label: label.to_string(),
                node_ids: members,
            });
        }

        let operations: Vec<NodeId> = closure
            .nodes
            .iter()
            .filter(|id| {
                self.catalog.get(id).is_some_and(|entry| {
                    matches!(
                        entry.zone,
                        ZoneKind::Orchestration | ZoneKind::Observability | ZoneKind::Governance
                    )
                })
            })
            .cloned()
            .collect();
        if !operations.is_empty() {
            groups.push(NodeGroup {
                id: GroupId::from("operations"),
                label: "Operations & Governance".to_string(),
                node_ids: operations,
            });
        }
        groups
    }
}

/// Rebuilds a selection from a cached document.
fn selection_from_doc(doc: &DiagramDoc) -> Selection {
    let mut sel = Selection::new();
    for node in &doc.nodes {
        if node.category == Category::Source {
            sel.add_source(node.id.clone());
        } else {
            sel.add(node.id.clone());
        }
    }
    sel.decisions = doc.decisions.clone();
    sel.anti_patterns = doc.anti_patterns.clone();
    sel
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Engine generation is infallible with null seams.")]

    use super::*;

    #[test]
    fn test_oracle_prompt_end_to_end() {
        let doc = DiagramEngine::default().generate("Oracle CDC to BigQuery with Dataform").unwrap();
        assert_eq!(doc.title, "Oracle DB → BigQuery Data Platform");
        assert!(doc.node(&NodeId::from("oracle_db")).is_some());
        assert!(doc.node(&NodeId::from("datastream")).is_some());
        assert!(doc.edges.iter().any(|e| e.from.as_str() == "oracle_db" && e.to.as_str() == "datastream"));
        assert!(doc.anti_patterns.iter().any(|m| m.contains("GoldenGate")));
    }

    #[test]
    fn test_empty_prompt_still_yields_full_platform() {
        let doc = DiagramEngine::default().generate("").unwrap();
        assert!(!doc.nodes.is_empty());
        assert!(!doc.edges.is_empty());
        assert!(doc.node(&NodeId::from("bronze")).is_some());
        assert!(doc.node(&NodeId::from("looker")).is_some());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let engine = DiagramEngine::default();
        let a = engine.generate("Kafka streaming with Dataflow").unwrap();
        let b = engine.generate("Kafka streaming with Dataflow").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_groups_include_operations_legend() {
        let doc = DiagramEngine::default().generate("Oracle to BigQuery").unwrap();
        let ops = doc.groups.iter().find(|g| g.id.as_str() == "operations").unwrap();
        assert!(ops.node_ids.contains(&NodeId::from("cloud_composer")));
        assert!(ops.node_ids.contains(&NodeId::from("cloud_monitoring")));
    }

    #[test]
    fn test_groups_include_pipeline_phases() {
        let doc = DiagramEngine::default().generate("Oracle to BigQuery").unwrap();
        let l1 = doc.groups.iter().find(|g| g.id.as_str() == "l1").unwrap();
        assert!(l1.node_ids.contains(&NodeId::from("oracle_db")));
        let l6 = doc.groups.iter().find(|g| g.id.as_str() == "l6").unwrap();
        assert!(l6.node_ids.contains(&NodeId::from("gold")));
    }

    #[test]
    fn test_title_falls_back_without_sources_in_catalog() {
        let engine = DiagramEngine::default();
        let title = engine.build_title(&Selection::new());
        assert_eq!(title, "GCP → BigQuery Data Platform");
    }
}
