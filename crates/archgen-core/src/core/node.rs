// archgen-core/src/core/node.rs
// ============================================================================
// Module: ArchGen Catalog Node Types
// Description: Node categories, layout zones, and catalog entry records.
// Purpose: Define the typed data model for every product the engine can select.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A catalog entry describes one architectural product: its display metadata,
//! the fine-grained category used by edge rules and classification, and the
//! coarser layout zone it is drawn in. Several categories collapse into one
//! zone for layout while remaining distinct for rule matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NodeId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sort priority assigned to entries that do not specify one.
pub const DEFAULT_SORT_PRIORITY: u32 = 50;

// ============================================================================
// SECTION: Category
// ============================================================================

/// Fine-grained node category used for edge-rule matching and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// External data source (on-prem, cross-cloud, SaaS, streaming, files).
    Source,
    /// Network and identity plumbing inside the platform perimeter.
    Connectivity,
    /// Ingestion tooling (CDC, messaging, transfer, polling).
    Ingestion,
    /// Raw landing storage.
    Landing,
    /// Transformation and processing engines.
    Processing,
    /// Medallion storage progression tiers.
    Medallion,
    /// Serving and delivery surfaces.
    Serving,
    /// Human or system consumers of served data.
    Consumer,
    /// Scheduling and workflow orchestration.
    Orchestration,
    /// Metrics, logging, and audit tooling inside the platform.
    Observability,
    /// Data governance, cataloging, and quality tooling.
    Governance,
    /// Encryption and security-posture tooling.
    Security,
    /// Identity providers outside the platform perimeter.
    ExternalIdentity,
    /// Log aggregation vendors outside the platform.
    ExternalLogging,
    /// Alerting and incident vendors outside the platform.
    ExternalAlerting,
}

impl Category {
    /// Returns true for categories that live outside the platform perimeter.
    #[must_use]
    pub const fn is_external(self) -> bool {
        matches!(
            self,
            Self::Source | Self::ExternalIdentity | Self::ExternalLogging | Self::ExternalAlerting
        )
    }
}

// ============================================================================
// SECTION: Zone Kind
// ============================================================================

/// Layout band a node is drawn in; coarser than [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    /// Consumer band above the platform wrapper.
    Consumers,
    /// External identity column outside the wrapper, upper left.
    ExtIdentity,
    /// Source column outside the wrapper, lower left.
    Sources,
    /// Connectivity and identity column inside the wrapper.
    Connectivity,
    /// Governance band inside the wrapper, below connectivity.
    Governance,
    /// Serving band at the top of the center column.
    Serving,
    /// Medallion row nested inside the pipeline band.
    Medallion,
    /// Processing band inside the pipeline.
    Processing,
    /// Landing band inside the pipeline.
    Landing,
    /// Ingestion band at the bottom of the pipeline.
    Ingestion,
    /// Orchestration band at the top of the right column.
    Orchestration,
    /// Observability band below orchestration.
    Observability,
    /// External logging band below the wrapper.
    ExtLogging,
    /// External alerting band below the wrapper.
    ExtAlerting,
}

impl ZoneKind {
    /// Stable zone identifier string used in emitted zone rectangles.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Consumers => "consumers",
            Self::ExtIdentity => "ext-identity",
            Self::Sources => "sources",
            Self::Connectivity => "connectivity",
            Self::Governance => "governance",
            Self::Serving => "serving",
            Self::Medallion => "medallion",
            Self::Processing => "processing",
            Self::Landing => "landing",
            Self::Ingestion => "ingestion",
            Self::Orchestration => "orchestration",
            Self::Observability => "observability",
            Self::ExtLogging => "ext-logging",
            Self::ExtAlerting => "ext-alerting",
        }
    }

    /// Human-readable band label for rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Consumers => "Consumers",
            Self::ExtIdentity => "External Identity",
            Self::Sources => "Data Sources",
            Self::Connectivity => "Connectivity & Identity",
            Self::Governance => "Governance",
            Self::Serving => "Serving & Delivery",
            Self::Medallion => "Medallion Architecture",
            Self::Processing => "Processing",
            Self::Landing => "Landing",
            Self::Ingestion => "Ingestion",
            Self::Orchestration => "Orchestration",
            Self::Observability => "Observability",
            Self::ExtLogging => "External Logging",
            Self::ExtAlerting => "External Alerting",
        }
    }

    /// Returns true when the zone is drawn inside the platform wrapper.
    #[must_use]
    pub const fn is_inside_platform(self) -> bool {
        matches!(
            self,
            Self::Connectivity
                | Self::Governance
                | Self::Serving
                | Self::Medallion
                | Self::Processing
                | Self::Landing
                | Self::Ingestion
                | Self::Orchestration
                | Self::Observability
        )
    }

    /// Returns true when the zone belongs to the nested pipeline band.
    #[must_use]
    pub const fn is_pipeline(self) -> bool {
        matches!(self, Self::Medallion | Self::Processing | Self::Landing | Self::Ingestion)
    }
}

// ============================================================================
// SECTION: Catalog Entry
// ============================================================================

/// One catalog entry: a selectable architectural product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable node identifier.
    pub id: NodeId,
    /// Display name shown on the rendered node.
    pub display_name: String,
    /// Short subtitle shown under the display name.
    pub subtitle: String,
    /// Fine-grained category for rule matching.
    pub category: Category,
    /// Layout band this node is drawn in.
    pub zone: ZoneKind,
    /// Ordering hint within the zone; lower sorts earlier.
    pub sort_priority: u32,
    /// Optional search metadata used by the semantic tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<NodeTags>,
}

impl CatalogEntry {
    /// Creates a catalog entry with the default sort priority and no tags.
    #[must_use]
    pub fn new(
        id: impl Into<NodeId>,
        display_name: impl Into<String>,
        subtitle: impl Into<String>,
        category: Category,
        zone: ZoneKind,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            subtitle: subtitle.into(),
            category,
            zone,
            sort_priority: DEFAULT_SORT_PRIORITY,
            tags: None,
        }
    }

    /// Sets the sort priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Attaches search tags.
    #[must_use]
    pub fn with_tags(mut self, tags: NodeTags) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Search metadata consumed by the semantic classification tier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeTags {
    /// Keywords users type when they mean this product.
    pub keywords: Vec<String>,
    /// Business problems this product addresses.
    pub use_cases: Vec<String>,
    /// Applicable industry verticals ("all" means universal).
    pub industries: Vec<String>,
    /// Free-text description for embedding.
    pub description: String,
}
