// archgen-core/src/core/rules.rs
// ============================================================================
// Module: ArchGen Rule Tables
// Description: Edge rules, the always-on set, and per-class source wiring.
// Purpose: Declarative tables consumed by the closure expander and the edge
//          materializer; behavior changes are table edits, not code edits.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Three tables drive diagram construction:
//!
//! - **Edge rules** describe every edge that can exist. A rule fires only
//!   when one of its sources and its target are both selected, so the table
//!   can stay maximal without growing diagrams.
//! - **Always-on** lists the nodes every diagram carries regardless of the
//!   prompt (identity, secrets, landing, processing default, medallion
//!   tiers, governed BI, pillar services).
//! - **Source wiring** adds connectivity, ingestion, and landing nodes per
//!   source class, so any selected source is guaranteed a path into the
//!   platform.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NodeId;

// ============================================================================
// SECTION: Edge Categories
// ============================================================================

/// Semantic category of an edge, orthogonal to the zones it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeCategory {
    /// Payload data movement along the pipeline.
    Data,
    /// Identity federation and credential synchronization.
    Identity,
    /// Orchestration triggers and scheduling.
    Control,
    /// Log and metric flows.
    Observe,
    /// Outbound incident and posture notifications.
    Alert,
}

impl EdgeCategory {
    /// Stable wire string for the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Identity => "identity",
            Self::Control => "control",
            Self::Observe => "observe",
            Self::Alert => "alert",
        }
    }
}

// ============================================================================
// SECTION: Edge Security
// ============================================================================

/// Transport and classification metadata attached to an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSecurity {
    /// Transport encryption in flight, e.g. `TLS 1.3 + IPSec`.
    pub transport: String,
    /// Authentication mechanism on the connection.
    pub auth: String,
    /// Data classification of the payload.
    pub classification: String,
    /// True when the connection never traverses the public internet.
    pub private: bool,
}

impl EdgeSecurity {
    /// Builds a security descriptor from its four fields.
    #[must_use]
    pub fn new(transport: &str, auth: &str, classification: &str, private: bool) -> Self {
        Self {
            transport: transport.to_string(),
            auth: auth.to_string(),
            classification: classification.to_string(),
            private,
        }
    }

    /// Default metadata for a rule that carries none of its own.
    ///
    /// Every materialized edge gets security metadata; rules without an
    /// explicit override fall back to the platform baseline.
    #[must_use]
    pub fn baseline() -> Self {
        Self::new("TLS 1.2+", "Service Account", "Internal", true)
    }
}

// ============================================================================
// SECTION: Edge Rules
// ============================================================================

/// One row of the edge rule table.
///
/// The rule materializes an edge from each selected source to the target,
/// provided the target is also selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRule {
    /// Candidate source ids; each selected one yields an edge.
    pub sources: Vec<NodeId>,
    /// The single target id.
    pub target: NodeId,
    /// Short human label rendered on the edge.
    pub label: String,
    /// Semantic category of the edge.
    pub category: EdgeCategory,
    /// Optional security override; [`EdgeSecurity::baseline`] otherwise.
    pub security: Option<EdgeSecurity>,
}

impl EdgeRule {
    fn new(sources: &[&str], target: &str, label: &str, category: EdgeCategory) -> Self {
        Self {
            sources: sources.iter().map(|id| NodeId::from(*id)).collect(),
            target: NodeId::from(target),
            label: label.to_string(),
            category,
            security: None,
        }
    }

    fn with_security(mut self, security: EdgeSecurity) -> Self {
        self.security = Some(security);
        self
    }
}

// ============================================================================
// SECTION: Source Classes
// ============================================================================

/// Connectivity class of a source system.
///
/// The class decides which connectivity, ingestion, and landing nodes the
/// closure expander pulls in for the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceClass {
    /// Databases behind the corporate firewall.
    OnPrem,
    /// Stores living in another public cloud.
    CrossCloud,
    /// SaaS applications reached over public APIs.
    Saas,
    /// Event streaming backbones.
    Streaming,
    /// Databases already inside the platform.
    PlatformNative,
}

impl SourceClass {
    /// All classes in evaluation order.
    pub const ALL: [Self; 5] =
        [Self::OnPrem, Self::CrossCloud, Self::Saas, Self::Streaming, Self::PlatformNative];

    /// Decision message recorded when a source of this class is present.
    #[must_use]
    pub const fn decision(self) -> &'static str {
        match self {
            Self::OnPrem => "Connectivity: on-prem sources reach the platform over VPN + VPC",
            Self::CrossCloud => "Connectivity: cross-cloud access federated via Entra ID + CyberArk",
            Self::Saas => "Connectivity: SaaS APIs fronted by Cloud Armor + Apigee",
            Self::Streaming => "Ingestion: Pub/Sub + Dataflow for streaming sources",
            Self::PlatformNative => "Connectivity: platform-native sources stay on the internal VPC",
        }
    }
}

/// Wiring additions for one source class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WiringRow {
    /// The class this row applies to.
    pub class: SourceClass,
    /// Connectivity and identity nodes the class requires.
    pub connectivity: Vec<NodeId>,
    /// Ingestion nodes the class requires.
    pub ingestion: Vec<NodeId>,
    /// Landing nodes the class requires.
    pub landing: Vec<NodeId>,
    /// Processing nodes the class requires beyond the default.
    pub processing: Vec<NodeId>,
}

impl WiringRow {
    fn new(class: SourceClass, connectivity: &[&str], ingestion: &[&str], landing: &[&str], processing: &[&str]) -> Self {
        let ids = |slice: &[&str]| slice.iter().map(|id| NodeId::from(*id)).collect();
        Self {
            class,
            connectivity: ids(connectivity),
            ingestion: ids(ingestion),
            landing: ids(landing),
            processing: ids(processing),
        }
    }

    /// Iterates over every id the row would add.
    pub fn additions(&self) -> impl Iterator<Item = &NodeId> {
        self.connectivity
            .iter()
            .chain(self.ingestion.iter())
            .chain(self.landing.iter())
            .chain(self.processing.iter())
    }
}

// ============================================================================
// SECTION: Rule Set
// ============================================================================

/// The complete declarative rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRuleSet {
    edge_rules: Vec<EdgeRule>,
    always_on: BTreeSet<NodeId>,
    source_wiring: Vec<WiringRow>,
    source_classes: Vec<(SourceClass, Vec<NodeId>)>,
}

impl EdgeRuleSet {
    /// Edge rules in declaration order. Order is the tie-break for
    /// deterministic edge ids.
    #[must_use]
    pub fn edge_rules(&self) -> &[EdgeRule] {
        &self.edge_rules
    }

    /// Ids present in every diagram.
    #[must_use]
    pub fn always_on(&self) -> &BTreeSet<NodeId> {
        &self.always_on
    }

    /// Wiring rows in class evaluation order.
    #[must_use]
    pub fn source_wiring(&self) -> &[WiringRow] {
        &self.source_wiring
    }

    /// Classifies a source id. Unlisted sources fall back to SaaS, the
    /// broadest API-reachable class.
    #[must_use]
    pub fn classify_source(&self, id: &NodeId) -> SourceClass {
        for (class, members) in &self.source_classes {
            if members.contains(id) {
                return *class;
            }
        }
        SourceClass::Saas
    }

    /// Wiring row for a class.
    #[must_use]
    pub fn wiring_for(&self, class: SourceClass) -> Option<&WiringRow> {
        self.source_wiring.iter().find(|row| row.class == class)
    }

    /// Builds the built-in rule set.
    #[must_use]
    #[allow(clippy::too_many_lines, reason = "Flat data table; splitting obscures the registry.")]
    pub fn builtin() -> Self {
        use EdgeCategory as E;

        let edge_rules = vec![
            // Source -> ingestion.
            EdgeRule::new(&["oracle_db", "sqlserver_db", "postgresql_db"], "datastream", "CDC", E::Data)
                .with_security(EdgeSecurity::new(
                    "TLS 1.3 + IPSec",
                    "Service Account",
                    "PII / Confidential",
                    true,
                )),
            EdgeRule::new(&["mongodb_db"], "datastream", "Change stream", E::Data)
                .with_security(EdgeSecurity::new("TLS 1.3", "x509 cert", "PII", true)),
            EdgeRule::new(&["mysql_db"], "datastream", "Binlog CDC", E::Data),
            EdgeRule::new(&["kafka_stream"], "pubsub", "Events", E::Data)
                .with_security(EdgeSecurity::new("TLS 1.3", "SASL/OAuth", "Transactional", true)),
            EdgeRule::new(&["aws_s3"], "bq_dts", "S3 load", E::Data),
            EdgeRule::new(&["aws_s3"], "storage_transfer", "Bulk copy", E::Data),
            EdgeRule::new(&["snowflake_src"], "bq_dts", "DW export", E::Data),
            EdgeRule::new(&["salesforce", "workday", "servicenow_src"], "cloud_functions", "API pull", E::Data),
            EdgeRule::new(&["salesforce", "workday", "servicenow_src"], "fivetran", "Managed ELT", E::Data),
            EdgeRule::new(&["sap_src"], "data_fusion", "OData", E::Data),
            EdgeRule::new(&["sftp_server"], "cloud_functions", "File pull", E::Data),
            EdgeRule::new(&["mainframe"], "storage_transfer", "Batch extract", E::Data),
            EdgeRule::new(&["cloud_sql"], "datastream", "CDC", E::Data),
            // Ingestion -> landing.
            EdgeRule::new(
                &["datastream", "cloud_functions", "data_fusion", "storage_transfer"],
                "gcs_raw",
                "Raw files",
                E::Data,
            ),
            EdgeRule::new(&["bq_dts", "fivetran", "matillion", "dataflow_ing"], "bq_staging", "Direct load", E::Data),
            EdgeRule::new(&["pubsub"], "dataflow_ing", "Stream", E::Data),
            // Landing -> processing.
            EdgeRule::new(&["gcs_raw"], "dataform", "ELT", E::Data),
            EdgeRule::new(&["gcs_raw"], "dataflow_proc", "Process", E::Data),
            EdgeRule::new(&["gcs_raw"], "dataproc", "Spark", E::Data),
            EdgeRule::new(&["bq_staging"], "dataform", "SQL transform", E::Data),
            EdgeRule::new(&["bq_staging"], "dataflow_proc", "Process", E::Data),
            EdgeRule::new(&["bq_staging"], "dataproc", "Spark job", E::Data),
            // Processing -> medallion progression.
            EdgeRule::new(&["dataform", "dataflow_proc", "dataproc"], "bronze", "Ingest", E::Data),
            EdgeRule::new(&["bronze"], "silver", "Clean", E::Data),
            EdgeRule::new(&["silver"], "gold", "Curate", E::Data),
            // Medallion -> serving.
            EdgeRule::new(&["gold"], "looker", "Governed BI", E::Data),
            EdgeRule::new(&["gold"], "looker_studio", "Dashboards", E::Data),
            EdgeRule::new(&["gold"], "power_bi", "DirectQuery", E::Data),
            EdgeRule::new(&["gold"], "vertex_ai", "Features", E::Data),
            EdgeRule::new(&["gold"], "cloud_run", "API", E::Data),
            EdgeRule::new(&["gold"], "analytics_hub", "Data share", E::Data),
            // Serving -> consumers.
            EdgeRule::new(&["looker", "looker_studio", "power_bi"], "analysts", "Reports", E::Data),
            EdgeRule::new(&["looker"], "executives", "Exec reports", E::Data),
            EdgeRule::new(&["vertex_ai"], "data_scientists", "ML models", E::Data),
            EdgeRule::new(&["cloud_run"], "downstream_sys", "REST API", E::Data),
            EdgeRule::new(&["analytics_hub"], "downstream_sys", "Data share", E::Data),
            // Identity federation.
            EdgeRule::new(&["entra_id"], "cloud_iam", "SSO", E::Identity),
            EdgeRule::new(&["cyberark"], "secret_manager", "Cred sync", E::Identity),
            // Orchestration control.
            EdgeRule::new(&["cloud_composer"], "dataform", "Trigger", E::Control),
            EdgeRule::new(&["cloud_composer"], "dataflow_proc", "Trigger", E::Control),
            EdgeRule::new(&["cloud_composer"], "dataproc", "Trigger", E::Control),
            EdgeRule::new(&["cloud_scheduler"], "cloud_functions", "Cron", E::Control),
            // Observability internal.
            EdgeRule::new(&["audit_logs"], "cloud_logging", "Logs", E::Observe),
            EdgeRule::new(&["cloud_logging"], "cloud_monitoring", "Metrics", E::Observe),
            // Observability -> external.
            EdgeRule::new(&["cloud_monitoring"], "pagerduty", "Alerts", E::Alert),
            EdgeRule::new(&["cloud_monitoring"], "wiz_cspm", "Posture", E::Alert),
            EdgeRule::new(&["cloud_logging"], "splunk_siem", "Log export", E::Observe),
            EdgeRule::new(&["cloud_logging"], "dynatrace_apm", "Traces", E::Observe),
        ];

        let always_on = [
            "cloud_iam",
            "secret_manager",
            "gcs_raw",
            "dataform",
            "cloud_dlp",
            "bronze",
            "silver",
            "gold",
            "looker",
            "analysts",
            "cloud_kms",
            "dataplex",
            "cloud_monitoring",
            "cloud_logging",
            "audit_logs",
            "cloud_composer",
        ]
        .into_iter()
        .map(NodeId::from)
        .collect();

        let source_wiring = vec![
            WiringRow::new(SourceClass::OnPrem, &["cloud_vpn", "vpc"], &["datastream"], &["gcs_raw"], &[]),
            WiringRow::new(SourceClass::CrossCloud, &["entra_id", "cyberark"], &["datastream"], &["gcs_raw"], &[]),
            WiringRow::new(SourceClass::Saas, &["cloud_armor", "apigee"], &["cloud_functions"], &["gcs_raw"], &[]),
            WiringRow::new(
                SourceClass::Streaming,
                &[],
                &["pubsub", "dataflow_ing"],
                &["bq_staging"],
                &["dataflow_proc"],
            ),
            WiringRow::new(SourceClass::PlatformNative, &["vpc"], &["datastream"], &["gcs_raw"], &[]),
        ];

        let member_ids = |slice: &[&str]| slice.iter().map(|id| NodeId::from(*id)).collect();
        let source_classes = vec![
            (
                SourceClass::OnPrem,
                member_ids(&[
                    "oracle_db",
                    "sqlserver_db",
                    "postgresql_db",
                    "mongodb_db",
                    "mysql_db",
                    "mainframe",
                ]),
            ),
            (SourceClass::CrossCloud, member_ids(&["aws_s3", "snowflake_src"])),
            (SourceClass::Saas, member_ids(&["salesforce", "workday", "servicenow_src", "sap_src"])),
            (SourceClass::Streaming, member_ids(&["kafka_stream"])),
            (SourceClass::PlatformNative, member_ids(&["cloud_sql"])),
        ];

        Self {
            edge_rules,
            always_on,
            source_wiring,
            source_classes,
        }
    }
}
