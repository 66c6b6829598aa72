// archgen-core/src/core/catalog.rs
// ============================================================================
// Module: ArchGen Product Catalog
// Description: Built-in product registry with two-tier lookup and validation.
// Purpose: Single immutable source of truth for every selectable node.
// Dependencies: crate::core::{identifiers, node}, serde, thiserror
// ============================================================================

//! ## Overview
//! The catalog is loaded once at process start and never mutated afterwards.
//! Requests that reference ids outside the static catalog go through a
//! request-scoped [`CatalogOverlay`] fed by a pluggable resolver, so a single
//! request can late-bind unknown ids without touching shared state.
//! Validation reports dangling references as warnings, never as failures:
//! a rule pointing at a missing id is silently skipped at runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NodeId;
use crate::core::node::CatalogEntry;
use crate::core::node::Category;
use crate::core::node::NodeTags;
use crate::core::node::ZoneKind;
use crate::core::rules::EdgeRuleSet;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Immutable product registry keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entries: BTreeMap<NodeId, CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog from a list of entries. Later duplicates win.
    #[must_use]
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let entries = entries.into_iter().map(|entry| (entry.id.clone(), entry)).collect();
        Self {
            entries,
        }
    }

    /// Looks up an entry in the static catalog.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Returns true when the id exists in the static catalog.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterates over all entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Number of entries in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks referential integrity of a rule set against this catalog.
    ///
    /// Dangling ids are a documented non-fatal failure mode: the offending
    /// rule or requirement is skipped at runtime, so validation reports
    /// warnings rather than errors.
    #[must_use]
    pub fn validate(&self, rules: &EdgeRuleSet) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        for rule in rules.edge_rules() {
            for source in &rule.sources {
                if !self.contains(source) {
                    warnings.push(ValidationWarning::UnknownRuleSource {
                        source: source.clone(),
                        target: rule.target.clone(),
                    });
                }
            }
            if !self.contains(&rule.target) {
                warnings.push(ValidationWarning::UnknownRuleTarget {
                    target: rule.target.clone(),
                });
            }
        }
        for id in rules.always_on() {
            if !self.contains(id) {
                warnings.push(ValidationWarning::UnknownAlwaysOn {
                    id: id.clone(),
                });
            }
        }
        for row in rules.source_wiring() {
            for id in row.additions() {
                if !self.contains(id) {
                    warnings.push(ValidationWarning::UnknownWiringTarget {
                        id: id.clone(),
                    });
                }
            }
        }
        warnings
    }
}

// ============================================================================
// SECTION: Validation Warnings
// ============================================================================

/// Non-fatal integrity diagnostics produced by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// An edge rule names a source id missing from the catalog.
    UnknownRuleSource {
        /// The dangling source id.
        source: NodeId,
        /// The rule's target, for context.
        target: NodeId,
    },
    /// An edge rule names a target id missing from the catalog.
    UnknownRuleTarget {
        /// The dangling target id.
        target: NodeId,
    },
    /// The always-on set names an id missing from the catalog.
    UnknownAlwaysOn {
        /// The dangling id.
        id: NodeId,
    },
    /// A source wiring row names an id missing from the catalog.
    UnknownWiringTarget {
        /// The dangling id.
        id: NodeId,
    },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRuleSource {
                source,
                target,
            } => {
                write!(f, "edge rule source `{source}` (target `{target}`) is not in the catalog")
            }
            Self::UnknownRuleTarget {
                target,
            } => write!(f, "edge rule target `{target}` is not in the catalog"),
            Self::UnknownAlwaysOn {
                id,
            } => write!(f, "always-on id `{id}` is not in the catalog"),
            Self::UnknownWiringTarget {
                id,
            } => write!(f, "source wiring id `{id}` is not in the catalog"),
        }
    }
}

// ============================================================================
// SECTION: Request-Scoped Overlay
// ============================================================================

/// Request-scoped extension of the static catalog.
///
/// Entries synthesized by a resolver for ids unknown to the static catalog
/// live here for the duration of one request. The shared catalog itself is
/// never mutated.
#[derive(Debug, Default, Clone)]
pub struct CatalogOverlay {
    extra: BTreeMap<NodeId, CatalogEntry>,
}

impl CatalogOverlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a synthesized entry into the overlay.
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.extra.insert(entry.id.clone(), entry);
    }

    /// Looks up an id in the overlay only.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&CatalogEntry> {
        self.extra.get(id)
    }

    /// Two-tier lookup: static catalog first, then the overlay.
    #[must_use]
    pub fn resolve<'a>(&'a self, catalog: &'a Catalog, id: &NodeId) -> Option<&'a CatalogEntry> {
        catalog.get(id).or_else(|| self.extra.get(id))
    }
}

// ============================================================================
// SECTION: Built-In Catalog
// ============================================================================

impl Catalog {
    /// Builds the built-in product catalog.
    ///
    /// Sort priorities order nodes within their zone; the medallion tiers in
    /// particular rely on bronze < silver < gold for the horizontal
    /// progression row.
    #[must_use]
    #[allow(clippy::too_many_lines, reason = "Flat data table; splitting obscures the registry.")]
    pub fn builtin() -> Self {
        use Category as C;
        use ZoneKind as Z;

        let entries = vec![
            // Sources: on-prem databases.
            CatalogEntry::new("oracle_db", "Oracle DB", "On-prem RDBMS", C::Source, Z::Sources)
                .with_priority(0)
                .with_tags(NodeTags {
                    keywords: owned(&["oracle", "goldengate", "logminer"]),
                    use_cases: owned(&["cdc replication", "erp offload", "legacy migration"]),
                    industries: owned(&["all"]),
                    description: "Enterprise RDBMS reached over JDBC with log-based CDC."
                        .to_string(),
                }),
            CatalogEntry::new("sqlserver_db", "SQL Server", "On-prem RDBMS", C::Source, Z::Sources)
                .with_priority(1)
                .with_tags(NodeTags {
                    keywords: owned(&["sql server", "mssql", "sqlserver"]),
                    use_cases: owned(&["cdc replication", "reporting offload"]),
                    industries: owned(&["all"]),
                    description: "Microsoft RDBMS with change tracking and CDC.".to_string(),
                }),
            CatalogEntry::new("postgresql_db", "PostgreSQL", "WAL-based CDC", C::Source, Z::Sources)
                .with_priority(2)
                .with_tags(NodeTags {
                    keywords: owned(&["postgres", "postgresql", "wal"]),
                    use_cases: owned(&["cdc replication", "operational analytics"]),
                    industries: owned(&["all"]),
                    description: "Open-source RDBMS replicated via WAL logical decoding."
                        .to_string(),
                }),
            CatalogEntry::new("mysql_db", "MySQL", "Binlog CDC", C::Source, Z::Sources)
                .with_priority(3),
            CatalogEntry::new("mongodb_db", "MongoDB", "Change streams", C::Source, Z::Sources)
                .with_priority(4),
            CatalogEntry::new("mainframe", "Mainframe", "Legacy batch", C::Source, Z::Sources)
                .with_priority(5),
            // Sources: cross-cloud.
            CatalogEntry::new("aws_s3", "AWS S3", "Cross-cloud object store", C::Source, Z::Sources)
                .with_priority(6)
                .with_tags(NodeTags {
                    keywords: owned(&["s3", "aws", "csv", "parquet", "files"]),
                    use_cases: owned(&["cross-cloud landing", "bulk file migration"]),
                    industries: owned(&["all"]),
                    description: "Cross-cloud object storage holding CSV and Parquet exports."
                        .to_string(),
                }),
            CatalogEntry::new("snowflake_src", "Snowflake", "Cloud DW export", C::Source, Z::Sources)
                .with_priority(7),
            // Sources: SaaS applications.
            CatalogEntry::new("salesforce", "Salesforce", "CRM SaaS", C::Source, Z::Sources)
                .with_priority(8)
                .with_tags(NodeTags {
                    keywords: owned(&["salesforce", "sfdc", "crm"]),
                    use_cases: owned(&["customer 360", "sales analytics", "pipeline analysis"]),
                    industries: owned(&["all"]),
                    description: "Cloud CRM exposing accounts, contacts, and opportunities \
                                  over REST and Bulk APIs."
                        .to_string(),
                }),
            CatalogEntry::new("workday", "Workday", "HCM SaaS", C::Source, Z::Sources)
                .with_priority(9)
                .with_tags(NodeTags {
                    keywords: owned(&["workday", "hcm", "hr data", "payroll"]),
                    use_cases: owned(&["hr analytics", "workforce planning", "headcount"]),
                    industries: owned(&["all"]),
                    description: "Cloud HCM and finance platform extracted via RaaS reports."
                        .to_string(),
                }),
            CatalogEntry::new("servicenow_src", "ServiceNow", "ITSM SaaS", C::Source, Z::Sources)
                .with_priority(10),
            CatalogEntry::new("sap_src", "SAP ERP", "OData/BAPI", C::Source, Z::Sources)
                .with_priority(11)
                .with_tags(NodeTags {
                    keywords: owned(&["sap", "erp", "s4hana", "odata"]),
                    use_cases: owned(&["financial reporting", "supply chain analytics"]),
                    industries: owned(&["manufacturing", "retail", "enterprise"]),
                    description: "Enterprise ERP extracted through OData services and BAPIs."
                        .to_string(),
                }),
            // Sources: streaming, platform-native, files.
            CatalogEntry::new("kafka_stream", "Kafka", "Event streaming", C::Source, Z::Sources)
                .with_priority(12)
                .with_tags(NodeTags {
                    keywords: owned(&["kafka", "event stream", "streaming"]),
                    use_cases: owned(&["real-time analytics", "event sourcing"]),
                    industries: owned(&["all"]),
                    description: "Distributed event streaming backbone for high-throughput \
                                  publish-subscribe."
                        .to_string(),
                }),
            CatalogEntry::new("cloud_sql", "Cloud SQL", "Platform-native DB", C::Source, Z::Sources)
                .with_priority(13),
            CatalogEntry::new("sftp_server", "SFTP Server", "Legacy file drop", C::Source, Z::Sources)
                .with_priority(14),
            // External identity.
            CatalogEntry::new("entra_id", "Entra ID", "SSO / federation", C::ExternalIdentity, Z::ExtIdentity)
                .with_priority(0),
            CatalogEntry::new("cyberark", "CyberArk", "PAM vault", C::ExternalIdentity, Z::ExtIdentity)
                .with_priority(1),
            // Connectivity and security inside the platform.
            CatalogEntry::new("cloud_iam", "Cloud IAM", "Identity & access", C::Connectivity, Z::Connectivity)
                .with_priority(0),
            CatalogEntry::new("cloud_kms", "Cloud KMS", "CMEK encryption", C::Security, Z::Connectivity)
                .with_priority(1),
            CatalogEntry::new("secret_manager", "Secret Manager", "Credential vault", C::Connectivity, Z::Connectivity)
                .with_priority(2),
            CatalogEntry::new("vpc", "VPC Network", "Private network", C::Connectivity, Z::Connectivity)
                .with_priority(3),
            CatalogEntry::new("vpc_sc", "VPC-SC", "Service perimeter", C::Connectivity, Z::Connectivity)
                .with_priority(4),
            CatalogEntry::new("cloud_armor", "Cloud Armor", "WAF / DDoS", C::Connectivity, Z::Connectivity)
                .with_priority(5),
            CatalogEntry::new("cloud_vpn", "Cloud VPN", "IPSec tunnel", C::Connectivity, Z::Connectivity)
                .with_priority(6),
            CatalogEntry::new("apigee", "Apigee", "API gateway", C::Connectivity, Z::Connectivity)
                .with_priority(7),
            // Ingestion.
            CatalogEntry::new("datastream", "Datastream", "Serverless CDC", C::Ingestion, Z::Ingestion)
                .with_priority(0),
            CatalogEntry::new("pubsub", "Pub/Sub", "Message bus", C::Ingestion, Z::Ingestion)
                .with_priority(1),
            CatalogEntry::new("dataflow_ing", "Dataflow", "Stream ingestion", C::Ingestion, Z::Ingestion)
                .with_priority(2),
            CatalogEntry::new("bq_dts", "BQ Data Transfer", "Scheduled loads", C::Ingestion, Z::Ingestion)
                .with_priority(3),
            CatalogEntry::new("cloud_functions", "Cloud Functions", "Serverless pull", C::Ingestion, Z::Ingestion)
                .with_priority(4),
            CatalogEntry::new("data_fusion", "Data Fusion", "Visual ETL (SAP)", C::Ingestion, Z::Ingestion)
                .with_priority(5),
            CatalogEntry::new("storage_transfer", "Storage Transfer", "Bulk file moves", C::Ingestion, Z::Ingestion)
                .with_priority(6),
            CatalogEntry::new("fivetran", "Fivetran", "Managed ELT", C::Ingestion, Z::Ingestion)
                .with_priority(7),
            CatalogEntry::new("matillion", "Matillion", "Visual ETL", C::Ingestion, Z::Ingestion)
                .with_priority(8),
            // Landing.
            CatalogEntry::new("gcs_raw", "GCS Raw Zone", "Landing bucket", C::Landing, Z::Landing)
                .with_priority(0),
            CatalogEntry::new("bq_staging", "BQ Staging", "Staging datasets", C::Landing, Z::Landing)
                .with_priority(1),
            // Processing.
            CatalogEntry::new("dataform", "Dataform", "SQL ELT", C::Processing, Z::Processing)
                .with_priority(0),
            CatalogEntry::new("dataflow_proc", "Dataflow", "Stream processing", C::Processing, Z::Processing)
                .with_priority(1),
            CatalogEntry::new("dataproc", "Dataproc", "Spark / Hadoop", C::Processing, Z::Processing)
                .with_priority(2),
            // Medallion.
            CatalogEntry::new("bronze", "Bronze", "Raw / deduplicated", C::Medallion, Z::Medallion)
                .with_priority(0),
            CatalogEntry::new("silver", "Silver", "Cleaned / conformed", C::Medallion, Z::Medallion)
                .with_priority(1),
            CatalogEntry::new("gold", "Gold", "Curated / aggregated", C::Medallion, Z::Medallion)
                .with_priority(2),
            // Serving.
            CatalogEntry::new("looker", "Looker", "Governed BI", C::Serving, Z::Serving)
                .with_priority(0),
            CatalogEntry::new("looker_studio", "Looker Studio", "Free dashboards", C::Serving, Z::Serving)
                .with_priority(1),
            CatalogEntry::new("power_bi", "Power BI", "Self-service BI", C::Serving, Z::Serving)
                .with_priority(2),
            CatalogEntry::new("cloud_run", "Cloud Run", "API serving", C::Serving, Z::Serving)
                .with_priority(3),
            CatalogEntry::new("vertex_ai", "Vertex AI", "ML platform", C::Serving, Z::Serving)
                .with_priority(4),
            CatalogEntry::new("analytics_hub", "Analytics Hub", "Data exchange", C::Serving, Z::Serving)
                .with_priority(5),
            // Consumers.
            CatalogEntry::new("analysts", "Analysts", "BI users", C::Consumer, Z::Consumers)
                .with_priority(0),
            CatalogEntry::new("executives", "Executives", "C-suite reports", C::Consumer, Z::Consumers)
                .with_priority(1),
            CatalogEntry::new("data_scientists", "Data Scientists", "ML / notebooks", C::Consumer, Z::Consumers)
                .with_priority(2),
            CatalogEntry::new("downstream_sys", "Downstream Systems", "API consumers", C::Consumer, Z::Consumers)
                .with_priority(3),
            // Orchestration.
            CatalogEntry::new("cloud_composer", "Cloud Composer", "Airflow DAGs", C::Orchestration, Z::Orchestration)
                .with_priority(0),
            CatalogEntry::new("cloud_scheduler", "Cloud Scheduler", "Cron triggers", C::Orchestration, Z::Orchestration)
                .with_priority(1),
            // Observability.
            CatalogEntry::new("cloud_monitoring", "Cloud Monitoring", "Metrics & alerts", C::Observability, Z::Observability)
                .with_priority(0),
            CatalogEntry::new("cloud_logging", "Cloud Logging", "Centralized logs", C::Observability, Z::Observability)
                .with_priority(1),
            CatalogEntry::new("audit_logs", "Audit Logs", "Compliance trail", C::Observability, Z::Observability)
                .with_priority(2),
            CatalogEntry::new("scc", "Security Command Center", "Security posture", C::Security, Z::Observability)
                .with_priority(3),
            // Governance.
            CatalogEntry::new("dataplex", "Dataplex", "Data governance", C::Governance, Z::Governance)
                .with_priority(0),
            CatalogEntry::new("data_catalog", "Data Catalog", "Metadata / lineage", C::Governance, Z::Governance)
                .with_priority(1),
            CatalogEntry::new("dataplex_dq", "Dataplex DQ", "Data quality", C::Governance, Z::Governance)
                .with_priority(2),
            CatalogEntry::new("cloud_dlp", "Cloud DLP", "PII detection", C::Governance, Z::Governance)
                .with_priority(3),
            // External alerting.
            CatalogEntry::new("pagerduty", "PagerDuty", "Incident management", C::ExternalAlerting, Z::ExtAlerting)
                .with_priority(0),
            CatalogEntry::new("wiz_cspm", "Wiz", "Cloud security posture", C::ExternalAlerting, Z::ExtAlerting)
                .with_priority(1),
            CatalogEntry::new("archer_grc", "RSA Archer", "GRC platform", C::ExternalAlerting, Z::ExtAlerting)
                .with_priority(2),
            // External logging.
            CatalogEntry::new("splunk_siem", "Splunk SIEM", "Security events", C::ExternalLogging, Z::ExtLogging)
                .with_priority(0),
            CatalogEntry::new("dynatrace_apm", "Dynatrace", "APM", C::ExternalLogging, Z::ExtLogging)
                .with_priority(1),
        ];
        Self::from_entries(entries)
    }
}

/// Converts a static string slice list into owned strings.
fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
