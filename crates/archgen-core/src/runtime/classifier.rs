// archgen-core/src/runtime/classifier.rs
// ============================================================================
// Module: ArchGen Rule Classifier
// Description: Layered keyword classifier from prompt to base selection.
// Purpose: Deterministic reference implementation of `PromptClassifier`;
//          evaluates six layers in fixed order and records every decision.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The classifier walks the prompt through six layers: sources,
//! connectivity, ingestion, processing, serving and consumers, then the
//! cross-cutting pillars. Layers never remove nodes, so evaluation order
//! only affects the decision trail, not the final set. Within a layer where
//! alternatives compete (ingestion tool, processing engine, orchestrator)
//! the first matching branch in declaration order wins and later branches
//! are not consulted.
//!
//! Matching is plain lower-cased substring containment. That is deliberate:
//! the goal is a predictable engine whose behavior is auditable from the
//! decision trail, not linguistic accuracy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EdgeRuleSet;
use crate::core::NodeId;
use crate::core::Selection;
use crate::core::SourceClass;
use crate::core::prompt_key;
use crate::interfaces::ClassifyError;
use crate::interfaces::PromptClassifier;

// ============================================================================
// SECTION: Keyword Tables
// ============================================================================

/// Source detection table: id, trigger keywords, decision message.
const SOURCE_KEYWORDS: &[(&str, &[&str], &str)] = &[
    ("aws_s3", &["s3", "aws", "csv", "parquet", "files"], "Sources: AWS S3 detected, cross-cloud pattern"),
    ("oracle_db", &["oracle"], "Sources: Oracle DB detected, on-prem CDC pattern"),
    ("sqlserver_db", &["sql server", "mssql", "sqlserver"], "Sources: SQL Server detected, on-prem CDC pattern"),
    ("postgresql_db", &["postgres"], "Sources: PostgreSQL detected, WAL CDC pattern"),
    ("mysql_db", &["mysql"], "Sources: MySQL detected, binlog CDC pattern"),
    ("mongodb_db", &["mongodb", "mongo"], "Sources: MongoDB detected, change stream pattern"),
    ("mainframe", &["mainframe", "as400", "cobol"], "Sources: Mainframe detected, legacy batch pattern"),
    ("snowflake_src", &["snowflake"], "Sources: Snowflake detected, DW export pattern"),
    ("salesforce", &["salesforce", "crm"], "Sources: Salesforce detected, SaaS API pattern"),
    ("workday", &["workday", "hcm", "hr data"], "Sources: Workday detected, SaaS API pattern"),
    ("servicenow_src", &["servicenow", "itsm"], "Sources: ServiceNow detected, SaaS API pattern"),
    ("sap_src", &["sap", "erp"], "Sources: SAP detected, OData/BAPI pattern"),
    ("kafka_stream", &["kafka", "event stream", "streaming"], "Sources: Kafka detected, streaming pattern"),
    ("cloud_sql", &["cloud sql"], "Sources: Cloud SQL detected, platform-native CDC"),
    ("sftp_server", &["sftp", "ftp"], "Sources: SFTP detected, legacy file transfer pattern"),
];

/// Default source when nothing in the prompt matches.
const DEFAULT_SOURCE: &str = "oracle_db";

/// Industry vertical table: trigger keywords, extra ids, decision message.
const INDUSTRY_KEYWORDS: &[(&[&str], &[&str], &str)] = &[
    (
        &["healthcare", "hipaa", "patient", "phi"],
        &["cloud_dlp", "archer_grc"],
        "Industry: healthcare vertical, PHI scanning + GRC attestation emphasized",
    ),
    (
        &["finance", "banking", "sox", "pci"],
        &["archer_grc", "audit_logs"],
        "Industry: financial vertical, GRC + audit trail emphasized",
    ),
];

// ============================================================================
// SECTION: Rule Classifier
// ============================================================================

/// Layered keyword classifier over the built-in rule tables.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    rules: EdgeRuleSet,
    default_source: NodeId,
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(EdgeRuleSet::builtin())
    }
}

impl RuleClassifier {
    /// Creates a classifier over a rule set.
    #[must_use]
    pub fn new(rules: EdgeRuleSet) -> Self {
        Self {
            rules,
            default_source: NodeId::from(DEFAULT_SOURCE),
        }
    }

    /// Replaces the fallback source used when no keyword matches.
    #[must_use]
    pub fn with_default_source(mut self, id: NodeId) -> Self {
        self.default_source = id;
        self
    }

    /// Layer 1: source detection plus the fallback default.
    fn detect_sources(&self, prompt: &str, sel: &mut Selection) {
        for (id, keywords, decision) in SOURCE_KEYWORDS {
            if contains_any(prompt, keywords) {
                sel.add_source(NodeId::from(*id));
                sel.decide(*decision);
            }
        }
        if sel.sources.is_empty() {
            sel.add_source(self.default_source.clone());
            sel.decide(format!("Sources: none detected, defaulting to {}", self.default_source));
        }
    }

    /// Layer 2: connectivity and identity. The perimeter set is mandatory.
    fn connectivity(&self, sel: &mut Selection) {
        for id in ["cloud_iam", "secret_manager", "vpc", "vpc_sc"] {
            sel.add(NodeId::from(id));
        }
        sel.decide("Connectivity: IAM + Secret Manager + VPC + VPC-SC (mandatory perimeter)");

        let classes = self.present_classes(sel);
        if classes.contains(&SourceClass::OnPrem) {
            sel.add(NodeId::from("cloud_vpn"));
            sel.decide("Connectivity: on-prem sources reach the platform over Cloud VPN");
        }
        if classes.contains(&SourceClass::CrossCloud) {
            sel.add(NodeId::from("entra_id"));
            sel.add(NodeId::from("cyberark"));
            sel.decide("Connectivity: cross-cloud access federated via Entra ID + CyberArk");
        }
        if classes.contains(&SourceClass::Saas) {
            sel.add(NodeId::from("cloud_armor"));
            sel.add(NodeId::from("apigee"));
            sel.decide("Connectivity: SaaS APIs fronted by Cloud Armor + Apigee");
        }
    }

    /// Layer 3: ingestion. Explicit tool mentions take precedence over the
    /// class-derived default.
    fn ingestion(&self, prompt: &str, sel: &mut Selection) {
        let classes = self.present_classes(sel);

        if contains_any(prompt, &["bq dts", "data transfer"]) {
            sel.add(NodeId::from("bq_dts"));
            sel.decide("Ingestion: BigQuery Data Transfer selected");
            if !prompt.contains("dataflow") {
                sel.refuse("Skipped Dataflow: BQ Data Transfer loads S3 and SaaS sources natively");
            }
        } else if classes.contains(&SourceClass::OnPrem) {
            sel.add(NodeId::from("datastream"));
            sel.decide("Ingestion: on-prem relational sources use Datastream serverless CDC");
            if prompt.contains("oracle") && !prompt.contains("goldengate") {
                sel.refuse("Using Datastream instead of GoldenGate: serverless, no license cost");
            }
        }

        if classes.contains(&SourceClass::Streaming) {
            sel.add(NodeId::from("pubsub"));
            sel.add(NodeId::from("dataflow_ing"));
            sel.decide("Ingestion: Pub/Sub + Dataflow for streaming sources");
        }

        if classes.contains(&SourceClass::Saas) {
            if prompt.contains("fivetran") {
                sel.add(NodeId::from("fivetran"));
                sel.decide("Ingestion: Fivetran selected for SaaS sources");
            } else if prompt.contains("matillion") {
                sel.add(NodeId::from("matillion"));
                sel.decide("Ingestion: Matillion selected for SaaS sources");
            } else {
                sel.add(NodeId::from("cloud_functions"));
                sel.decide("Ingestion: Cloud Functions for SaaS API polling");
                sel.refuse("Skipped Matillion/Fivetran: Cloud Functions polls SaaS APIs without vendor cost");
            }
        }

        if sel.contains(&NodeId::from("sap_src")) {
            sel.add(NodeId::from("data_fusion"));
            sel.decide("Ingestion: SAP extracted through Data Fusion's SAP connector");
        }
        if sel.contains(&NodeId::from("sftp_server")) {
            sel.add(NodeId::from("cloud_functions"));
            sel.decide("Ingestion: Cloud Functions pulls files from SFTP");
        }
        if prompt.contains("storage transfer") {
            sel.add(NodeId::from("storage_transfer"));
            sel.decide("Ingestion: Storage Transfer Service for bulk file moves");
        }

        // Landing follows the ingestion tools picked above.
        if ["datastream", "storage_transfer", "cloud_functions", "data_fusion"]
            .iter()
            .any(|id| sel.contains(&NodeId::from(*id)))
        {
            sel.add(NodeId::from("gcs_raw"));
            sel.decide("Landing: GCS raw zone for file-based ingestion");
        }
        if ["bq_dts", "dataflow_ing", "matillion", "fivetran"]
            .iter()
            .any(|id| sel.contains(&NodeId::from(*id)))
        {
            sel.add(NodeId::from("bq_staging"));
            sel.decide("Landing: BigQuery staging datasets for direct loads");
        }
    }

    /// Layer 4: processing engine, first matching branch wins.
    fn processing(&self, prompt: &str, sel: &mut Selection) {
        let streaming = self.present_classes(sel).contains(&SourceClass::Streaming);

        if contains_any(prompt, &["dataform", "sql", "elt"]) {
            sel.add(NodeId::from("dataform"));
            sel.decide("Processing: Dataform for SQL ELT");
        } else if streaming {
            sel.add(NodeId::from("dataflow_proc"));
            sel.decide("Processing: Dataflow for stream processing");
        } else if contains_any(prompt, &["spark", "dataproc"]) {
            sel.add(NodeId::from("dataproc"));
            sel.decide("Processing: Dataproc for Spark workloads");
        } else {
            sel.add(NodeId::from("dataform"));
            sel.decide("Processing: defaulting to Dataform SQL ELT");
        }

        sel.add(NodeId::from("dataplex_dq"));
        sel.add(NodeId::from("cloud_dlp"));
        sel.decide("Processing: quality gates via Dataplex DQ + Cloud DLP (mandatory)");

        sel.add(NodeId::from("bronze"));
        sel.add(NodeId::from("silver"));
        sel.add(NodeId::from("gold"));
        sel.decide("Medallion: bronze / silver / gold tiers (mandatory)");
    }

    /// Layer 5: serving and consumers.
    fn serving(&self, prompt: &str, sel: &mut Selection) {
        sel.add(NodeId::from("looker"));
        sel.decide("Serving: Looker for governed BI (mandatory)");

        if contains_any(prompt, &["power bi", "powerbi"]) {
            sel.add(NodeId::from("power_bi"));
            sel.decide("Serving: Power BI for self-service BI");
        }
        if prompt.contains("looker studio") {
            sel.add(NodeId::from("looker_studio"));
            sel.decide("Serving: Looker Studio dashboards");
        }
        if contains_any(prompt, &["api", "serving", "microservice"]) {
            sel.add(NodeId::from("cloud_run"));
            sel.decide("Serving: Cloud Run API layer");
        }
        if contains_any(prompt, &["ml", "machine learning", "vertex", "ai"]) {
            sel.add(NodeId::from("vertex_ai"));
            sel.decide("Serving: Vertex AI ML platform");
        }
        if contains_any(prompt, &["analytics hub", "data exchange", "data sharing"]) {
            sel.add(NodeId::from("analytics_hub"));
            sel.decide("Serving: Analytics Hub for data exchange");
        }

        sel.add(NodeId::from("analysts"));
        sel.decide("Consumers: analysts (mandatory)");
        if contains_any(prompt, &["data scien", "notebook", "ml"]) {
            sel.add(NodeId::from("data_scientists"));
            sel.decide("Consumers: data scientists");
        }
        if contains_any(prompt, &["api", "downstream", "feed"]) {
            sel.add(NodeId::from("downstream_sys"));
            sel.decide("Consumers: downstream systems");
        }
        if contains_any(prompt, &["executive", "report", "c-suite"]) {
            sel.add(NodeId::from("executives"));
            sel.decide("Consumers: executives");
        }
    }

    /// Layer 6: orchestration, observability, security, governance.
    fn pillars(&self, prompt: &str, sel: &mut Selection) {
        if contains_any(prompt, &["composer", "airflow", "dag", "orchestrat"]) {
            sel.add(NodeId::from("cloud_composer"));
            sel.decide("Orchestration: Cloud Composer (Airflow)");
        } else if contains_any(prompt, &["scheduler", "cron"]) {
            sel.add(NodeId::from("cloud_scheduler"));
            sel.decide("Orchestration: Cloud Scheduler for simple cron triggers");
        } else {
            sel.add(NodeId::from("cloud_composer"));
            sel.decide("Orchestration: defaulting to Cloud Composer for DAG management");
        }

        for id in ["cloud_monitoring", "cloud_logging", "audit_logs", "pagerduty"] {
            sel.add(NodeId::from(id));
        }
        sel.decide("Observability: Monitoring + Logging + Audit Logs + PagerDuty (mandatory)");
        sel.add(NodeId::from("wiz_cspm"));
        sel.decide("Observability: Wiz for cloud security posture (mandatory)");

        if contains_any(prompt, &["splunk", "siem"]) {
            sel.add(NodeId::from("splunk_siem"));
            sel.decide("Observability: Splunk SIEM for security event correlation");
        }
        if contains_any(prompt, &["dynatrace", "apm"]) {
            sel.add(NodeId::from("dynatrace_apm"));
            sel.decide("Observability: Dynatrace APM");
        }

        sel.add(NodeId::from("cloud_kms"));
        sel.decide("Security: Cloud KMS for CMEK encryption (mandatory)");
        if contains_any(prompt, &["scc", "security command", "posture"]) {
            sel.add(NodeId::from("scc"));
            sel.decide("Security: Security Command Center");
        }

        sel.add(NodeId::from("dataplex"));
        sel.add(NodeId::from("data_catalog"));
        sel.decide("Governance: Dataplex + Data Catalog (mandatory)");
        if prompt.contains("lineage") {
            sel.decide("Governance: Data Catalog lineage tracking enabled");
        }

        if contains_any(prompt, &["archer", "grc", "compliance"]) {
            sel.add(NodeId::from("archer_grc"));
            sel.decide("Vendor: RSA Archer GRC");
        }

        for (keywords, ids, decision) in INDUSTRY_KEYWORDS {
            if contains_any(prompt, keywords) {
                for id in *ids {
                    sel.add(NodeId::from(*id));
                }
                sel.decide(*decision);
            }
        }
    }

    /// Source classes present in the current selection.
    fn present_classes(&self, sel: &Selection) -> Vec<SourceClass> {
        let mut classes = Vec::new();
        for id in &sel.sources {
            let class = self.rules.classify_source(id);
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        classes
    }
}

impl PromptClassifier for RuleClassifier {
    fn classify(&self, prompt: &str) -> Result<Selection, ClassifyError> {
        let prompt = prompt_key::normalize(prompt);
        let mut sel = Selection::new();
        self.detect_sources(&prompt, &mut sel);
        self.connectivity(&mut sel);
        self.ingestion(&prompt, &mut sel);
        self.processing(&prompt, &mut sel);
        self.serving(&prompt, &mut sel);
        self.pillars(&prompt, &mut sel);
        Ok(sel)
    }
}

/// True when any keyword occurs in the prompt.
fn contains_any(prompt: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| prompt.contains(kw))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Rule classification is infallible in tests.")]

    use super::*;

    fn classify(prompt: &str) -> Selection {
        RuleClassifier::default().classify(prompt).unwrap()
    }

    #[test]
    fn test_oracle_prompt_selects_cdc_path() {
        let sel = classify("Oracle CDC to BigQuery with Dataform");
        assert!(sel.contains(&NodeId::from("oracle_db")));
        assert!(sel.contains(&NodeId::from("datastream")));
        assert!(sel.contains(&NodeId::from("cloud_vpn")));
        assert!(sel.contains(&NodeId::from("dataform")));
        assert!(sel.anti_patterns.iter().any(|m| m.contains("GoldenGate")));
    }

    #[test]
    fn test_empty_prompt_defaults_to_oracle() {
        let sel = classify("");
        assert!(sel.sources.contains(&NodeId::from("oracle_db")));
        assert!(sel.contains(&NodeId::from("bronze")));
        assert!(sel.contains(&NodeId::from("looker")));
        assert!(sel.contains(&NodeId::from("analysts")));
    }

    #[test]
    fn test_default_source_is_configurable() {
        let classifier =
            RuleClassifier::default().with_default_source(NodeId::from("cloud_sql"));
        let sel = classifier.classify("").unwrap();
        assert!(sel.sources.contains(&NodeId::from("cloud_sql")));
        assert!(!sel.sources.contains(&NodeId::from("oracle_db")));
    }

    #[test]
    fn test_streaming_prompt_uses_dataflow_not_batch_cdc() {
        let sel = classify("Kafka streaming into the platform with Dataflow");
        assert!(sel.contains(&NodeId::from("kafka_stream")));
        assert!(sel.contains(&NodeId::from("pubsub")));
        assert!(sel.contains(&NodeId::from("dataflow_ing")));
        assert!(!sel.contains(&NodeId::from("datastream")));
    }

    #[test]
    fn test_saas_default_refuses_vendor_elt() {
        let sel = classify("Salesforce pipeline");
        assert!(sel.contains(&NodeId::from("cloud_functions")));
        assert!(!sel.contains(&NodeId::from("fivetran")));
        assert!(sel.anti_patterns.iter().any(|m| m.contains("Fivetran")));
    }

    #[test]
    fn test_explicit_fivetran_wins_over_default() {
        let sel = classify("Salesforce with Fivetran");
        assert!(sel.contains(&NodeId::from("fivetran")));
        assert!(!sel.contains(&NodeId::from("cloud_functions")));
    }

    #[test]
    fn test_healthcare_vertical_adds_grc() {
        let sel = classify("HIPAA-compliant patient data pipeline from Oracle");
        assert!(sel.contains(&NodeId::from("archer_grc")));
        assert!(sel.decisions.iter().any(|m| m.contains("healthcare")));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = classify("Oracle and Kafka to BigQuery");
        let b = classify("Oracle and Kafka to BigQuery");
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_case_and_whitespace_are_normalized() {
        let a = classify("  ORACLE   cdc ");
        let b = classify("oracle cdc");
        assert_eq!(a.nodes, b.nodes);
    }
}
