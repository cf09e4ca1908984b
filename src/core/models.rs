// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};

use crate::core::error::ScanError;

// --- Core Data Models ---

/// Severity of a finding. Variants are declared in ascending order so the derived
/// `Ord` gives `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
    Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// True for the levels the analysis views treat as "high risk".
    pub fn is_high_risk(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

/// A single candidate security weakness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    /// Unique within a catalog.
    pub id: String,
    /// Category tag, e.g. "SQL Injection".
    pub category: String,
    pub severity: Severity,
    pub port: u16,
    pub description: String,
    pub impact: String,
    pub remediation: String,
    /// External reference such as a CVE identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference_id: Option<String>,
}

impl Finding {
    pub fn new(id: &str, category: &str, severity: Severity, port: u16) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
            severity,
            port,
            description: String::new(),
            impact: String::new(),
            remediation: String::new(),
            external_reference_id: None,
        }
    }

    pub fn with_text(mut self, description: &str, impact: &str, remediation: &str) -> Self {
        self.description = description.to_string();
        self.impact = impact.to_string();
        self.remediation = remediation.to_string();
        self
    }

    pub fn with_reference(mut self, reference: &str) -> Self {
        self.external_reference_id = Some(reference.to_string());
        self
    }
}

// --- Scan Request ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScanMode {
    /// Every check in the catalog.
    Full,
    /// Only the caller-chosen categories.
    Selective,
}

/// An immutable request handed by value to the orchestrator.
///
/// Deserialized requests are checked by `validate` when they are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    target: String,
    mode: ScanMode,
    #[serde(default)]
    categories: HashSet<String>,
    #[serde(default)]
    deadline: Option<Duration>,
}

impl ScanRequest {
    pub fn full(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: ScanMode::Full,
            categories: HashSet::new(),
            deadline: None,
        }
    }

    pub fn selective<I, S>(target: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories = categories
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            target: target.into(),
            mode: ScanMode::Selective,
            categories,
            deadline: None,
        }
    }

    /// Bounds the running phase of this request.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Requested categories. Always empty for full scans.
    pub fn categories(&self) -> &HashSet<String> {
        &self.categories
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Synchronous checks performed before a scan may enter the running phase.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.target.trim().is_empty() {
            return Err(ScanError::InvalidRequest(
                "target identifier must not be empty".to_string(),
            ));
        }
        if self.mode == ScanMode::Selective && self.categories.is_empty() {
            return Err(ScanError::InvalidRequest(
                "selective scan requires at least one category".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Scan Result ---

/// Produced exactly once per completed scan and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResult {
    pub scan_id: u64,
    pub started_at: DateTime<Utc>,
    /// Completion instant.
    pub timestamp: DateTime<Utc>,
    pub target: String,
    pub mode: ScanMode,
    pub open_ports: BTreeSet<u16>,
    /// Catalog order preserved.
    pub findings: Vec<Finding>,
    pub risk_score: u8,
}

/// Lifecycle of the orchestrator. `Completed` and `Failed` are terminal for a
/// given request; the next request enters `Running` again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Metadata about the run currently holding the single-flight slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveScan {
    pub scan_id: u64,
    pub target: String,
    pub mode: ScanMode,
    pub started_at: DateTime<Utc>,
    #[serde(skip)]
    pub started_instant: tokio::time::Instant,
}

/// A consistent view of the session, always read as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: ScanState,
    pub busy: bool,
    pub result: Option<Arc<ScanResult>>,
    pub active: Option<ActiveScan>,
    pub last_error: Option<String>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            state: ScanState::Idle,
            busy: false,
            result: None,
            active: None,
            last_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn severity_is_totally_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!(Severity::from_str("CRITICAL").unwrap(), Severity::Critical);
        assert_eq!(Severity::from_str("medium").unwrap(), Severity::Medium);
        assert!(Severity::from_str("severe").is_err());
        assert_eq!(Severity::High.to_string(), "high");
    }

    #[test]
    fn empty_target_is_rejected() {
        let err = ScanRequest::full("   ").validate().unwrap_err();
        assert!(matches!(err, ScanError::InvalidRequest(_)));
    }

    #[test]
    fn selective_request_drops_blank_categories() {
        let request = ScanRequest::selective("example.com", [" XSS ", "", "  "]);
        assert_eq!(request.categories().len(), 1);
        assert!(request.categories().contains("XSS"));
        assert!(request.validate().is_ok());

        let empty = ScanRequest::selective("example.com", ["", " "]);
        assert!(matches!(empty.validate(), Err(ScanError::InvalidRequest(_))));
    }

    #[test]
    fn full_request_ignores_categories() {
        let request = ScanRequest::full("example.com");
        assert_eq!(request.mode(), ScanMode::Full);
        assert!(request.categories().is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn request_deserializes_with_optional_fields() {
        let request: ScanRequest =
            serde_json::from_str(r#"{"target":"example.com","mode":"selective","categories":["XSS"]}"#)
                .unwrap();
        assert_eq!(request, ScanRequest::selective("example.com", ["XSS"]));

        let full: ScanRequest =
            serde_json::from_str(r#"{"target":"example.com","mode":"full"}"#).unwrap();
        assert_eq!(full, ScanRequest::full("example.com"));
    }

    #[test]
    fn snapshot_serializes_without_monotonic_clock() {
        let snapshot = SessionSnapshot {
            state: ScanState::Running,
            busy: true,
            result: None,
            active: Some(ActiveScan {
                scan_id: 7,
                target: "example.com".to_string(),
                mode: ScanMode::Full,
                started_at: Utc::now(),
                started_instant: tokio::time::Instant::now(),
            }),
            last_error: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "running");
        assert_eq!(json["active"]["scan_id"], 7);
        assert_eq!(json["active"]["mode"], "full");
        assert!(json["active"].get("started_instant").is_none());
    }
}
