//! This module is the scanner's source of candidate findings.
//! It holds the `FindingCatalog` capability the orchestrator is built against,
//! a static, data-driven catalog used when no live probing subsystem is plugged
//! in, and per-category remediation guidance used by the analysis summary.

use crate::core::models::{Finding, Severity};
use once_cell::sync::Lazy;

/// A deterministic, order-preserving source of candidate findings.
///
/// A production deployment swaps the static catalog for a live probing
/// subsystem implementing the same contract.
pub trait FindingCatalog: Send + Sync {
    /// Enumerates every finding in catalog order. Has no side effects.
    fn list_all(&self) -> Vec<Finding>;

    /// Guidance for a category tag, if the catalog knows one.
    fn guidance(&self, category: &str) -> Option<&CategoryGuidance> {
        get_category_guidance(category)
    }
}

/// Human-readable remediation advice for a whole category of findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGuidance {
    /// The category tag this entry applies to (e.g. "SQL Injection").
    pub category: &'static str,
    /// A short title for the recommended countermeasure.
    pub title: &'static str,
    /// What to do.
    pub remediation: &'static str,
    /// What the countermeasure protects against.
    pub impact: &'static str,
}

/// The static guidance table, keyed by category tag.
static GUIDANCE: &[CategoryGuidance] = &[
    CategoryGuidance {
        category: "SQL Injection",
        title: "Implement SQL injection countermeasures",
        remediation: "Use parameterized queries everywhere and validate all user-supplied input.",
        impact: "Prevents unauthorized access to the database.",
    },
    CategoryGuidance {
        category: "XSS",
        title: "Harden cross-site scripting defenses",
        remediation: "Set a Content-Security-Policy header and escape every value written to a page.",
        impact: "Prevents malicious scripts from running in users' browsers.",
    },
    CategoryGuidance {
        category: "Directory Traversal",
        title: "Restrict file path handling",
        remediation: "Canonicalize and validate file paths and enforce access controls on the server.",
        impact: "Prevents unauthorized reads of server files.",
    },
    CategoryGuidance {
        category: "Open Port",
        title: "Reduce the exposed service surface",
        remediation: "Close unneeded services, move administrative services off default ports and rate-limit authentication.",
        impact: "Reduces exposure to brute-force and service-level attacks.",
    },
    CategoryGuidance {
        category: "Weak SSL/TLS",
        title: "Optimize the SSL/TLS configuration",
        remediation: "Disable weak cipher suites and adopt current protocol versions.",
        impact: "Raises the strength of transport encryption.",
    },
];

/// Looks up guidance by category tag (exact match).
pub fn get_category_guidance(category: &str) -> Option<&'static CategoryGuidance> {
    GUIDANCE.iter().find(|g| g.category == category)
}

static DEFAULT_FINDINGS: Lazy<Vec<Finding>> = Lazy::new(|| {
    vec![
        Finding::new("1", "SQL Injection", Severity::Critical, 80)
            .with_text(
                "SQL injection vulnerability detected in login form",
                "Attackers can access sensitive database information",
                "Use parameterized queries and input validation",
            )
            .with_reference("CVE-2023-1234"),
        Finding::new("2", "XSS", Severity::High, 443).with_text(
            "Cross-site scripting vulnerability in search functionality",
            "Malicious scripts can be executed in user browsers",
            "Implement proper input sanitization and CSP headers",
        ),
        Finding::new("3", "Directory Traversal", Severity::Medium, 80).with_text(
            "Directory traversal vulnerability in file upload",
            "Unauthorized access to server files",
            "Validate file paths and implement access controls",
        ),
        Finding::new("4", "Open Port", Severity::Medium, 22).with_text(
            "SSH service running on default port",
            "Potential brute force attacks",
            "Change default port and implement fail2ban",
        ),
        Finding::new("5", "Weak SSL/TLS", Severity::High, 443).with_text(
            "Weak SSL/TLS configuration detected",
            "Man-in-the-middle attacks possible",
            "Update SSL/TLS configuration and disable weak ciphers",
        ),
    ]
});

/// A catalog backed by a fixed list of findings.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    findings: Vec<Finding>,
}

impl StaticCatalog {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// Category tags present in the catalog, first-seen order, without repeats.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for finding in &self.findings {
            if !seen.contains(&finding.category.as_str()) {
                seen.push(&finding.category);
            }
        }
        seen
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FINDINGS.clone())
    }
}

impl FindingCatalog for StaticCatalog {
    fn list_all(&self) -> Vec<Finding> {
        self.findings.clone()
    }
}
