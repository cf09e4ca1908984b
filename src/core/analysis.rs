// src/core/analysis.rs

//! Read-only summaries of a published scan result, for report and analysis views.

use serde::Serialize;
use strum::Display;

use crate::core::knowledge_base::FindingCatalog;
use crate::core::models::{Finding, ScanResult, Severity};

/// Coarse banding of the numeric risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            71.. => RiskLevel::High,
            41..=70 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical | Severity::High => RiskLevel::High,
            Severity::Medium => RiskLevel::Medium,
            Severity::Low => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Low => counts.low += 1,
                Severity::Medium => counts.medium += 1,
                Severity::High => counts.high += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }
}

/// One remediation item per finding category present in a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: RiskLevel,
    pub category: String,
    pub title: String,
    pub remediation: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub severity_counts: SeverityCounts,
    /// High plus critical findings.
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub most_critical: Option<Finding>,
    pub recommendations: Vec<Recommendation>,
}

pub fn analyze(result: &ScanResult, catalog: &dyn FindingCatalog) -> AnalysisSummary {
    let severity_counts = SeverityCounts::tally(&result.findings);

    let most_critical = result
        .findings
        .iter()
        .find(|f| f.severity.is_high_risk())
        .or_else(|| result.findings.iter().find(|f| f.severity == Severity::Medium))
        .cloned();

    AnalysisSummary {
        risk_score: result.risk_score,
        risk_level: RiskLevel::from_score(result.risk_score),
        high_risk_count: severity_counts.high + severity_counts.critical,
        medium_risk_count: severity_counts.medium,
        severity_counts,
        most_critical,
        recommendations: recommend(&result.findings, catalog),
    }
}

fn recommend(findings: &[Finding], catalog: &dyn FindingCatalog) -> Vec<Recommendation> {
    // (category, worst severity, first finding of that category)
    let mut groups: Vec<(&str, Severity, &Finding)> = Vec::new();
    for finding in findings {
        let existing = groups
            .iter()
            .position(|(category, _, _)| *category == finding.category);
        match existing {
            Some(i) => groups[i].1 = groups[i].1.max(finding.severity),
            None => groups.push((finding.category.as_str(), finding.severity, finding)),
        }
    }

    let mut recommendations: Vec<Recommendation> = groups
        .into_iter()
        .map(|(category, worst, first)| {
            let priority = RiskLevel::from_severity(worst);
            match catalog.guidance(category) {
                Some(guidance) => Recommendation {
                    priority,
                    category: category.to_string(),
                    title: guidance.title.to_string(),
                    remediation: guidance.remediation.to_string(),
                    impact: guidance.impact.to_string(),
                },
                None => Recommendation {
                    priority,
                    category: category.to_string(),
                    title: format!("Address {category} findings"),
                    remediation: first.remediation.clone(),
                    impact: first.impact.clone(),
                },
            }
        })
        .collect();

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}
