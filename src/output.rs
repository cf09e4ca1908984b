// src/output.rs

use serde::Serialize;
use std::fmt;

use vanguard_scan_engine::ScanResult;
use vanguard_scan_engine::core::analysis::AnalysisSummary;

#[derive(Serialize)]
struct Report<'a> {
    result: &'a ScanResult,
    analysis: &'a AnalysisSummary,
}

/// Renders the result and its analysis as pretty-printed JSON.
pub fn render_json(result: &ScanResult, analysis: &AnalysisSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report { result, analysis })
}

/// Renders a plain-text report for the terminal.
pub fn render_text(result: &ScanResult, analysis: &AnalysisSummary) -> String {
    TextReport { result, analysis }.to_string()
}

struct TextReport<'a> {
    result: &'a ScanResult,
    analysis: &'a AnalysisSummary,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (result, analysis) = (self.result, self.analysis);
        let ports: Vec<String> = result.open_ports.iter().map(u16::to_string).collect();

        writeln!(f, "Target:      {}", result.target)?;
        writeln!(f, "Mode:        {}", result.mode)?;
        writeln!(f, "Completed:   {}", result.timestamp.to_rfc3339())?;
        writeln!(f, "Open ports:  {}", ports.join(", "))?;
        writeln!(
            f,
            "Risk score:  {}/100 ({})",
            result.risk_score, analysis.risk_level
        )?;
        writeln!(
            f,
            "Issues:      {} high risk, {} medium risk",
            analysis.high_risk_count, analysis.medium_risk_count
        )?;

        writeln!(f, "\nFindings ({}):", result.findings.len())?;
        if result.findings.is_empty() {
            writeln!(f, "  none")?;
        }
        for finding in &result.findings {
            let reference = finding
                .external_reference_id
                .as_deref()
                .map(|r| format!(", {r}"))
                .unwrap_or_default();
            writeln!(
                f,
                "  [{}] {} (port {}{})",
                finding.severity.to_string().to_uppercase(),
                finding.category,
                finding.port,
                reference
            )?;
            writeln!(f, "      {}", finding.description)?;
            writeln!(f, "      Impact: {}", finding.impact)?;
            writeln!(f, "      Fix:    {}", finding.remediation)?;
        }

        if !analysis.recommendations.is_empty() {
            writeln!(f, "\nRecommendations:")?;
            for rec in &analysis.recommendations {
                writeln!(
                    f,
                    "  [{}] {}",
                    rec.priority.to_string().to_uppercase(),
                    rec.title
                )?;
                writeln!(f, "      {}", rec.remediation)?;
            }
        }
        Ok(())
    }
}
