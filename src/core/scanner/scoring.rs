// src/core/scanner/scoring.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::ConfigError;
use crate::core::models::{Finding, Severity};

/// Highest score the scorer will ever return.
pub const MAX_SCORE: u8 = 100;

/// How severities are turned into a 0-100 risk score.
///
/// The default weights `Low:1, Medium:2, High:3, Critical:4` with a scale of 25 make
/// an all-critical result score exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyFields")]
pub struct ScoringPolicy {
    weights: [u32; 4],
    scale: u32,
}

/// Unchecked wire form; deserialization goes through `ScoringPolicy::new`.
#[derive(Deserialize)]
struct PolicyFields {
    weights: [u32; 4],
    scale: u32,
}

impl TryFrom<PolicyFields> for ScoringPolicy {
    type Error = ConfigError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        Self::new(fields.weights, fields.scale)
    }
}

impl ScoringPolicy {
    /// `weights` is indexed `[Low, Medium, High, Critical]`.
    pub fn new(weights: [u32; 4], scale: u32) -> Result<Self, ConfigError> {
        if weights.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::WeightsNotMonotonic(weights));
        }
        if scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        let max_weight = weights[3];
        if u64::from(max_weight) * u64::from(scale) > u64::from(u32::MAX) {
            return Err(ConfigError::ScaleOverflow { max_weight, scale });
        }
        Ok(Self { weights, scale })
    }

    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Low => self.weights[0],
            Severity::Medium => self.weights[1],
            Severity::High => self.weights[2],
            Severity::Critical => self.weights[3],
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Average severity weight times the scale, rounded half away from zero and
    /// clamped to `[0, 100]`. An empty set scores 0.
    ///
    /// Integer arithmetic keeps the result exact, so identical inputs always give
    /// identical scores.
    pub fn score(&self, findings: &[Finding]) -> u8 {
        if findings.is_empty() {
            return 0;
        }
        let total: u64 = findings
            .iter()
            .map(|f| u64::from(self.weight(f.severity)))
            .sum();
        let count = findings.len() as u64;
        let numerator = total.saturating_mul(u64::from(self.scale));
        // round(numerator / count) for non-negative values
        let rounded = numerator
            .saturating_mul(2)
            .saturating_add(count)
            / count.saturating_mul(2);
        let score = rounded.min(u64::from(MAX_SCORE)) as u8;
        debug!(count, total, score, "Computed risk score.");
        score
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: [1, 2, 3, 4],
            scale: 25,
        }
    }
}

/// Scores findings with the default policy.
pub fn score(findings: &[Finding]) -> u8 {
    ScoringPolicy::default().score(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn findings(severities: &[Severity]) -> Vec<Finding> {
        severities
            .iter()
            .enumerate()
            .map(|(i, s)| Finding::new(&i.to_string(), "XSS", *s, 443))
            .collect()
    }

    #[test]
    fn empty_findings_score_zero() {
        assert_eq!(score(&[]), 0);
    }

    #[test]
    fn uniform_severity_scores_weight_times_scale() {
        let policy = ScoringPolicy::default();
        for severity in Severity::iter() {
            let uniform = findings(&[severity; 7]);
            assert_eq!(u32::from(score(&uniform)), policy.weight(severity) * 25);
        }
        assert_eq!(score(&findings(&[Severity::Critical; 3])), 100);
        assert_eq!(score(&findings(&[Severity::Low])), 25);
    }

    #[test]
    fn mixed_catalog_scores_seventy() {
        let mixed = findings(&[
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Medium,
            Severity::High,
        ]);
        assert_eq!(score(&mixed), 70);
    }

    #[test]
    fn halves_round_away_from_zero() {
        // (1 + 2) / 2 * 25 = 37.5
        assert_eq!(score(&findings(&[Severity::Low, Severity::Medium])), 38);
        // (1 + 1 + 2) / 3 * 25 = 33.33..
        assert_eq!(score(&findings(&[Severity::Low, Severity::Low, Severity::Medium])), 33);
    }

    #[test]
    fn oversized_policy_is_clamped() {
        let policy = ScoringPolicy::new([10, 20, 30, 40], 25).unwrap();
        assert_eq!(policy.score(&findings(&[Severity::Low])), MAX_SCORE);
    }

    #[test]
    fn decreasing_weights_are_rejected() {
        assert_eq!(
            ScoringPolicy::new([4, 3, 2, 1], 25),
            Err(ConfigError::WeightsNotMonotonic([4, 3, 2, 1]))
        );
        assert_eq!(ScoringPolicy::new([1, 2, 3, 4], 0), Err(ConfigError::ZeroScale));
    }

    #[test]
    fn overflowing_scale_is_rejected() {
        assert_eq!(
            ScoringPolicy::new([1, 2, 3, u32::MAX], 2),
            Err(ConfigError::ScaleOverflow {
                max_weight: u32::MAX,
                scale: 2
            })
        );
        assert!(ScoringPolicy::new([1, 2, 3, u32::MAX], 1).is_ok());
    }

    #[test]
    fn deserialization_is_validated() {
        let policy: ScoringPolicy =
            serde_json::from_str(r#"{"weights":[1,2,3,4],"scale":25}"#).unwrap();
        assert_eq!(policy, ScoringPolicy::default());

        let err = serde_json::from_str::<ScoringPolicy>(r#"{"weights":[4,3,2,1],"scale":25}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must not decrease"));
        assert!(serde_json::from_str::<ScoringPolicy>(r#"{"weights":[1,2,3,4],"scale":0}"#).is_err());
    }

    #[test]
    fn score_is_deterministic() {
        let mixed = findings(&[Severity::High, Severity::Low, Severity::Critical]);
        assert_eq!(score(&mixed), score(&mixed));
    }
}
