// src/config.rs

use std::time::Duration;

use crate::core::scanner::scoring::ScoringPolicy;

/// Simulated probe duration used when nothing else is configured.
pub const DEFAULT_SCAN_DURATION: Duration = Duration::from_secs(3);

/// Ports the simulated probe reports as open.
pub const DEFAULT_OPEN_PORTS: &[u16] = &[22, 80, 443, 3306, 8080];

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long the simulated probe waits before reporting.
    pub scan_duration: Duration,
    /// Deadline applied to requests that do not carry their own.
    pub default_deadline: Option<Duration>,
    pub open_ports: Vec<u16>,
    pub scoring: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scan_duration: DEFAULT_SCAN_DURATION,
            default_deadline: None,
            open_ports: DEFAULT_OPEN_PORTS.to_vec(),
            scoring: ScoringPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_scan_duration(mut self, duration: Duration) -> Self {
        self.scan_duration = duration;
        self
    }

    pub fn with_default_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }
}
