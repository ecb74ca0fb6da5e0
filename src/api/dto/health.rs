//! Health endpoint payloads.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeState {
    Ok,
    Error,
}

/// Result of probing one dependency.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    pub status: ProbeState,
    /// Round trip of the probe, in milliseconds.
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Probes {
    pub database: Probe,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceHealth,
    pub version: &'static str,
    pub checks: Probes,
}

impl HealthResponse {
    /// Healthy only when every probe succeeded.
    pub fn from_probes(checks: Probes) -> Self {
        let status = if checks.database.status == ProbeState::Ok {
            ServiceHealth::Healthy
        } else {
            ServiceHealth::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceHealth::Healthy
    }
}
