//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Body of `GET /health`: overall status plus one entry per checked component.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2025-06-01T12:00:00Z",
    "checks": {
        "storage": {
            "status": "healthy",
            "message": "PostgreSQL connected",
            "response_time_ms": 3
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: HashMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Builds a response whose overall status is the worst component status.
    /// No checks at all counts as healthy.
    pub fn from_checks(
        version: impl Into<String>,
        timestamp: impl Into<String>,
        checks: HashMap<String, ComponentHealth>,
    ) -> Self {
        let status = checks
            .values()
            .map(|check| check.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);
        Self {
            status,
            version: version.into(),
            timestamp: timestamp.into(),
            checks,
        }
    }
}

/// Ordered from best to worst.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, with non-critical issues
    Degraded,
    Unhealthy,
}

/// Result of probing one component, e.g. the storage backend.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[schema(example = "PostgreSQL connected")]
    pub message: Option<String>,
    /// Probe duration in milliseconds
    #[schema(example = 3)]
    pub response_time_ms: Option<u64>,
}

impl ComponentHealth {
    pub fn healthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: Some(message.into()),
            response_time_ms: Some(response_time_ms),
        }
    }

    pub fn unhealthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: Some(response_time_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checks(statuses: &[(&str, HealthStatus)]) -> HashMap<String, ComponentHealth> {
        statuses
            .iter()
            .map(|(name, status)| {
                (
                    name.to_string(),
                    ComponentHealth {
                        status: *status,
                        message: None,
                        response_time_ms: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_overall_status_is_worst_component() {
        let response = HealthResponse::from_checks(
            "0.1.0",
            "2025-06-01T12:00:00Z",
            checks(&[
                ("storage", HealthStatus::Healthy),
                ("cache", HealthStatus::Degraded),
            ]),
        );
        assert_eq!(response.status, HealthStatus::Degraded);

        let response = HealthResponse::from_checks(
            "0.1.0",
            "2025-06-01T12:00:00Z",
            checks(&[
                ("storage", HealthStatus::Unhealthy),
                ("cache", HealthStatus::Degraded),
            ]),
        );
        assert_eq!(response.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn test_no_checks_is_healthy() {
        let response = HealthResponse::from_checks("0.1.0", "now", HashMap::new());
        assert_eq!(response.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_component_serialization() {
        let json = serde_json::to_value(ComponentHealth::unhealthy("Connection failed", 12)).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["response_time_ms"], 12);
    }
}
