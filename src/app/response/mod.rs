use serde::Serialize;

/// Liveness payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the process started.
    pub uptime: f64,
}

/// Readiness payload with per-dependency results.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReadyResponse {
    /// "ok" or "degraded".
    pub status: String,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReadyChecks {
    pub service: String,
    /// Absent when no database is registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}
