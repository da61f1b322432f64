//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageHealth,
}

/// Storage backend health with optional error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct StorageHealth {
    /// `postgres` or `memory`
    pub backend: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Driver errors are logged, never returned to the caller.
fn postgres_health(ping: Result<(), DbErr>) -> StorageHealth {
    match ping {
        Ok(()) => StorageHealth {
            backend: "postgres".to_string(),
            status: "healthy".to_string(),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Health check database ping failed: {:?}", e);
            StorageHealth {
                backend: "postgres".to_string(),
                status: "unhealthy".to_string(),
                error: Some("database unreachable".to_string()),
            }
        }
    }
}

/// Health check endpoint - verifies storage connectivity.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage = match &state.database {
        Some(db) => postgres_health(db.ping().await),
        None => StorageHealth {
            backend: "memory".to_string(),
            status: "healthy".to_string(),
            error: None,
        },
    };

    let healthy = storage.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage,
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_failure_hides_driver_detail() {
        let health = postgres_health(Err(DbErr::Custom(
            "password authentication failed for user \"app\"".to_string(),
        )));

        assert_eq!(health.status, "unhealthy");
        assert_eq!(health.error.as_deref(), Some("database unreachable"));
    }

    #[test]
    fn test_ping_success() {
        let health = postgres_health(Ok(()));
        assert_eq!(health.status, "healthy");
        assert!(health.error.is_none());
    }
}
