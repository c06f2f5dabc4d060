use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::error::ResponseBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub metadata_store: &'static str,
}

/// Liveness probe. The process is up if it can answer.
pub async fn liveness() -> impl IntoResponse {
    Json(ResponseBody::ok(HealthStatus {
        status: "alive",
        metadata_store: "unchecked",
    }))
}

/// Readiness probe. Ready when the metadata store answers a ping in time.
pub async fn readiness(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let ping = tokio::time::timeout(state.readiness_timeout, state.metadata.ping()).await;

    let store = match ping {
        Ok(Ok(())) => "healthy",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Metadata store health check failed");
            "unhealthy"
        }
        Err(_) => {
            tracing::warn!("Metadata store health check timed out");
            "timeout"
        }
    };

    if store == "healthy" {
        (
            StatusCode::OK,
            Json(ResponseBody::ok(HealthStatus {
                status: "ready",
                metadata_store: store,
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ResponseBody {
                success: false,
                data: Some(HealthStatus {
                    status: "not_ready",
                    metadata_store: store,
                }),
                messages: vec!["Metadata store is not available".to_string()],
            }),
        )
    }
}
