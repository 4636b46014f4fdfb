use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.items().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::HEALTHY)),
        Err(error) => {
            warn!(%error, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::UNHEALTHY),
            )
        }
    }
}
