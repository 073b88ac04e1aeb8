//! HTTP route handlers.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::tfl::{LineSet, TflError};

use super::dto::ErrorResponse;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/lines", get(lines))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current lines, served from cache when fresh.
///
/// If the client disconnects the handler future is dropped, which abandons
/// any in-flight upstream fetch.
async fn lines(State(state): State<AppState>) -> Result<Json<LineSet>, AppError> {
    let lines = state.lines.get_lines().await?;
    Ok(Json(lines))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadGateway { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<TflError> for AppError {
    fn from(e: TflError) -> Self {
        let message = e.to_string();
        match e {
            TflError::Http(_)
            | TflError::RemoteFetchFailed { .. }
            | TflError::MalformedResponse { .. } => AppError::BadGateway { message },
            TflError::Cancelled | TflError::Closed => AppError::Unavailable { message },
            TflError::InvalidConfig(_) => AppError::Internal { message },
        }
    }
}

impl AppError {
    /// Level the failure is logged at. Cancelled or closed is a warning.
    fn log_level(&self) -> Level {
        match self {
            AppError::Unavailable { .. } => Level::WARN,
            AppError::BadGateway { .. } | AppError::Internal { .. } => Level::ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let level = self.log_level();
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if level == Level::ERROR {
            tracing::error!(%status, "{message}");
        } else {
            tracing::warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
