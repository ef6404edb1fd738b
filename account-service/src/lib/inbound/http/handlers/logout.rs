use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Logout reads the bearer header itself rather than sitting behind the
/// authentication gate: the use case owns the invalid-token outcome, and
/// revoking is idempotent either way.
pub async fn logout(
    State(state): State<AppState>,
    req: Request,
) -> Result<ApiSuccess<Value>, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("Access token is required".to_string()))?;

    state.use_cases.logout(token).await.map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Logged out successfully",
        json!(null),
    ))
}
