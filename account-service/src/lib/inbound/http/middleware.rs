use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::inbound::http::router::AppState;

/// Authentication gate for protected routes.
///
/// Requires `Authorization: Bearer <token>`; on success the verified
/// claims land in the request extensions for downstream handlers. The
/// failure message never reveals which verification step rejected the
/// token.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        unauthorized("Access token is required")
    })?;

    let claims = state.auth_service.verify_token(token).await.ok_or_else(|| {
        tracing::warn!("Token verification failed");
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extract the token from a `Bearer` authorization header, if present and
/// well-formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    auth_header.strip_prefix("Bearer ")
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Unauthorized",
            "message": message,
        })),
    )
        .into_response()
}
