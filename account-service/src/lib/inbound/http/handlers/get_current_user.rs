use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::TokenClaims;
use crate::inbound::http::router::AppState;

/// The authentication gate has already verified the token; the id can
/// still fail to resolve if the user was deleted since issue.
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .use_cases
        .current_user(&claims.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| {
            ApiSuccess::new(
                StatusCode::OK,
                "Current user retrieved successfully",
                profile.into(),
            )
        })
}
