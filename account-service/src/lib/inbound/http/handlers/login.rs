use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResultData;
use super::UserData;
use crate::domain::user::models::Credentials;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<AuthResultData>, ApiError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let result = state
        .use_cases
        .login(Credentials { email, password })
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Login successful",
        AuthResultData {
            user: UserData::from(&result.user),
            token: result.token,
        },
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<String>,
}
