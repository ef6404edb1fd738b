use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResultData;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<AuthResultData>, ApiError> {
    let command = body.try_into_command()?;

    let result = state.use_cases.register(command).await.map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        "User registered successfully",
        AuthResultData {
            user: UserData::from(&result.user),
            token: result.token,
        },
    ))
}

/// Raw registration body; all fields optional so missing ones map to 400
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let (Some(email), Some(full_name), Some(password)) =
            (self.email, self.full_name, self.password)
        else {
            return Err(ApiError::BadRequest(
                "Email, fullName, and password are required".to_string(),
            ));
        };

        let email = EmailAddress::new(email)
            .map_err(|_| ApiError::BadRequest("Invalid email format".to_string()))?;
        let password = Password::new(password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(RegisterUserCommand::with_password(email, full_name, password))
    }
}
