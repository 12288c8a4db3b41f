use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RoleName;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::RoleNameError;
use crate::user::errors::UsernameError;

pub async fn register<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command(&state.allowed_roles)?;

    state
        .user_service
        .register_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    password: String,
    role_name: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid role name: {0}")]
    RoleName(#[from] RoleNameError),
}

impl RegisterRequestBody {
    /// Validate the raw body into a domain command.
    ///
    /// The role must be well-formed and, when a recognized set is
    /// configured, a member of it. Registration fails as a whole on any
    /// violation; nothing reaches the store.
    fn try_into_command(
        self,
        allowed_roles: &[String],
    ) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let role = RoleName::new(self.role_name)?;
        role.recognized_in(allowed_roles)?;
        Ok(RegisterUserCommand::new(username, role, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Created-user representation. The plaintext password is never echoed and
/// the stored digest is deliberately not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: i64,
    pub username: String,
    pub role_name: String,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.0,
            username: user.username.as_str().to_string(),
            role_name: user.role.as_str().to_string(),
        }
    }
}
