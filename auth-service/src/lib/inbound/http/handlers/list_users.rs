use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Restricted listing of registered users. Reachable only through the
/// authentication middleware; stored hashes are never exposed.
pub async fn list_users<UR: UserRepository>(
    State(state): State<AppState<UR>>,
) -> Result<ApiSuccess<Vec<UserSummaryData>>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(UserSummaryData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummaryData {
    pub user_id: i64,
    pub username: String,
    pub role_name: String,
}

impl From<&User> for UserSummaryData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.0,
            username: user.username.as_str().to_string(),
            role_name: user.role.as_str().to_string(),
        }
    }
}
