use auth::AuthenticationError;
use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::SESSION_COOKIE;
use crate::user::errors::UserError;

/// Login flow: resolve the username to a record, verify the password
/// against the stored hash, and on success return a signed token plus a
/// session cookie.
///
/// The two failure paths stay distinct on the wire: an unknown username is
/// a 404 raised before any password comparison; a wrong password is a 401
/// with the fixed "Invalid credentials" message.
pub async fn login<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    // A name that fails well-formedness cannot be stored, so it maps to the
    // same not-found contract as an unknown username.
    let username = Username::new(body.username.clone())
        .map_err(|_| not_found_error(&body.username))?;

    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByUsername(_) => not_found_error(&body.username),
            _ => ApiError::from(e),
        })?;

    let claims = Claims::for_user(user.id.0, user.username.as_str(), user.role.as_str());

    let result = state
        .authenticator
        .authenticate(&body.password, &user.password_hash, &claims)
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthenticationError::PasswordError(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            AuthenticationError::JwtError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    // Session cookie parallel to, and independent of, the bearer token.
    let session_id = state.sessions.insert(&user).await;
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    tracing::info!(user_id = %user.id, username = %user.username, "User authenticated");

    Ok((
        jar.add(cookie),
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: format!("{} is back!", user.username),
                token: result.access_token,
            },
        ),
    ))
}

fn not_found_error(username: &str) -> ApiError {
    ApiError::NotFound(format!("User not found with username: {}", username))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub token: String,
}
