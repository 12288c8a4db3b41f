use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;
use crate::outbound::sessions::SESSION_COOKIE;

/// Extension type carrying the authenticated identity into handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role: String,
}

/// Middleware guarding the restricted surface.
///
/// The bearer token and the session cookie are independent mechanisms; a
/// request is admitted when either validates. A bearer token, when
/// presented, is authoritative: an invalid token is rejected without
/// falling back to the cookie.
pub async fn authenticate<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authenticated = match bearer_token(&req)? {
        Some(token) => {
            let claims = state.authenticator.validate_token(token).map_err(|e| {
                tracing::warn!(error = %e, "Token validation failed");
                unauthorized("Invalid or expired token")
            })?;

            AuthenticatedUser {
                user_id: UserId(claims.subject),
                username: claims.username,
                role: claims.role,
            }
        }
        None => session_user(&state, req.headers()).await?,
    };

    req.extensions_mut().insert(authenticated);

    Ok(next.run(req).await)
}

/// Extract the bearer token, if an Authorization header is present.
fn bearer_token(req: &Request) -> Result<Option<&str>, Response> {
    let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(Some(auth_str.trim_start_matches("Bearer ")))
}

/// Resolve the identity from the session cookie.
async fn session_user<UR: UserRepository>(
    state: &AppState<UR>,
    headers: &http::HeaderMap,
) -> Result<AuthenticatedUser, Response> {
    let jar = CookieJar::from_headers(headers);

    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| unauthorized("Missing credentials"))?;

    let session_id = Uuid::parse_str(cookie.value())
        .map_err(|_| unauthorized("Invalid session"))?;

    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| unauthorized("Invalid session"))?;

    Ok(AuthenticatedUser {
        user_id: session.user_id,
        username: session.username,
        role: session.role,
    })
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}
