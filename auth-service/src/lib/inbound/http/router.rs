use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::UserService;
use crate::outbound::sessions::InMemorySessionStore;

pub struct AppState<UR: UserRepository> {
    pub user_service: Arc<UserService<UR>>,
    pub authenticator: Arc<Authenticator>,
    pub sessions: Arc<InMemorySessionStore>,
    pub allowed_roles: Arc<Vec<String>>,
}

// Manual impl: derived Clone would require UR: Clone.
impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
            sessions: Arc::clone(&self.sessions),
            allowed_roles: Arc::clone(&self.allowed_roles),
        }
    }
}

pub fn create_router<UR: UserRepository>(
    user_service: Arc<UserService<UR>>,
    authenticator: Arc<Authenticator>,
    sessions: Arc<InMemorySessionStore>,
    allowed_roles: Vec<String>,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        sessions,
        allowed_roles: Arc::new(allowed_roles),
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register::<UR>))
        .route("/api/auth/login", post(login::<UR>));

    let restricted_routes = Router::new()
        .route("/api/users", get(list_users::<UR>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(restricted_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
