use std::sync::Arc;

use auth::Authenticator;
use auth_service::domain::user::service::UserService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::sessions::InMemorySessionStore;

/// Fixed signing secret so tests can decode issued tokens deterministically.
pub const TEST_JWT_SECRET: &str = "test_secret_key_at_least_32_bytes!";

/// Black-box test harness: the full router wired to the in-memory adapters,
/// served on an ephemeral port and driven over real HTTP.
pub struct TestApp {
    address: String,
    client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application accepting any well-formed role name.
    pub async fn spawn() -> Self {
        Self::spawn_with_roles(Vec::new()).await
    }

    /// Spawn the application with a configured recognized role set.
    pub async fn spawn_with_roles(allowed_roles: Vec<String>) -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(repository));
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET.as_bytes()));
        let sessions = Arc::new(InMemorySessionStore::new());

        let app = create_router(user_service, authenticator, sessions, allowed_roles);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build client");

        Self { address, client }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.address, path))
    }
}
