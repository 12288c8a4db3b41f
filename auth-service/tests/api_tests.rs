mod common;

use auth::JwtHandler;
use auth::TOKEN_TTL_SECS;
use common::TestApp;
use common::TEST_JWT_SECRET;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "anna",
            "password": "1234",
            "role_name": "angel"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["user_id"].is_number());
    assert_eq!(body["username"], "anna");
    assert_eq!(body["role_name"], "angel");
    // Neither the plaintext nor the stored digest is echoed back.
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "anna",
            "password": "1234",
            "role_name": "angel"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "anna",
            "password": "other_password",
            "role_name": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_unrecognized_role() {
    let app =
        TestApp::spawn_with_roles(vec!["admin".to_string(), "student".to_string()]).await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "anna",
            "password": "1234",
            "role_name": "angel"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("not recognized"));
}

#[tokio::test]
async fn test_register_missing_role() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "anna",
            "password": "1234",
            "role_name": "   "
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "a",
            "password": "1234",
            "role_name": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let registered: serde_json::Value = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "sue",
            "password": "1234",
            "role_name": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "sue",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    // The session cookie is set alongside the token.
    assert!(response.cookies().any(|c| c.name() == "sessionid"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "sue is back!");

    // The token carries exactly the three semantic claims plus iat/exp,
    // expiring one day after issuance.
    let token = body["token"].as_str().expect("Missing token");
    let claims = JwtHandler::new(TEST_JWT_SECRET.as_bytes())
        .decode(token)
        .expect("Failed to decode token");

    assert_eq!(claims.subject, registered["user_id"].as_i64().unwrap());
    assert_eq!(claims.username, "sue");
    assert_eq!(claims.role, "student");
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "sue",
            "password": "1234",
            "role_name": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "sue",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nobody",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Unknown usernames surface as a distinct not-found, raised before any
    // password comparison.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("not found"));
    assert_ne!(message, "Invalid credentials");
}

#[tokio::test]
async fn test_list_users_requires_credentials() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_with_bearer_token() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "sue",
            "password": "1234",
            "role_name": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "sue",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let token = login["token"].as_str().unwrap();

    // A presented bearer token is authoritative, so this exercises the
    // header path even though login also set a cookie.
    let response = app
        .get("/api/users")
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let users = body.as_array().expect("Expected an array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "sue");
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_list_users_with_session_cookie() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "sue",
            "password": "1234",
            "role_name": "student"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // The client's cookie store picks up the sessionid from login.
    app.post("/api/auth/login")
        .json(&json!({
            "username": "sue",
            "password": "1234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // No Authorization header: the session cookie alone admits the request.
    let response = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_users_with_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users")
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid or expired token");
}
