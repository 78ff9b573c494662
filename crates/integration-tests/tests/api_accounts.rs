use axum::http::StatusCode;
use serde_json::json;

use domains::UserRepository;
use integration_tests::{http::TestApp, STRONG_PASSWORD};

#[tokio::test]
async fn register_returns_public_view() {
    let app = TestApp::new();
    let res = app
        .send(
            "POST",
            "/accounts",
            Some(json!({ "name": "Alex", "email": "alex@example.com", "password": STRONG_PASSWORD })),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Alex");
    assert_eq!(res.body["email"], "alex@example.com");
    assert!(res.body.get("passwordHash").is_none());
    assert!(res.body.get("password_hash").is_none());
    assert!(res.body.get("password").is_none());

    let stored = app.store.find_by_email("alex@example.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash.as_str(), STRONG_PASSWORD);
}

#[tokio::test]
async fn duplicate_email_returns_400_and_keeps_one_account() {
    let app = TestApp::new();
    app.register("Alex", "alex@example.com").await;

    let res = app
        .send(
            "POST",
            "/accounts",
            Some(json!({ "name": "Bob", "email": "alex@example.com", "password": "Another123!pw" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].as_str().unwrap().contains("already registered"));

    let all = app.send("GET", "/accounts", None).await;
    assert_eq!(all.body.as_array().unwrap().len(), 1);
    assert_eq!(all.body[0]["name"], "Alex");
}

#[tokio::test]
async fn invalid_registrations_are_rejected_and_not_stored() {
    let app = TestApp::new();
    let cases = [
        (json!({ "name": "A", "email": "test@example.com", "password": STRONG_PASSWORD }), "Name must be"),
        (json!({ "name": "Alex", "password": STRONG_PASSWORD }), "email"),
        (json!({ "name": "Alex", "email": "not-an-email", "password": STRONG_PASSWORD }), "email"),
        (json!({ "name": "Alex", "email": "alex@example.com" }), "Password is required"),
        (json!({ "name": "Alex", "email": "alex@example.com", "password": "12345" }), "at least 8 characters"),
    ];

    for (body, fragment) in cases {
        let res = app.send("POST", "/accounts", Some(body.clone())).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        let error = res.body["error"].as_str().unwrap();
        assert!(error.contains(fragment), "{error:?} should mention {fragment:?}");
    }

    assert!(UserRepository::list(app.store.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn weak_password_lists_every_missing_rule() {
    let app = TestApp::new();
    let res = app
        .send(
            "POST",
            "/accounts",
            Some(json!({ "name": "Alex", "email": "alex@example.com", "password": "password" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let error = res.body["error"].as_str().unwrap();
    assert!(error.starts_with("Password must contain:"));
    assert!(error.contains("uppercase"));
    assert!(error.contains("digit"));
    assert!(error.contains("special character"));
    assert!(!error.contains("lowercase"));
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let app = TestApp::new();
    let id = app.register("Alex", "alex@example.com").await;

    let res = app
        .send(
            "POST",
            "/sessions",
            Some(json!({ "email": "alex@example.com", "password": STRONG_PASSWORD })),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Login successful");
    assert_eq!(
        res.body["user"],
        json!({ "id": id, "name": "Alex", "email": "alex@example.com" })
    );
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("Alex", "alex@example.com").await;

    let wrong_password = app
        .send(
            "POST",
            "/sessions",
            Some(json!({ "email": "alex@example.com", "password": "WrongPassword1!" })),
        )
        .await;
    let unknown_email = app
        .send(
            "POST",
            "/sessions",
            Some(json!({ "email": "ghost@example.com", "password": STRONG_PASSWORD })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, json!({ "error": "Invalid email or password" }));
    assert_eq!(unknown_email.status, wrong_password.status);
    assert_eq!(unknown_email.body, wrong_password.body);
}

#[tokio::test]
async fn account_can_be_fetched_and_deleted() {
    let app = TestApp::new();
    let id = app.register("Alex", "alex@example.com").await;

    let res = app.send("GET", &format!("/accounts/{id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["email"], "alex@example.com");

    let res = app.send("DELETE", &format!("/accounts/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.send("GET", &format!("/accounts/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_string_registration_fields_get_the_validator_message() {
    let app = TestApp::new();
    let res = app
        .send(
            "POST",
            "/accounts",
            Some(json!({ "name": 42, "email": "alex@example.com", "password": STRONG_PASSWORD })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "error": "Name must be at least 3 characters long" }));
}

#[tokio::test]
async fn mistyped_json_is_a_bad_request() {
    let app = TestApp::new();
    let res = app
        .send("POST", "/sessions", Some(json!({ "email": 42, "password": "x" })))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].is_string());
}

#[tokio::test]
async fn unknown_routes_get_json_404() {
    let app = TestApp::new();
    let res = app.send("GET", "/api/nothing", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({ "error": "unknown endpoint" }));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new();
    let res = app.send("GET", "/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert!(res.headers.contains_key("x-request-id"));
}
