use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use fleet_core::auth::{Claims, ROLE_ADMINISTRATOR};

use crate::common::{ADMIN_EMAIL, TEST_ISSUER, TEST_SECRET, body_json, login_token, setup_test_app};

/// Sign a token directly, bypassing the login flow, to exercise the
/// validator with hostile inputs.
fn craft_token(secret: &str, issuer: &str, exp: i64) -> String {
    let claims = Claims {
        sub: "Admin".to_string(),
        email: ADMIN_EMAIL.to_string(),
        role: ROLE_ADMINISTRATOR.to_string(),
        iss: issuer.to_string(),
        exp,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

async fn authed_get(app: &Router, token: &str, path: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::get(path)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn authed_json(
    app: &Router,
    method: &str,
    path: &str,
    token: &str,
    body: &serde_json::Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .header("authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn authed_delete(app: &Router, token: &str, path: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::delete(path)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_seeded_credentials_returns_token() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;
    assert!(!token.is_empty());

    // The token actually works against a protected route.
    let response = authed_get(&app, &token, "/vehicles").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = setup_test_app().await;

    let body = serde_json::json!({ "email": ADMIN_EMAIL, "password": "wrong" });
    let response = app
        .oneshot(
            Request::post("/login")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "unauthorized");
    assert!(json.get("token").is_none());
}

#[tokio::test]
async fn login_with_unknown_email_returns_401() {
    let app = setup_test_app().await;

    let body = serde_json::json!({ "email": "nobody@nowhere", "password": "123456" });
    let response = app
        .oneshot(
            Request::post("/login")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Token gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_returns_401() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(Request::get("/vehicles").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forged_token_returns_401() {
    let app = setup_test_app().await;

    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = craft_token("attacker-secret", TEST_ISSUER, exp);

    let response = authed_get(&app, &token, "/vehicles").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_returns_401() {
    let app = setup_test_app().await;

    // Correctly signed but two hours past expiry.
    let exp = (Utc::now() - Duration::hours(2)).timestamp();
    let token = craft_token(TEST_SECRET, TEST_ISSUER, exp);

    let response = authed_get(&app, &token, "/vehicles").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_issuer_token_returns_401() {
    let app = setup_test_app().await;

    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = craft_token(TEST_SECRET, "someone-else", exp);

    let response = authed_get(&app, &token, "/vehicles").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_vehicle() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let body = serde_json::json!({ "make": "Honda", "model": "Civic", "year": 2020 });
    let response = authed_json(&app, "POST", "/vehicles", &token, &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);

    let response = authed_get(&app, &token, &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["make"], "Honda");
    assert_eq!(fetched["model"], "Civic");
    assert_eq!(fetched["year"], 2020);
    assert_eq!(fetched["id"], id);
}

#[tokio::test]
async fn create_vehicle_with_missing_make_returns_400() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let body = serde_json::json!({ "make": "", "model": "Civic", "year": 2020 });
    let response = authed_json(&app, "POST", "/vehicles", &token, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn create_vehicle_with_overlong_model_returns_400() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let body = serde_json::json!({ "make": "Honda", "model": "x".repeat(151), "year": 2020 });
    let response = authed_json(&app, "POST", "/vehicles", &token, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_vehicle_returns_404() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let response = authed_get(&app, &token, "/vehicles/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn update_vehicle_replaces_fields_and_preserves_id() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let body = serde_json::json!({ "make": "Honda", "model": "Civic", "year": 2020 });
    let response = authed_json(&app, "POST", "/vehicles", &token, &body).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "make": "Toyota", "model": "Corolla", "year": 2021 });
    let response = authed_json(&app, "PUT", &format!("/vehicles/{id}"), &token, &body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(authed_get(&app, &token, &format!("/vehicles/{id}")).await).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["make"], "Toyota");
    assert_eq!(fetched["model"], "Corolla");
    assert_eq!(fetched["year"], 2021);
}

#[tokio::test]
async fn update_missing_vehicle_returns_404() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let body = serde_json::json!({ "make": "Toyota", "model": "Corolla", "year": 2021 });
    let response = authed_json(&app, "PUT", "/vehicles/9999", &token, &body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_vehicle_then_get_returns_404() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let body = serde_json::json!({ "make": "Honda", "model": "Civic", "year": 2020 });
    let response = authed_json(&app, "POST", "/vehicles", &token, &body).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = authed_delete(&app, &token, &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = authed_get(&app, &token, &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again is a clean 404, no side effects.
    let response = authed_delete(&app, &token, &format!("/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_page_over_fifteen_vehicles() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    for i in 1..=15 {
        let body = serde_json::json!({
            "make": "Make",
            "model": format!("Model{i:02}"),
            "year": 2000 + i,
        });
        let response = authed_json(&app, "POST", "/vehicles", &token, &body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(authed_get(&app, &token, "/vehicles?page=2").await).await;
    assert_eq!(json["total"], 5);

    let models: Vec<&str> = json["vehicles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["model"].as_str().unwrap())
        .collect();
    assert_eq!(
        models,
        vec!["Model11", "Model12", "Model13", "Model14", "Model15"]
    );
}

#[tokio::test]
async fn model_filter_matches_case_insensitively() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    for (make, model) in [
        ("Honda", "Civic"),
        ("Honda", "CIVIC"),
        ("Honda", "civicx"),
        ("Honda", "Accord"),
    ] {
        let body = serde_json::json!({ "make": make, "model": model, "year": 2020 });
        authed_json(&app, "POST", "/vehicles", &token, &body).await;
    }

    let json = body_json(authed_get(&app, &token, "/vehicles?model=civic").await).await;
    assert_eq!(json["total"], 3);

    let models: Vec<String> = json["vehicles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["model"].as_str().unwrap().to_lowercase())
        .collect();
    assert!(models.iter().all(|m| m.contains("civic")));
}

// ---------------------------------------------------------------------------
// Administrators
// ---------------------------------------------------------------------------

#[tokio::test]
async fn administrators_list_includes_seed_and_hides_hash() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let json = body_json(authed_get(&app, &token, "/administrators").await).await;
    assert_eq!(json["total"], 1);

    let admin = &json["administrators"][0];
    assert_eq!(admin["email"], ADMIN_EMAIL);
    assert_eq!(admin["name"], "Admin");
    assert!(admin.get("password_hash").is_none());
    assert!(admin.get("password").is_none());
}

#[tokio::test]
async fn get_administrator_by_id() {
    let app = setup_test_app().await;
    let token = login_token(&app).await;

    let json = body_json(authed_get(&app, &token, "/administrators").await).await;
    let id = json["administrators"][0]["id"].as_i64().unwrap();

    let response = authed_get(&app, &token, &format!("/administrators/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed_get(&app, &token, &format!("/administrators/{}", id + 1)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
