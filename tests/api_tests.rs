//! Integration tests for the web flows: registration, login, the catalogue,
//! and per-account recipe status updates.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use larder::config::Config;
use larder::state::AppState;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;
    // Cheap hash parameters keep the password tests fast.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = AppState::new(config)
        .await
        .expect("failed to create app state");
    larder::api::router(Arc::new(state))
        .await
        .expect("failed to build router")
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The session cookie pair (`id=...`) from a response that bound a session.
fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .expect("cookie should be ascii")
        .split(';')
        .next()
        .expect("cookie should have a value")
        .to_string()
}

async fn register(app: &Router, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": username,
                        "password": password,
                        "confirm_password": password
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": username,
                        "password": password
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn update_status(
    app: &Router,
    cookie: &str,
    recipe_id: i32,
    status: serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/update-recipe-status")
                .header("Content-Type", "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(
                    serde_json::json!({ "id": recipe_id, "status": status }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_detail(app: &Router, cookie: Option<&str>, uri: &str) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn register_then_login_same_account() {
    let app = spawn_app().await;

    let response = register(&app, "alice", "hunter22").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));

    let registered = body_json(response).await;
    assert_eq!(registered["success"], serde_json::json!(true));
    assert_eq!(registered["data"]["username"], "alice");
    let account_id = registered["data"]["id"]
        .as_i64()
        .expect("registration should return the account id");

    // Fresh login without the registration cookie maps to the same account.
    let response = login(&app, "alice", "hunter22").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));

    let logged_in = body_json(response).await;
    assert_eq!(logged_in["data"]["id"], serde_json::json!(account_id));
}

#[tokio::test]
async fn duplicate_username_registration_conflict() {
    let app = spawn_app().await;

    let response = register(&app, "brian", "password").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = register(&app, "brian", "different").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["error"], "Username is already taken");
}

#[tokio::test]
async fn register_validation_rules() {
    let app = spawn_app().await;

    // Username too short.
    let response = register(&app, "abc", "password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Username too long.
    let long_name = "a".repeat(21);
    let response = register(&app, &long_name, "password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Password too short.
    let response = register(&app, "valid_user", "abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Mismatched confirmation.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": "valid_user",
                        "password": "password",
                        "confirm_password": "passwore"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["error"], "Passwords do not match");
}

#[tokio::test]
async fn login_failure_is_undifferentiated() {
    let app = spawn_app().await;

    let response = register(&app, "carol", "secretpw").await;
    assert_eq!(response.status(), StatusCode::OK);

    let unknown_user = login(&app, "nobody", "secretpw").await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = login(&app, "carol", "wrong-pw").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // The two failures must be indistinguishable to the caller.
    let unknown_body = body_json(unknown_user).await;
    let wrong_body = body_json(wrong_password).await;
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "Invalid username or password");
}

#[tokio::test]
async fn recipe_listing_and_detail() {
    let app = spawn_app().await;

    let response = get_detail(&app, None, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(response).await;
    let recipes = listing["data"].as_array().expect("data should be an array");
    assert_eq!(recipes.len(), 9);
    assert_eq!(recipes[0]["id"], 1);
    assert_eq!(recipes[0]["name"], "Salad");
    assert_eq!(recipes[8]["name"], "Cookie");

    let response = get_detail(&app, None, "/recipe/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = body_json(response).await;
    assert_eq!(detail["data"]["name"], "Salad");
    assert_eq!(detail["data"]["ingredients"], "Lettuce, Tomato");
    assert_eq!(detail["data"]["status"], 0);
    assert_eq!(detail["data"]["status_label"], "Not Owned");
    assert_eq!(detail["data"]["authenticated"], serde_json::json!(false));
    assert_eq!(
        detail["data"]["status_choices"],
        serde_json::json!([
            { "value": 0, "label": "Not Owned" },
            { "value": 1, "label": "Owned" },
            { "value": 2, "label": "Cooked" }
        ])
    );
}

#[tokio::test]
async fn ingredient_lines_follow_catalogue_order() {
    let app = spawn_app().await;

    // Pizza links to Wheat Flour, Tomato and Cheese; the line is ordered by
    // ingredient id, not insertion order.
    let response = get_detail(&app, None, "/recipe/6").await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = body_json(response).await;
    assert_eq!(detail["data"]["name"], "Pizza");
    assert_eq!(
        detail["data"]["ingredients"],
        "Tomato, Wheat Flour, Cheese"
    );
}

#[tokio::test]
async fn unknown_recipe_detail_is_not_found() {
    let app = spawn_app().await;

    let response = get_detail(&app, None, "/recipe/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["error"], "Recipe 9999 not found");

    // A non-numeric id is treated the same way, not as a bad request.
    let response = get_detail(&app, None, "/recipe/abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_update_round_trip() {
    let app = spawn_app().await;

    let response = register(&app, "david", "password").await;
    let cookie = session_cookie(&response);

    let response = update_status(&app, &cookie, 1, serde_json::json!(2)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The ack is the bare flag, nothing else.
    let ack = body_json(response).await;
    assert_eq!(ack, serde_json::json!({ "success": true }));

    let response = get_detail(&app, Some(&cookie), "/recipe/1").await;
    let detail = body_json(response).await;
    assert_eq!(detail["data"]["status"], 2);
    assert_eq!(detail["data"]["status_label"], "Cooked");
    assert_eq!(detail["data"]["authenticated"], serde_json::json!(true));

    // Another account still sees the default for the same recipe.
    let response = register(&app, "erin", "password").await;
    let other_cookie = session_cookie(&response);

    let response = get_detail(&app, Some(&other_cookie), "/recipe/1").await;
    let detail = body_json(response).await;
    assert_eq!(detail["data"]["status"], 0);

    // Setting again overwrites rather than duplicating.
    let response = update_status(&app, &cookie, 1, serde_json::json!(1)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_detail(&app, Some(&cookie), "/recipe/1").await;
    let detail = body_json(response).await;
    assert_eq!(detail["data"]["status"], 1);
    assert_eq!(detail["data"]["status_label"], "Owned");
}

#[tokio::test]
async fn invalid_status_values_rejected() {
    let app = spawn_app().await;

    let response = register(&app, "frank", "password").await;
    let cookie = session_cookie(&response);

    let response = update_status(&app, &cookie, 2, serde_json::json!(1)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Out of range above, below, and not a number at all.
    for bad_status in [
        serde_json::json!(3),
        serde_json::json!(-1),
        serde_json::json!("two"),
    ] {
        let response = update_status(&app, &cookie, 2, bad_status).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let ack = body_json(response).await;
        assert_eq!(ack, serde_json::json!({ "success": false }));
    }

    // Unknown recipe id gets the same ack.
    let response = update_status(&app, &cookie, 9999, serde_json::json!(1)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let ack = body_json(response).await;
    assert_eq!(ack, serde_json::json!({ "success": false }));

    // None of the rejected writes touched the stored value.
    let response = get_detail(&app, Some(&cookie), "/recipe/2").await;
    let detail = body_json(response).await;
    assert_eq!(detail["data"]["status"], 1);
}

#[tokio::test]
async fn unauthenticated_status_update_redirects_to_login() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/update-recipe-status")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "id": 1, "status": 1 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}

#[tokio::test]
async fn logout_ends_session() {
    let app = spawn_app().await;

    let response = register(&app, "grace", "password").await;
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );

    // The flushed cookie no longer opens the protected routes.
    let response = update_status(&app, &cookie, 1, serde_json::json!(1)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // And the session state endpoint reads as anonymous.
    let response = get_detail(&app, Some(&cookie), "/login").await;
    let state = body_json(response).await;
    assert_eq!(state["data"]["authenticated"], serde_json::json!(false));
}

#[tokio::test]
async fn unmatched_route_is_not_found() {
    let app = spawn_app().await;

    let response = get_detail(&app, None, "/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["error"], "Resource not found");
}
