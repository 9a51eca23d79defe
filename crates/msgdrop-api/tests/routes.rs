use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use msgdrop_api::{AppState, AppStateInner, router};
use msgdrop_db::Database;

fn app() -> Router {
    app_with_state().0
}

fn app_with_state() -> (Router, AppState) {
    let db = Database::open_in_memory().unwrap();
    let state: AppState = Arc::new(AppStateInner { db });
    (router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn list_request(token: &str) -> Request<Body> {
    Request::get("/messages")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn create_user(app: &Router, name: &str) -> String {
    let (status, body) = send(app, post_json("/users", json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_user_returns_token_once() {
    let app = app();
    let token = create_user(&app, "steve").await;
    assert_eq!(token.len(), 24);

    let (status, body) = send(&app, post_json("/users", json!({ "name": "steve" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "status": "fail", "message": "User already exists!" }));
}

#[tokio::test]
async fn post_then_list_messages() {
    let app = app();
    let token = create_user(&app, "steve").await;

    let (status, body) = send(
        &app,
        post_json(
            "/messages",
            json!({ "topic": "new mail", "priority": 3, "token": token }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "new message processed successfully");
    let id = body["data"]["message_id"].as_i64().unwrap();

    let (status, body) = send(&app, list_request(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Messages were queried!");
    let messages = body["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["id"], id);
    assert_eq!(messages[0]["topic"], "new mail");
    assert_eq!(messages[0]["priority"], 3);
    assert!(messages[0]["details"].is_null());
    assert_eq!(messages[0]["archived"], false);
}

#[tokio::test]
async fn missing_fields_are_named() {
    let app = app();

    let (status, body) = send(&app, post_json("/messages", json!({ "topic": "t" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Missing argument(s): priority, token");

    let empty = Request::post("/messages").body(Body::empty()).unwrap();
    let (status, body) = send(&app, empty).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing argument(s): topic, priority, token");
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = app();
    create_user(&app, "steve").await;

    let (status, body) = send(
        &app,
        post_json(
            "/messages",
            json!({ "topic": "t", "priority": 1, "token": "garbage" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "status": "fail", "message": "Unknown token!" }));

    let (status, body) = send(&app, list_request("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unknown token!");
}

#[tokio::test]
async fn deactivated_user_is_forbidden() {
    let (app, state) = app_with_state();
    let token = create_user(&app, "steve").await;

    state
        .db
        .with_conn_mut(|conn| {
            conn.execute("UPDATE user SET activated = 0 WHERE name = 'steve'", [])?;
            Ok(())
        })
        .unwrap();

    let (status, body) = send(
        &app,
        post_json(
            "/messages",
            json!({ "topic": "t", "priority": 1, "token": token }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "status": "fail", "message": "User not activated!" }));

    let (status, body) = send(&app, list_request(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "status": "fail", "message": "User not active!" }));
}

#[tokio::test]
async fn wrongly_typed_field_is_named() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/messages",
            json!({ "topic": "t", "priority": true, "token": "abc" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": "fail", "message": "Invalid argument(s): priority" }));
}

#[tokio::test]
async fn oversized_token_is_unknown() {
    let app = app();
    create_user(&app, "steve").await;

    let (status, body) = send(
        &app,
        post_json(
            "/messages",
            json!({ "topic": "t", "priority": 1, "token": "a".repeat(1 << 20) }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unknown token!");
}

#[tokio::test]
async fn listing_requires_bearer_header() {
    let app = app();

    let req = Request::get("/messages").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing argument(s): token");
}

#[tokio::test]
async fn malformed_json_is_a_fail_envelope() {
    let app = app();

    let req = Request::post("/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"topic\":"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": "fail", "message": "Invalid JSON!" }));
}

#[tokio::test]
async fn health_is_ok() {
    let app = app();
    let res = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
