//! Route-level tests driving the router in-process.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use friend_graph::{http::router, service::UserService, store::UserStore};
use serde_json::{Value, json};
use tower::ServiceExt;

fn demo_app() -> Router {
    router(Arc::new(UserService::new(UserStore::demo())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    dispatch(app, request.body(body).expect("build request")).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("response should be JSON");
    (status, json)
}

#[tokio::test]
async fn lists_seeded_users() {
    let app = demo_app();
    let (status, body) = send(&app, Method::GET, "/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "users": [
            { "user_id": 1, "friends": [2, 3] },
            { "user_id": 2, "friends": [3] },
            { "user_id": 3, "friends": [] },
        ]})
    );
}

#[tokio::test]
async fn create_get_update_delete_cycle() {
    let app = demo_app();

    let (status, created) = send(&app, Method::POST, "/user", Some(json!({ "friends": [1] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({ "user_id": 4, "friends": [1] }));

    let (status, fetched) = send(&app, Method::GET, "/user/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/user",
        Some(json!({ "user_id": "4", "friends": [2, 3] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "user_id": 4, "friends": [2, 3] }));

    let (status, deleted) = send(&app, Method::DELETE, "/user/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "result": true }));

    let (status, missing) = send(&app, Method::GET, "/user/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error_type"], "NotFound");
    assert_eq!(missing["message"], "No user with the ID '4' exists");
}

#[tokio::test]
async fn unknown_friend_is_a_validation_error() {
    let app = demo_app();
    let (status, body) = send(&app, Method::POST, "/user", Some(json!({ "friends": [999] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "ValidationError");
    assert!(body["message"].as_str().unwrap().contains("999"));

    let (_, users) = send(&app, Method::GET, "/user", None).await;
    assert_eq!(users["users"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn missing_payload_is_a_null_argument() {
    let app = demo_app();
    for method in [Method::POST, Method::PUT] {
        let (status, body) = send(&app, method, "/user", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "NullArgument");
        assert_eq!(body["message"], "Argument 'data' cannot be null");
    }
}

#[tokio::test]
async fn update_without_user_id_is_not_found() {
    let app = demo_app();
    let (status, body) = send(&app, Method::PUT, "/user", Some(json!({ "friends": [1] }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(body["message"], "No user with the ID '0' exists");
}

#[tokio::test]
async fn malformed_json_is_rejected_as_json() {
    let app = demo_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/user")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"friends\": ["))
        .expect("build request");
    let (status, body) = dispatch(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "BadRequest");
}

#[tokio::test]
async fn wrong_method_on_known_path_returns_json() {
    let app = demo_app();

    let (status, body) = send(&app, Method::PATCH, "/user", Some(json!({ "friends": [] }))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");
    assert_eq!(body["message"], "Method PATCH is not allowed on '/user'");

    let (status, body) = send(&app, Method::POST, "/user/3", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");

    let (status, body) = send(&app, Method::DELETE, "/distance/1/2", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error_type"], "MethodNotAllowed");

    // Nothing was touched by the rejected requests.
    let (_, users) = send(&app, Method::GET, "/user", None).await;
    assert_eq!(users["users"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn oversized_body_is_rejected_as_json() {
    let app = demo_app();
    // Whitespace alone would decode as an absent payload, so only the size
    // limit can produce a 413 here.
    let padding = vec![b' '; 3 * 1024 * 1024];
    for method in [Method::POST, Method::PUT] {
        let request = Request::builder()
            .method(method)
            .uri("/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(padding.clone()))
            .expect("build request");
        let (status, body) = dispatch(&app, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error_type"], "PayloadTooLarge");
    }
}

#[tokio::test]
async fn non_integer_path_is_a_bad_request() {
    let app = demo_app();
    let (status, body) = send(&app, Method::GET, "/user/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "BadRequest");
}

#[tokio::test]
async fn unknown_route_returns_json() {
    let app = demo_app();
    let (status, body) = send(&app, Method::GET, "/users/everyone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn distance_follows_directed_edges() {
    let app = demo_app();

    let (status, body) = send(&app, Method::GET, "/distance/1/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "user_one": 1, "user_two": 2, "degrees_separated": 1 })
    );

    let (_, body) = send(&app, Method::GET, "/distance/3/3", None).await;
    assert_eq!(body["degrees_separated"], 0);

    let (status, body) = send(&app, Method::GET, "/distance/2/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotConnected");
    assert_eq!(body["message"], "Users '2' and '1' are not connected");

    let (status, body) = send(&app, Method::GET, "/distance/1/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "NotFound");
    assert!(body["message"].as_str().unwrap().contains("42"));
}
