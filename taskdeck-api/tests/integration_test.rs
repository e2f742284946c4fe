/// Integration tests for the taskdeck API
///
/// These drive the full router — routing, validation, bearer-token
/// middleware, both service cores, and the store adapters — end-to-end:
/// - Registration and sign-in flows
/// - Owner-scoped task CRUD
/// - Filtered listing
/// - Cross-user isolation

mod common;

use axum::http::StatusCode;
use common::{authed_json_request, authed_request, json_request, read_json, TestContext};
use serde_json::json;

/// The full lifecycle: register, sign in, create, update, filter, delete
#[tokio::test]
async fn test_task_lifecycle() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "secret1").await;

    // Create a task; it starts open
    let response = ctx
        .send(authed_json_request(
            "POST",
            "/v1/tasks",
            &token,
            json!({ "title": "buy milk", "description": "2%" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let task = read_json(response).await;
    assert_eq!(task["status"], "open");
    assert_eq!(task["title"], "buy milk");
    assert_eq!(task["description"], "2%");
    let task_id = task["id"].as_i64().unwrap();
    let owner_id = task["owner_id"].as_i64().unwrap();

    // Mark it done
    let response = ctx
        .send(authed_json_request(
            "PATCH",
            &format!("/v1/tasks/{}/status", task_id),
            &token,
            json!({ "status": "done" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["owner_id"].as_i64().unwrap(), owner_id);

    // Filtering by done returns exactly that one task
    let response = ctx
        .send(authed_request("GET", "/v1/tasks?status=done", &token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = read_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"].as_i64().unwrap(), task_id);

    // Delete it
    let response = ctx
        .send(authed_request(
            "DELETE",
            &format!("/v1/tasks/{}", task_id),
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // It is gone
    let response = ctx
        .send(authed_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signup_conflict_keeps_first_account() {
    let ctx = TestContext::new();
    ctx.sign_up("alice", "first-password").await;

    // Same username again conflicts
    let response = ctx
        .send(json_request(
            "POST",
            "/v1/auth/signup",
            json!({ "username": "alice", "password": "second-password" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert_eq!(body["error"], "conflict");

    // The original credentials still work; the attempted ones never took
    ctx.sign_in("alice", "first-password").await;
    let response = ctx
        .send(json_request(
            "POST",
            "/v1/auth/signin",
            json!({ "username": "alice", "password": "second-password" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signin_failures_are_indistinguishable() {
    let ctx = TestContext::new();
    ctx.sign_up("alice", "secret1").await;

    let wrong_password = ctx
        .send(json_request(
            "POST",
            "/v1/auth/signin",
            json!({ "username": "alice", "password": "wrong" }),
        ))
        .await;
    let unknown_user = ctx
        .send(json_request(
            "POST",
            "/v1/auth/signin",
            json!({ "username": "nobody", "password": "secret1" }),
        ))
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Same error payload for both causes
    let a = read_json(wrong_password).await;
    let b = read_json(unknown_user).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_tasks_are_invisible_across_users() {
    let ctx = TestContext::new();
    let alice = ctx.register("alice", "secret1").await;
    let bob = ctx.register("bob", "secret2").await;

    let response = ctx
        .send(authed_json_request(
            "POST",
            "/v1/tasks",
            &alice,
            json!({ "title": "private", "description": "alice only" }),
        ))
        .await;
    let task = read_json(response).await;
    let task_id = task["id"].as_i64().unwrap();

    // Bob cannot fetch, update, or delete Alice's task; all are plain 404s
    let response = ctx
        .send(authed_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            &bob,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .send(authed_json_request(
            "PATCH",
            &format!("/v1/tasks/{}/status", task_id),
            &bob,
            json!({ "status": "done" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .send(authed_request(
            "DELETE",
            &format!("/v1/tasks/{}", task_id),
            &bob,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Bob's listing is empty; Alice's task is intact and still open
    let response = ctx.send(authed_request("GET", "/v1/tasks", &bob)).await;
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 0);

    let response = ctx
        .send(authed_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            &alice,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "open");
}

#[tokio::test]
async fn test_list_search_and_status_combine() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "secret1").await;

    for (title, description) in [
        ("Groceries", "buy milk and eggs"),
        ("Laundry", "whites only"),
        ("Milk run", "again"),
    ] {
        let response = ctx
            .send(authed_json_request(
                "POST",
                "/v1/tasks",
                &token,
                json!({ "title": title, "description": description }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Case-insensitive search across title and description
    let response = ctx
        .send(authed_request("GET", "/v1/tasks?search=MILK", &token))
        .await;
    let hits = read_json(response).await;
    let hits = hits.as_array().unwrap().clone();
    assert_eq!(hits.len(), 2);

    // Mark one of the matches done; combined filter narrows to it
    let done_id = hits[0]["id"].as_i64().unwrap();
    ctx.send(authed_json_request(
        "PATCH",
        &format!("/v1/tasks/{}/status", done_id),
        &token,
        json!({ "status": "done" }),
    ))
    .await;

    let response = ctx
        .send(authed_request(
            "GET",
            "/v1/tasks?search=milk&status=done",
            &token,
        ))
        .await;
    let narrowed = read_json(response).await;
    let narrowed = narrowed.as_array().unwrap().clone();
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0]["id"].as_i64().unwrap(), done_id);
}

#[tokio::test]
async fn test_task_routes_require_token() {
    let ctx = TestContext::new();

    // No Authorization header
    let response = ctx
        .send(
            axum::http::Request::builder()
                .method("GET")
                .uri("/v1/tasks")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let response = ctx
        .send(authed_request("GET", "/v1/tasks", "not.a.token"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_validation_rejects_empty_fields() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(
            "POST",
            "/v1/auth/signup",
            json!({ "username": "", "password": "secret1" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(body["error"], "validation_error");

    let token = ctx.register("alice", "secret1").await;
    let response = ctx
        .send(authed_json_request(
            "POST",
            "/v1/tasks",
            &token,
            json!({ "title": "", "description": "something" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx
        .send(
            axum::http::Request::builder()
                .method("GET")
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
}
