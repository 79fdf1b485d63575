/// Integration tests for the Taskboard API
///
/// These tests verify the full HTTP surface end-to-end against a migrated
/// in-memory SQLite database:
/// - Task CRUD (including the preserved route quirks)
/// - User CRUD with slug derivation and delete cascade
/// - Error mapping (404 / 409 / 422 / 500)
/// - Health check

mod common;

use axum::http::StatusCode;
use common::{seed_task, seed_user, TestContext};
use serde_json::json;
use taskboard_shared::models::task::Task;
use taskboard_shared::models::user::User;

fn task_body(taskname: &str) -> serde_json::Value {
    json!({
        "taskname": taskname,
        "firstname": "John",
        "lastname": "Doe",
        "age": 34,
        "title": "Write the weekly report",
        "description": "Summarize progress for the week"
    })
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_list_tasks_empty_store() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/task/all_users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_missing_task_returns_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/task/user_id/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Task was not found");
}

#[tokio::test]
async fn test_create_task_for_missing_user_writes_nothing() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send_json("POST", "/task/create?user_id=999", task_body("t1"))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User was not found");
    assert_eq!(Task::count(&ctx.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_task_round_trip() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;

    let (status, body) = ctx
        .send_json(
            "POST",
            &format!("/task/create?user_id={}", user.id),
            task_body("t1"),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["transaction"], "Successful");

    // The create response carries no entity; fetch the row by its
    // generated identifier
    let tasks = Task::list(&ctx.db).await.unwrap();
    assert_eq!(tasks.len(), 1);

    let (status, body) = ctx
        .send("GET", &format!("/task/user_id/{}", tasks[0].id))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskname"], "t1");
    assert_eq!(body["firstname"], "John");
    assert_eq!(body["lastname"], "Doe");
    assert_eq!(body["age"], 34);
    assert_eq!(body["title"], "Write the weekly report");
    assert_eq!(body["description"], "Summarize progress for the week");
    assert_eq!(body["user_id"], user.id);
}

#[tokio::test]
async fn test_create_task_invalid_payload_returns_422() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;

    let mut body = task_body("");
    body["age"] = json!(200);

    let (status, body) = ctx
        .send_json("POST", &format!("/task/create?user_id={}", user.id), body)
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "taskname"));
    assert!(details.iter().any(|d| d["field"] == "age"));
    assert_eq!(Task::count(&ctx.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_missing_task_writes_nothing() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;
    seed_task(&ctx, user.id, "t1").await;

    let (status, body) = ctx
        .send_json(
            "PUT",
            "/task/update/1?task_id=999",
            json!({
                "taskname": "renamed",
                "firstname": "Jane",
                "lastname": "Doe",
                "age": 35
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task was not found");

    let tasks = Task::list(&ctx.db).await.unwrap();
    assert_eq!(tasks[0].taskname, "t1");
}

#[tokio::test]
async fn test_update_overwrites_only_mutable_fields() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;
    let task = seed_task(&ctx, user.id, "t1").await;

    let (status, body) = ctx
        .send_json(
            "PUT",
            &format!("/task/update/{}?task_id={}", user.id, task.id),
            json!({
                "taskname": "renamed",
                "firstname": "Jane",
                "lastname": "Smith",
                "age": 35
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["transaction"], "Task update is successful!");

    let updated = Task::find_by_id(&ctx.db, task.id).await.unwrap().unwrap();
    assert_eq!(updated.taskname, "renamed");
    assert_eq!(updated.firstname, "Jane");
    assert_eq!(updated.lastname, "Smith");
    assert_eq!(updated.age, 35);
    // Title, description, and owner are outside the update surface
    assert_eq!(updated.title, task.title);
    assert_eq!(updated.description, task.description);
    assert_eq!(updated.user_id, task.user_id);
}

#[tokio::test]
async fn test_update_path_segment_is_ignored() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;
    let task = seed_task(&ctx, user.id, "t1").await;

    // The :user_id path segment carries a bogus value; only the task_id
    // query parameter selects the row
    let (status, _) = ctx
        .send_json(
            "PUT",
            &format!("/task/update/424242?task_id={}", task.id),
            json!({
                "taskname": "renamed",
                "firstname": "Jane",
                "lastname": "Doe",
                "age": 35
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);

    let updated = Task::find_by_id(&ctx.db, task.id).await.unwrap().unwrap();
    assert_eq!(updated.taskname, "renamed");
}

#[tokio::test]
async fn test_delete_task_then_get_returns_404() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;
    let task = seed_task(&ctx, user.id, "t1").await;

    let (status, _) = ctx
        .send("DELETE", &format!("/task/delete/0?task_id={}", task.id))
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.send("GET", &format!("/task/user_id/{}", task.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(Task::count(&ctx.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_task_returns_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("DELETE", "/task/delete/0?task_id=999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task was not found");
}

/// The example flow from the public contract: create a user, create a task
/// for them, read it back, delete it, and observe the 404.
#[tokio::test]
async fn test_example_flow() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;

    let (status, _) = ctx
        .send_json(
            "POST",
            &format!("/task/create?user_id={}", user.id),
            task_body("t1"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let task_id = Task::list(&ctx.db).await.unwrap()[0].id;

    let (status, body) = ctx.send("GET", &format!("/task/user_id/{}", task_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskname"], "t1");

    let (status, _) = ctx
        .send("DELETE", &format!("/task/delete/{}?task_id={}", user.id, task_id))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.send("GET", &format!("/task/user_id/{}", task_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_derives_slug() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send_json(
            "POST",
            "/user/create",
            json!({
                "username": "John Doe",
                "firstname": "John",
                "lastname": "Doe",
                "age": 34
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["transaction"], "Successful");

    let users = User::list(&ctx.db).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "John Doe");
    assert_eq!(users[0].slug, "john-doe");
}

#[tokio::test]
async fn test_duplicate_username_returns_409() {
    let ctx = TestContext::new().await.unwrap();
    seed_user(&ctx, "jdoe").await;

    let (status, body) = ctx
        .send_json(
            "POST",
            "/user/create",
            json!({
                "username": "jdoe",
                "firstname": "John",
                "lastname": "Doe",
                "age": 34
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
    assert_eq!(User::count(&ctx.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/user/user_id/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User was not found");
}

#[tokio::test]
async fn test_update_user_preserves_identity_fields() {
    let ctx = TestContext::new().await.unwrap();
    let user = seed_user(&ctx, "jdoe").await;

    let (status, body) = ctx
        .send_json(
            "PUT",
            &format!("/user/update/{}", user.id),
            json!({
                "firstname": "Jane",
                "lastname": "Smith",
                "age": 35
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction"], "User update is successful!");

    let updated = User::find_by_id(&ctx.db, user.id).await.unwrap().unwrap();
    assert_eq!(updated.firstname, "Jane");
    assert_eq!(updated.lastname, "Smith");
    assert_eq!(updated.age, 35);
    assert_eq!(updated.username, "jdoe");
    assert_eq!(updated.slug, "jdoe");
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx
        .send_json(
            "PUT",
            "/user/update/999",
            json!({
                "firstname": "Jane",
                "lastname": "Smith",
                "age": 35
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_cascades_to_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let alice = seed_user(&ctx, "alice").await;
    let bob = seed_user(&ctx, "bob").await;
    seed_task(&ctx, alice.id, "alice-task").await;
    let bob_task = seed_task(&ctx, bob.id, "bob-task").await;

    let (status, body) = ctx
        .send("DELETE", &format!("/user/delete/{}", alice.id))
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body["transaction"], "User deleted successfully!");

    // Alice's task went with her; Bob's survives
    let remaining = Task::list(&ctx.db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, bob_task.id);
}

#[tokio::test]
async fn test_delete_missing_user_returns_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx.send("DELETE", "/user/delete/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tasks_by_user() {
    let ctx = TestContext::new().await.unwrap();
    let alice = seed_user(&ctx, "alice").await;
    let bob = seed_user(&ctx, "bob").await;
    seed_task(&ctx, alice.id, "a1").await;
    seed_task(&ctx, alice.id, "a2").await;
    seed_task(&ctx, bob.id, "b1").await;

    let (status, body) = ctx
        .send("GET", &format!("/user/user_id/{}/tasks", alice.id))
        .await;

    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t["user_id"] == alice.id));

    let (status, _) = ctx.send("GET", "/user/user_id/999/tasks").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/user/all_users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    seed_user(&ctx, "alice").await;
    seed_user(&ctx, "bob").await;

    let (status, body) = ctx.send("GET", "/user/all_users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}
