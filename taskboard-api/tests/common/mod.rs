/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A migrated in-memory SQLite database per test
/// - The real application router built over that database
/// - Seed helpers for users and tasks
/// - Request helpers that drive the router as a tower Service

use axum::body::Body;
use axum::http::{Request, StatusCode};
use heck::ToKebabCase;
use sqlx::SqlitePool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig as ApiDatabaseConfig};
use taskboard_shared::db::migrations::run_migrations;
use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
use taskboard_shared::models::task::{CreateTask, Task};
use taskboard_shared::models::user::{CreateUser, User};
use tower::Service as _;

/// Test context containing the database and the application router
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        // An in-memory database lives and dies with its connection, so the
        // pool must hold exactly one and never recycle it
        let db = create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_seconds: None,
            max_lifetime_seconds: None,
            ..Default::default()
        })
        .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: ApiDatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a request without a body and parses the JSON response
    pub async fn send(&self, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.call(request).await
    }

    /// Sends a request with a JSON body and parses the JSON response
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

        (status, json)
    }
}

/// Creates a test user directly in the database
pub async fn seed_user(ctx: &TestContext, username: &str) -> User {
    User::create(
        &ctx.db,
        CreateUser {
            username: username.to_string(),
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            age: 34,
            slug: username.to_kebab_case(),
        },
    )
    .await
    .expect("Failed to seed user")
}

/// Creates a test task directly in the database
pub async fn seed_task(ctx: &TestContext, user_id: i64, taskname: &str) -> Task {
    Task::create(
        &ctx.db,
        CreateTask {
            user_id,
            taskname: taskname.to_string(),
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            age: 34,
            title: "A title".to_string(),
            description: "A description".to_string(),
        },
    )
    .await
    .expect("Failed to seed task")
}
