/// Task model and database operations
///
/// This module provides the Task model, the central entity of Taskboard.
/// A task carries its own descriptive fields plus a snapshot of the owner's
/// name and age, and is linked to exactly one user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     taskname TEXT NOT NULL,
///     firstname TEXT NOT NULL,
///     lastname TEXT NOT NULL,
///     age INTEGER NOT NULL,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
///     updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::models::task::{CreateTask, Task};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: "sqlite:taskboard.db".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: 1,
///     taskname: "weekly-report".to_string(),
///     firstname: "John".to_string(),
///     lastname: "Doe".to_string(),
///     age: 34,
///     title: "Write the weekly report".to_string(),
///     description: "Summarize progress for the week".to_string(),
/// }).await?;
///
/// println!("Created task: {}", task.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task model representing one unit of work
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (assigned by the database)
    pub id: i64,

    /// Short task name
    pub taskname: String,

    /// Owner's first name as submitted with the task
    pub firstname: String,

    /// Owner's last name as submitted with the task
    pub lastname: String,

    /// Owner's age as submitted with the task
    pub age: i64,

    /// Task title
    pub title: String,

    /// Longer task description
    pub description: String,

    /// User this task belongs to
    pub user_id: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user; must reference an existing user
    pub user_id: i64,

    /// Short task name
    pub taskname: String,

    /// Owner's first name
    pub firstname: String,

    /// Owner's last name
    pub lastname: String,

    /// Owner's age
    pub age: i64,

    /// Task title
    pub title: String,

    /// Longer task description
    pub description: String,
}

/// Input for updating a task
///
/// The update surface covers the task name and the owner snapshot fields.
/// Title and description are not part of it, matching the public contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Replacement task name
    pub taskname: String,

    /// Replacement first name
    pub firstname: String,

    /// Replacement last name
    pub lastname: String,

    /// Replacement age
    pub age: i64,
}

impl Task {
    /// Creates a new task linked to a user
    ///
    /// The caller is responsible for verifying the user exists; an insert
    /// with an unknown `user_id` fails with a foreign key violation.
    ///
    /// # Returns
    ///
    /// The newly created task with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use taskboard_shared::models::task::{CreateTask, Task};
    /// # use sqlx::SqlitePool;
    /// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
    /// let task = Task::create(&pool, CreateTask {
    ///     user_id: 1,
    ///     taskname: "weekly-report".to_string(),
    ///     firstname: "John".to_string(),
    ///     lastname: "Doe".to_string(),
    ///     age: 34,
    ///     title: "Write the weekly report".to_string(),
    ///     description: "Summarize progress for the week".to_string(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (taskname, firstname, lastname, age, title, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, taskname, firstname, lastname, age, title, description, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.taskname)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// # Returns
    ///
    /// The task if found, None otherwise
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, taskname, firstname, lastname, age, title, description, user_id,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, ordered by ID
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, taskname, firstname, lastname, age, title, description, user_id,
                   created_at, updated_at
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists the tasks owned by one user, ordered by ID
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, taskname, firstname, lastname, age, title, description, user_id,
                   created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's mutable fields
    ///
    /// Overwrites taskname, firstname, lastname, and age; title, description,
    /// and the owning user are left untouched. The `updated_at` timestamp is
    /// set to the current time.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET taskname = $2,
                firstname = $3,
                lastname = $4,
                age = $5,
                updated_at = datetime('now')
            WHERE id = $1
            RETURNING id, taskname, firstname, lastname, age, title, description, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.taskname)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if the task didn't exist
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of tasks
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_struct() {
        let create_task = CreateTask {
            user_id: 1,
            taskname: "weekly-report".to_string(),
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            age: 34,
            title: "Write the weekly report".to_string(),
            description: "Summarize progress for the week".to_string(),
        };

        assert_eq!(create_task.taskname, "weekly-report");
        assert_eq!(create_task.user_id, 1);
    }

    #[test]
    fn test_update_task_excludes_title_and_description() {
        let update = UpdateTask {
            taskname: "renamed".to_string(),
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            age: 35,
        };

        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("title").is_none());
        assert!(json.get("description").is_none());
    }

    // Integration tests for database operations are in tests/task_model_tests.rs
}
