/// User model and database operations
///
/// This module provides the User model and CRUD operations for the accounts
/// that own tasks. Every task references exactly one user, and a user must
/// exist before tasks can be created for it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     firstname TEXT NOT NULL,
///     lastname TEXT NOT NULL,
///     age INTEGER NOT NULL,
///     slug TEXT NOT NULL UNIQUE,
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
///     updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::models::user::{CreateUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: "sqlite:taskboard.db".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// let new_user = CreateUser {
///     username: "jdoe".to_string(),
///     firstname: "John".to_string(),
///     lastname: "Doe".to_string(),
///     age: 34,
///     slug: "jdoe".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User model representing an account that owns tasks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (assigned by the database)
    pub id: i64,

    /// Login/display name
    ///
    /// Must be unique across all users
    pub username: String,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,

    /// Age in years
    pub age: i64,

    /// URL-friendly identifier derived from the username at creation
    ///
    /// Unique, and immutable after creation
    pub slug: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login/display name (unique)
    pub username: String,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,

    /// Age in years
    pub age: i64,

    /// URL-friendly identifier (unique)
    pub slug: String,
}

/// Input for updating an existing user
///
/// The username and slug are identity fields and stay fixed after creation;
/// updates overwrite the remaining attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// Replacement first name
    pub firstname: String,

    /// Replacement last name
    pub lastname: String,

    /// Replacement age
    pub age: i64,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Returns
    ///
    /// The newly created user with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username or slug already exists (unique constraint violation)
    /// - Database connection fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use taskboard_shared::models::user::{CreateUser, User};
    /// # use sqlx::SqlitePool;
    /// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
    /// let user = User::create(&pool, CreateUser {
    ///     username: "jdoe".to_string(),
    ///     firstname: "John".to_string(),
    ///     lastname: "Doe".to_string(),
    ///     age: 34,
    ///     slug: "jdoe".to_string(),
    /// }).await?;
    /// println!("Created user: {}", user.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, firstname, lastname, age, slug)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, firstname, lastname, age, slug, created_at, updated_at
            "#,
        )
        .bind(data.username)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .bind(data.slug)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users, ordered by ID
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Updates an existing user
    ///
    /// Overwrites firstname, lastname, and age; username and slug are left
    /// untouched. The `updated_at` timestamp is set to the current time.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use taskboard_shared::models::user::{UpdateUser, User};
    /// # use sqlx::SqlitePool;
    /// # async fn example(pool: SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
    /// let update = UpdateUser {
    ///     firstname: "Jane".to_string(),
    ///     lastname: "Doe".to_string(),
    ///     age: 35,
    /// };
    ///
    /// if let Some(user) = User::update(&pool, user_id, update).await? {
    ///     println!("Updated user: {}", user.username);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET firstname = $2,
                lastname = $3,
                age = $4,
                updated_at = datetime('now')
            WHERE id = $1
            RETURNING id, username, firstname, lastname, age, slug, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// The user's tasks are removed with it via ON DELETE CASCADE.
    ///
    /// # Returns
    ///
    /// True if the user was deleted, false if the user didn't exist
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
