/// Task model and database operations
///
/// Tasks are the core entity of Tasklane: user-owned todo items with a
/// title, an optional description, and a completion flag.
///
/// Every operation here is scoped by `(id, user_id)` in a single SQL
/// statement. A task that exists but belongs to a different user is
/// indistinguishable from one that does not exist: both come back as
/// `None` (or `false` for deletes). Callers never learn whether a foreign
/// task id is in use.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::models::task::{Task, CreateTask};
/// use tasklane_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: 1,
///     title: "Buy milk".to_string(),
///     description: None,
/// }).await?;
///
/// assert!(!task.completed);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task model representing a user-owned todo item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id, assigned by the database at creation
    pub id: i64,

    /// Owning user. Fixed at creation; no operation reassigns it.
    pub user_id: i64,

    /// Task title (non-empty after trimming)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion flag, false on creation
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Owning user id
    pub user_id: i64,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for partially updating a task
///
/// Only provided fields change; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Task {
    /// Creates a new task owned by `data.user_id`
    ///
    /// The completion flag starts false. Title validation (non-empty after
    /// trimming) happens at the API boundary before this is called; the
    /// NOT NULL constraint backstops it.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, ordered by id for deterministic
    /// output.
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
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

    /// Finds a task by id, scoped to its owner
    ///
    /// Returns `None` when the task does not exist OR belongs to a
    /// different user.
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Partially updates a task, scoped to its owner
    ///
    /// Only fields present in `data` are written. Returns `None` when the
    /// task is not found or not owned.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        user_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET clause from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND user_id = $2 \
             RETURNING id, user_id, title, description, completed, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(user_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Sets the completion flag, scoped to the owner
    ///
    /// Idempotent: setting the same value twice succeeds and leaves the
    /// same final state. Returns `None` when not found or not owned.
    pub async fn set_completion(
        pool: &PgPool,
        id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = $3,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped to the owner
    ///
    /// Returns true if a row was removed; false when not found or not
    /// owned.
    pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
