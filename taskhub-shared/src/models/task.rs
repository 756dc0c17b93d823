/// Task model and database operations
///
/// Tasks are the core entity of TaskHub. Every task has an owner (the user
/// who created it) and optionally an assignee the task is delegated to.
/// A task is visible to a caller iff the caller is its owner or its
/// assignee; queries here bake that predicate in rather than filtering in
/// application code.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT,
///     due_date TIMESTAMPTZ NOT NULL,
///     priority SMALLINT NOT NULL DEFAULT 1,
///     status TEXT NOT NULL DEFAULT 'To-do',
///     user_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
///     assignee BIGINT REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task priority
///
/// Wire representation is the integer value (1, 2 or 3), matching the
/// SMALLINT column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Converts priority to its stored integer value
    pub fn as_i16(&self) -> i16 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Parses a wire/storage value; returns None for anything outside 1..=3
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            _ => None,
        }
    }
}

/// Task status
///
/// Wire and storage representation is the display string ("To-do",
/// "In Progress", "Complete").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To-do")]
    Todo,

    #[serde(rename = "In Progress")]
    InProgress,

    #[serde(rename = "Complete")]
    Complete,
}

impl Status {
    /// Converts status to its stored string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "To-do",
            Status::InProgress => "In Progress",
            Status::Complete => "Complete",
        }
    }

    /// Parses a wire/storage value; returns None for unknown statuses
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "To-do" => Some(Status::Todo),
            "In Progress" => Some(Status::InProgress),
            "Complete" => Some(Status::Complete),
            _ => None,
        }
    }
}

/// Sortable task fields
///
/// Restricted to the whitelist accepted on the wire ("dueDate",
/// "priority"); anything else must be rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DueDate,
    Priority,
}

impl SortField {
    /// Column name used in ORDER BY clauses
    pub fn column(&self) -> &'static str {
        match self {
            SortField::DueDate => "due_date",
            SortField::Priority => "priority",
        }
    }

    /// Parses the wire value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dueDate" => Some(SortField::DueDate),
            "priority" => Some(SortField::Priority),
            _ => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for ORDER BY clauses
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Parses the wire value ("ASC" or "DESC")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Task model representing a single task row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Task title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// Priority (1 = low, 2 = medium, 3 = high)
    pub priority: i16,

    /// Status ("To-do", "In Progress", "Complete")
    pub status: String,

    /// Owner (user who created the task; null if the owner was deleted)
    pub user_id: Option<i64>,

    /// Assignee (null if unassigned or the assignee was deleted)
    pub assignee: Option<i64>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task row joined with the owner's and assignee's email addresses
///
/// This is the shape API responses are built from; the emails come from
/// LEFT JOINs so a deleted owner or missing assignee yields None.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithUsers {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: i16,
    pub status: String,
    pub user_id: Option<i64>,
    pub assignee: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Owner's email (from users join)
    pub owner_email: Option<String>,

    /// Assignee's email (from users join)
    pub assignee_email: Option<String>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Due date
    pub due_date: DateTime<Utc>,

    /// Priority (validated at the boundary)
    pub priority: Priority,

    /// Status (validated at the boundary)
    pub status: Status,

    /// Owner of the task
    pub user_id: i64,
}

/// Input for updating a task
///
/// All fields are optional. Only provided fields are written;
/// `updated_at` is always stamped.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskFields {
    /// New title
    pub title: Option<String>,

    /// New description (use Some(None) to clear)
    pub description: Option<Option<String>>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New priority
    pub priority: Option<Priority>,

    /// New status
    pub status: Option<Status>,
}

impl UpdateTaskFields {
    /// True if no field is set (the update would only stamp `updated_at`)
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

const TASK_COLUMNS: &str = "id, title, description, due_date, priority, status, \
     user_id, assignee, created_at, updated_at";

const TASK_WITH_USERS_SELECT: &str = "\
    SELECT t.id, t.title, t.description, t.due_date, t.priority, t.status, \
           t.user_id, t.assignee, t.created_at, t.updated_at, \
           o.email AS owner_email, a.email AS assignee_email \
    FROM tasks t \
    LEFT JOIN users o ON o.id = t.user_id \
    LEFT JOIN users a ON a.id = t.assignee";

impl Task {
    /// Creates a new task owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, due_date, priority, status, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.priority.as_i16())
        .bind(data.status.as_str())
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID if it is visible to `user_id`
    ///
    /// The visibility predicate (owner OR assignee) is part of the query:
    /// a row that exists but belongs to someone else is indistinguishable
    /// from a row that does not exist.
    pub async fn find_visible(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<TaskWithUsers>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskWithUsers>(&format!(
            "{TASK_WITH_USERS_SELECT} WHERE t.id = $1 AND (t.user_id = $2 OR t.assignee = $2)"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Checks whether a task row exists at all, ignoring visibility
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(exists)
    }

    /// Lists every task visible to `user_id` (owned or assigned)
    pub async fn list_visible(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithUsers>(&format!(
            "{TASK_WITH_USERS_SELECT} WHERE t.user_id = $1 OR t.assignee = $1 ORDER BY t.id"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks owned by `user_id` with the given status
    ///
    /// Owner-only view: assigned-but-not-owned tasks are excluded, unlike
    /// `find_visible`/`list_visible`.
    pub async fn list_owned_by_status(
        pool: &PgPool,
        user_id: i64,
        status: Status,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithUsers>(&format!(
            "{TASK_WITH_USERS_SELECT} WHERE t.user_id = $1 AND t.status = $2 ORDER BY t.id"
        ))
        .bind(user_id)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks owned by `user_id`, sorted by a whitelisted field
    ///
    /// `field` and `order` are typed enums, so interpolating them into the
    /// ORDER BY clause cannot inject arbitrary SQL.
    pub async fn list_owned_sorted(
        pool: &PgPool,
        user_id: i64,
        field: SortField,
        order: SortOrder,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithUsers>(&format!(
            "{TASK_WITH_USERS_SELECT} WHERE t.user_id = $1 ORDER BY t.{} {}",
            field.column(),
            order.as_sql(),
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks owned by `user_id` with the given status, sorted
    pub async fn list_owned_filtered_sorted(
        pool: &PgPool,
        user_id: i64,
        status: Status,
        field: SortField,
        order: SortOrder,
    ) -> Result<Vec<TaskWithUsers>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithUsers>(&format!(
            "{TASK_WITH_USERS_SELECT} WHERE t.user_id = $1 AND t.status = $2 ORDER BY t.{} {}",
            field.column(),
            order.as_sql(),
        ))
        .bind(user_id)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates the provided fields on a task and stamps `updated_at`
    ///
    /// Returns the updated row, or None if the task does not exist.
    pub async fn update_fields(
        pool: &PgPool,
        id: i64,
        data: UpdateTaskFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority.as_i16());
        }
        if let Some(status) = data.status {
            q = q.bind(status.as_str());
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Sets the assignee on a task and stamps `updated_at`
    pub async fn set_assignee(
        pool: &PgPool,
        id: i64,
        assignee: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET assignee = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(assignee)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Join rows in task_tags go with it via ON DELETE CASCADE.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_wire_values() {
        assert_eq!(Priority::Low.as_i16(), 1);
        assert_eq!(Priority::Medium.as_i16(), 2);
        assert_eq!(Priority::High.as_i16(), 3);

        assert_eq!(Priority::from_i16(1), Some(Priority::Low));
        assert_eq!(Priority::from_i16(2), Some(Priority::Medium));
        assert_eq!(Priority::from_i16(3), Some(Priority::High));
        assert_eq!(Priority::from_i16(0), None);
        assert_eq!(Priority::from_i16(4), None);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [Status::Todo, Status::InProgress, Status::Complete] {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("Done"), None);
        assert_eq!(Status::parse("to-do"), None);
    }

    #[test]
    fn test_status_serde_rename() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: Status = serde_json::from_str("\"To-do\"").unwrap();
        assert_eq!(parsed, Status::Todo);
    }

    #[test]
    fn test_sort_field_whitelist() {
        assert_eq!(SortField::parse("dueDate"), Some(SortField::DueDate));
        assert_eq!(SortField::parse("priority"), Some(SortField::Priority));
        assert_eq!(SortField::parse("title"), None);
        assert_eq!(SortField::parse("due_date"), None);

        assert_eq!(SortField::DueDate.column(), "due_date");
        assert_eq!(SortField::Priority.column(), "priority");
    }

    #[test]
    fn test_sort_order_whitelist() {
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("asc"), None);
        assert_eq!(SortOrder::parse("descending"), None);
    }

    #[test]
    fn test_update_fields_is_empty() {
        assert!(UpdateTaskFields::default().is_empty());

        let update = UpdateTaskFields {
            status: Some(Status::Complete),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
