/// Tag model, task/tag join table, and database operations
///
/// Tags are global: they belong to no user and are unique by label.
/// Tasks and tags are related many-to-many through `task_tags`; the join
/// table's composite primary key guarantees a (task, tag) pair is linked
/// at most once.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tags (
///     id BIGSERIAL PRIMARY KEY,
///     label TEXT NOT NULL UNIQUE
/// );
///
/// CREATE TABLE task_tags (
///     task_id BIGINT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     tag_id BIGINT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
///     PRIMARY KEY (task_id, tag_id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;

/// Tag model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID
    pub id: i64,

    /// Unique label
    pub label: String,
}

/// Join row linking a task to a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskTag {
    pub task_id: i64,
    pub tag_id: i64,
}

impl Tag {
    /// Creates a new tag
    ///
    /// # Errors
    ///
    /// Returns a unique-violation database error if the label already
    /// exists; callers map that to a conflict.
    pub async fn create(pool: &PgPool, label: &str) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (label) VALUES ($1) RETURNING id, label",
        )
        .bind(label)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Finds a tag by label, creating it if absent
    ///
    /// Implemented as a single upsert so two concurrent calls with the
    /// same new label cannot race each other into a unique violation:
    /// whichever INSERT loses falls into the DO UPDATE arm and still
    /// returns the winning row.
    pub async fn find_or_create(pool: &PgPool, label: &str) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (label)
            VALUES ($1)
            ON CONFLICT (label) DO UPDATE SET label = EXCLUDED.label
            RETURNING id, label
            "#,
        )
        .bind(label)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Lists all tags ordered by label
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, label FROM tags ORDER BY label")
            .fetch_all(pool)
            .await?;

        Ok(tags)
    }

    /// Deletes a tag together with all of its task links, atomically
    ///
    /// Both deletions run in one transaction: either the tag and every
    /// join row referencing it are gone, or nothing changed.
    ///
    /// Returns the number of links removed, or None if the tag did not
    /// exist.
    pub async fn delete_with_links(pool: &PgPool, id: i64) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let links = sqlx::query("DELETE FROM task_tags WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let tags = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if tags > 0 {
            Ok(Some(links))
        } else {
            Ok(None)
        }
    }
}

impl TaskTag {
    /// Links a tag to a task
    ///
    /// Idempotent: linking an already-linked pair is a no-op thanks to the
    /// composite primary key, and the existing link is returned.
    ///
    /// # Errors
    ///
    /// Returns a foreign-key database error if the task or tag row does
    /// not exist.
    pub async fn create(pool: &PgPool, task_id: i64, tag_id: i64) -> Result<Self, sqlx::Error> {
        let inserted = sqlx::query_as::<_, TaskTag>(
            r#"
            INSERT INTO task_tags (task_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT (task_id, tag_id) DO NOTHING
            RETURNING task_id, tag_id
            "#,
        )
        .bind(task_id)
        .bind(tag_id)
        .fetch_optional(pool)
        .await?;

        Ok(inserted.unwrap_or(TaskTag { task_id, tag_id }))
    }

    /// Removes a tag from a task
    ///
    /// Returns the number of join rows deleted (0 or 1).
    pub async fn delete(pool: &PgPool, task_id: i64, tag_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_tags WHERE task_id = $1 AND tag_id = $2")
            .bind(task_id)
            .bind(tag_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Returns the labels attached to a task, ordered by label
    pub async fn labels_for_task(pool: &PgPool, task_id: i64) -> Result<Vec<String>, sqlx::Error> {
        let labels: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT tg.label
            FROM task_tags tt
            JOIN tags tg ON tg.id = tt.tag_id
            WHERE tt.task_id = $1
            ORDER BY tg.label
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(labels.into_iter().map(|(label,)| label).collect())
    }

    /// Returns the labels for a batch of tasks, grouped by task id
    ///
    /// One query for the whole batch; tasks without tags simply have no
    /// entry in the returned map.
    pub async fn labels_for_tasks(
        pool: &PgPool,
        task_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
        if task_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, String)> = sqlx::query_as(
            r#"
            SELECT tt.task_id, tg.label
            FROM task_tags tt
            JOIN tags tg ON tg.id = tt.tag_id
            WHERE tt.task_id = ANY($1)
            ORDER BY tg.label
            "#,
        )
        .bind(task_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        for (task_id, label) in rows {
            grouped.entry(task_id).or_default().push(label);
        }

        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_serialization() {
        let tag = Tag {
            id: 7,
            label: "urgent".to_string(),
        };

        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#"{"id":7,"label":"urgent"}"#);
    }

    #[test]
    fn test_task_tag_equality() {
        let a = TaskTag { task_id: 1, tag_id: 2 };
        let b = TaskTag { task_id: 1, tag_id: 2 };
        assert_eq!(a, b);
    }

    // Integration tests for database operations are in tests/service_tests.rs
}
