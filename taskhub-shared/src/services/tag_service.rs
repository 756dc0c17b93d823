/// Tag service
///
/// Creates and looks up tags, links and unlinks them from tasks, and
/// removes tags together with their links. Tags are global, so none of
/// these operations take a caller identity; task-level authorization
/// happens in the task service before tag labels are handed over.

use sqlx::PgPool;

use crate::models::tag::{Tag, TaskTag};
use crate::models::task::Task;
use crate::services::error::{ServiceError, ServiceResult};

/// Service for tag operations
#[derive(Clone)]
pub struct TagService {
    db: PgPool,
}

impl TagService {
    /// Creates a tag service over an injected pool
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a tag with the given label
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the label already exists.
    pub async fn create_tag(&self, label: &str) -> ServiceResult<Tag> {
        Tag::create(&self.db, label)
            .await
            .map_err(|e| ServiceError::db("Error creating tag", e))
    }

    /// Lists every tag
    pub async fn get_tags(&self) -> ServiceResult<Vec<Tag>> {
        Tag::list(&self.db)
            .await
            .map_err(|e| ServiceError::db("Error listing tags", e))
    }

    /// Attaches a tag to a task by label, creating the tag if needed
    ///
    /// Find-or-create runs as a single atomic upsert, and the join insert
    /// is idempotent, so repeating this call with the same label never
    /// duplicates a tag row or a link row.
    pub async fn add_tag_to_task(&self, task_id: i64, label: &str) -> ServiceResult<TaskTag> {
        let tag = Tag::find_or_create(&self.db, label)
            .await
            .map_err(|e| ServiceError::db("Error adding tag to task", e))?;

        TaskTag::create(&self.db, task_id, tag.id)
            .await
            .map_err(|e| ServiceError::db("Error adding tag to task", e))
    }

    /// Removes a tag from a task
    ///
    /// Returns the number of join rows removed (0 if the pair was not
    /// linked).
    pub async fn remove_tag_from_task(&self, task_id: i64, tag_id: i64) -> ServiceResult<u64> {
        TaskTag::delete(&self.db, task_id, tag_id)
            .await
            .map_err(|e| ServiceError::db("Error removing tag from task", e))
    }

    /// Returns the labels attached to a task
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the task does not exist at
    /// all. Caller visibility is not checked here.
    pub async fn get_task_tags(&self, task_id: i64) -> ServiceResult<Vec<String>> {
        let exists = Task::exists(&self.db, task_id)
            .await
            .map_err(|e| ServiceError::db("Error getting tags for task", e))?;

        if !exists {
            return Err(ServiceError::NotFound(format!(
                "no task with id {task_id} found"
            )));
        }

        TaskTag::labels_for_task(&self.db, task_id)
            .await
            .map_err(|e| ServiceError::db("Error getting tags for task", e))
    }

    /// Deletes a tag and every link to it, atomically
    ///
    /// Returns the number of links removed alongside the tag.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the tag does not exist; in
    /// that case nothing was deleted.
    pub async fn remove_tag(&self, id: i64) -> ServiceResult<u64> {
        Tag::delete_with_links(&self.db, id)
            .await
            .map_err(|e| ServiceError::db("Error deleting tag", e))?
            .ok_or_else(|| ServiceError::NotFound(format!("no tag with id {id} found")))
    }
}

// Database-backed tests for this service are in tests/service_tests.rs.
