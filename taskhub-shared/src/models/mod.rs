/// Database models for TaskHub
///
/// This module contains all database models and their query functions.
/// Models are plain data records; mutation goes through explicit functions
/// that take ids and field sets, not through live objects.
///
/// # Models
///
/// - `user`: User accounts
/// - `task`: Tasks with owner/assignee relationships and enum fields
/// - `tag`: Global tags and the task/tag join table

pub mod tag;
pub mod task;
pub mod user;
