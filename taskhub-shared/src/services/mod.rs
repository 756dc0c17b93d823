/// Business services for TaskHub
///
/// Services own the authorization-and-consistency rules layered over the
/// models: caller visibility on every task operation, cache coherence on
/// every mutation, and relational integrity for tag links. They hold
/// their dependencies (pool, cache) by injection; there is no process
/// global.
///
/// # Modules
///
/// - `error`: Service error taxonomy
/// - `task_service`: Authorization-scoped task CRUD with read-through caching
/// - `tag_service`: Tag creation, linking, and cascading removal

pub mod error;
pub mod tag_service;
pub mod task_service;

pub use error::{ServiceError, ServiceResult};
pub use tag_service::TagService;
pub use task_service::{task_cache_key, TaskService, TaskView, TASK_CACHE_TTL_SECS};
