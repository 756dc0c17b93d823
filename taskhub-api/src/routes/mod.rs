/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Account endpoints (signup, login)
/// - `tasks`: Task CRUD, assignment, filtering and sorting
/// - `tags`: Tag creation, linking and removal

pub mod health;
pub mod tags;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Serialize};

/// Simple message body used by mutation endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable result
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
