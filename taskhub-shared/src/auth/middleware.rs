/// Authenticated-caller context for request handling
///
/// After the bearer token on a request is validated, the API layer
/// inserts an `AuthUser` into the request extensions; handlers extract it
/// with Axum's `Extension` extractor and pass the id down to the
/// services as the caller identity.

use serde::{Deserialize, Serialize};

use super::jwt::JwtError;

/// Authenticated caller, resolved from a validated bearer token
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthUser {
    /// Authenticated user ID
    pub id: i64,
}

impl AuthUser {
    /// Creates the caller context from validated JWT claims
    pub fn from_claims(user_id: i64) -> Self {
        Self { id: user_id }
    }
}

/// Error type for authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("No token provided")]
    MissingCredentials,

    /// Invalid authorization header format
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::InvalidToken(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_from_claims() {
        let auth = AuthUser::from_claims(42);
        assert_eq!(auth.id, 42);
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::MissingCredentials.to_string(), "No token provided");
    }
}
