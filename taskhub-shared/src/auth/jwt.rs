/// JWT token generation and validation
///
/// Bearer tokens are signed with HS256 (HMAC-SHA256) and carry the
/// authenticated user's id plus the standard issued-at and expiry
/// timestamps. Tokens expire after one hour.
///
/// # Example
///
/// ```
/// use taskhub_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let claims = Claims::new(42);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.id, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Token lifetime
const TOKEN_TTL_HOURS: i64 = 1;

/// JWT claims structure
///
/// - `id`: authenticated user id
/// - `iat`: issued at (Unix timestamp)
/// - `exp`: expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user ID
    pub id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with the default one-hour expiry
    pub fn new(user_id: i64) -> Self {
        Self::with_expiration(user_id, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Creates claims with a custom expiration duration
    pub fn with_expiration(user_id: i64, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: user_id,
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed JWT from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT and extracts its claims
///
/// Verifies the signature and expiry.
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens, otherwise
/// `JwtError::ValidationError` with the underlying cause.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new(7);
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.id, 7);
        assert_eq!(validated.iat, claims.iat);
        assert_eq!(validated.exp, claims.exp);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(7);
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "another-secret-key-of-enough-length");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration(7, Duration::seconds(-120));
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = validate_token("not-a-token", SECRET);
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_claims_expiry_window() {
        let claims = Claims::new(1);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 3600);

        let stale = Claims::with_expiration(1, Duration::seconds(-1));
        assert!(stale.is_expired());
    }
}
