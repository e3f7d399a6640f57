//! Authentication ports.

use uuid::Uuid;

/// Claims carried by a credential token: the acting principal for the
/// remainder of an authenticated request.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
}

/// Token service trait: issues and validates signed, time-limited
/// credential tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token encoding `{user_id, username}` with a fixed expiry.
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError>;

    /// Validate signature and expiry, returning the decoded principal.
    /// This gate never retries; a failed validation is a final rejection.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime in seconds, used for cookie max-age.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service. Hashing is intentionally expensive and
/// CPU-bound; callers run it off the request event loop.
pub trait PasswordService: Send + Sync {
    /// Compute a salted one-way hash of a plaintext password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Missing credential token")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
