//! Authentication primitives: login credentials and the acting caller.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port.

use zeroize::Zeroizing;

use super::UserId;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty; whitespace is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The authenticated principal on whose behalf an action runs.
///
/// Handlers build a `Caller` from the session and pass it explicitly to
/// every shop action; nothing reads the current user from ambient state.
///
/// # Examples
/// ```
/// use shops::domain::{Caller, UserId};
///
/// let user_id = UserId::random();
/// let caller = Caller::new(user_id.clone());
/// assert_eq!(caller.user_id(), &user_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    user_id: UserId,
}

impl Caller {
    /// Wrap an authenticated user id.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Identifier of the acting user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
