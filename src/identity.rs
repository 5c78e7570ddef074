/*!
 * Identity capability.
 *
 * Authentication itself lives outside this crate; the core only needs a
 * stable opaque user identifier. Operations that touch the store refuse to
 * proceed when no identity is present.
 */

use crate::errors::AppError;

/// Source of the current user's opaque identifier
pub trait Identity: Send + Sync {
    /// The signed-in user's id, or None when nobody is signed in
    fn current_user_id(&self) -> Option<String>;
}

/// Identity backed by a fixed profile name, used by the CLI
#[derive(Debug, Clone)]
pub struct ProfileIdentity {
    user_id: String,
}

impl ProfileIdentity {
    /// Create an identity for the given profile name
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl Identity for ProfileIdentity {
    fn current_user_id(&self) -> Option<String> {
        if self.user_id.trim().is_empty() {
            None
        } else {
            Some(self.user_id.clone())
        }
    }
}

/// Identity with nobody signed in, used to exercise refusal paths in tests
#[derive(Debug, Clone, Default)]
pub struct AnonymousIdentity;

impl Identity for AnonymousIdentity {
    fn current_user_id(&self) -> Option<String> {
        None
    }
}

/// Resolve the current user id or refuse with `NotAuthenticated`
pub fn require_user(identity: &dyn Identity) -> Result<String, AppError> {
    identity.current_user_id().ok_or(AppError::NotAuthenticated)
}
