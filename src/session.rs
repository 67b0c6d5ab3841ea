//! Explicit session context.
//!
//! A [`Session`] exists only between a successful sign-in and sign-out (or a
//! 401, which tears the credential down inside the backend). Everything that
//! needs the current user receives it from here; there is no ambient auth
//! state.

use crate::{api::Backend, error::ApiError, models::User};

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
}

impl Session {
    /// Authenticate, then fetch the account the token belongs to.
    pub async fn sign_in(
        backend: &dyn Backend,
        email: &str,
        password: &str,
    ) -> Result<Self, ApiError> {
        backend.login(email, password).await?;
        let user = backend.current_user().await?;
        tracing::info!(user = %user.email, role = ?user.role, "signed in");
        Ok(Self { user })
    }

    /// Re-fetch the current user mid-session. On a 401 the backend has
    /// already dropped the credential; the caller returns to sign-in.
    pub async fn refresh(&mut self, backend: &dyn Backend) -> Result<(), ApiError> {
        self.user = backend.current_user().await?;
        Ok(())
    }

    pub fn sign_out(self, backend: &dyn Backend) {
        tracing::info!(user = %self.user.email, "signed out");
        backend.sign_out();
    }
}

/// Operator-facing message for a failed sign-in. A 401 here means bad
/// credentials, not an expired session, so the generic wording is replaced.
pub fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "invalid email or password".to_owned(),
        ApiError::Forbidden => "access denied, contact an administrator".to_owned(),
        other => other.to_string(),
    }
}
