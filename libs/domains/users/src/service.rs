use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, User};
use crate::repository::UserRepository;

/// Service layer for account rules: lookup, login and password changes
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Check a name/password pair.
    ///
    /// Fails when the name is unknown or shared by several users, or when the
    /// stored password differs from `passwd` in any byte.
    pub async fn login(&self, name: &str, passwd: &str) -> UserResult<()> {
        let user = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if user.passwd != passwd {
            return Err(UserError::InvalidCredentials);
        }

        tracing::debug!(user_id = user.id, "Login succeeded");
        Ok(())
    }

    /// Replace a user's password.
    ///
    /// The length check runs before any store access.
    pub async fn change_password(&self, id: i64, passwd: &str) -> UserResult<()> {
        validate_password(passwd)?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.set_passwd(passwd);
        self.repository.save(user).await?;

        tracing::info!(user_id = id, "Password changed");
        Ok(())
    }
}

/// Length is measured in UTF-16 code units, so a non-BMP character counts twice.
fn validate_password(passwd: &str) -> UserResult<()> {
    let len = passwd.encode_utf16().count();

    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(UserError::Validation(format!(
            "Password must be between {} and {} characters",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }

    Ok(())
}
