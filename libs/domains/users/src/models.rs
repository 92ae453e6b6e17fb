use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Shortest password accepted by a password change.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest password accepted by a password change.
pub const MAX_PASSWORD_LEN: usize = 16;

/// User entity - matches the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier, never changes after creation
    pub id: i64,
    /// Login name (not guaranteed unique)
    pub name: String,
    /// Password, stored verbatim
    pub passwd: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, passwd: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            passwd: passwd.into(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_passwd(&mut self, passwd: impl Into<String>) {
        self.passwd = passwd.into();
    }
}

/// A user that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewUser {
    pub name: String,
    pub passwd: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, passwd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passwd: passwd.into(),
        }
    }
}

/// Query string for `GET /users`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    pub user_id: i64,
}

/// Query string for `POST /users/login`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    pub name: String,
    pub passwd: String,
}

/// Query string for `POST /users/passwd`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChangePasswordQuery {
    pub user_id: i64,
    pub passwd: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_keep_id() {
        let mut user = User::new(1, "John", "password");

        user.set_name("Mike");
        user.set_passwd("newPassword");

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Mike");
        assert_eq!(user.passwd, "newPassword");
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::new(7, "alice", "s3cretpass");
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "id": 7, "name": "alice", "passwd": "s3cretpass" })
        );
    }
}
