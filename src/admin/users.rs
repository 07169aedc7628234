//! Admin user management.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::session::Session;

/// Role assigned to a Kast account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// One row of the admin user listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub role: Role,
}

/// Field updates for an existing user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(rename = "newUsername", skip_serializing_if = "Option::is_none")]
    pub new_username: Option<String>,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl Session {
    /// Fetch all user accounts.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let url = self.api.admin_users_url();
        self.api.get_json(&url).await
    }

    /// Create a new account.
    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> Result<()> {
        let url = self.api.admin_users_url();
        let body = json!({
            "username": username,
            "password": password,
            "role": role.as_str(),
        });
        self.api.post_json_unit(&url, &body).await
    }

    /// Update an existing account's username and/or password.
    pub async fn update_user(&self, username: &str, update: &UserUpdate) -> Result<()> {
        let url = self.api.admin_user_url(username);
        self.api.put_json(&url, &serde_json::to_value(update)?).await
    }

    /// Delete an account.
    pub async fn delete_user(&self, username: &str) -> Result<()> {
        let url = self.api.admin_user_url(username);
        self.api.delete(&url).await
    }
}

/// Case-insensitive substring filter over a fetched user list (the
/// dashboard search box).
pub fn filter_users<'a>(users: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    if query.is_empty() {
        return users.iter().collect();
    }
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| u.username.to_lowercase().contains(&needle))
        .collect()
}
