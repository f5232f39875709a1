/**
 * User and Auth Wire Types
 *
 * Identity records and the request/response bodies of the auth endpoints.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of roles the backend hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Profile photo URL; empty when the backend sends none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub photo: String,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Single upper-case letter shown when there is no photo
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /api/users/me` answers either with the user or with `{ "user": ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MeResponse {
    Wrapped { user: UserInfo },
    Bare(UserInfo),
}

impl From<MeResponse> for UserInfo {
    fn from(value: MeResponse) -> Self {
        match value {
            MeResponse::Wrapped { user } | MeResponse::Bare(user) => user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub photo: String,
}

/// Authentication response from server
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Body of `PATCH /api/admin/users/:id/role`
#[derive(Debug, Clone, Serialize)]
pub struct RoleChangeRequest {
    pub role: Role,
}
