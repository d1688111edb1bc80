//! Session domain models: user profile, accounts and permission levels.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::quiz::model::{Test, deserialize_null_default};

/// Permission levels issued by the SSO service.
///
/// The numeric ids are shared with the backend and must stay in sync with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PermissionLevel {
    Creator = 1,
    Moderator = 2,
    Admin = 3,
}

impl PermissionLevel {
    /// Wire id of this level.
    pub fn id(self) -> i32 {
        self as i32
    }
}

/// Profile of the authenticated user as returned by `GET /sso/account`.
///
/// `userId` arrives as either a JSON string or number. Fields this client
/// does not model are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId", deserialize_with = "deserialize_loose_id")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub permissions: Vec<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(user_id: i64, permissions: Vec<i32>) -> Self {
        Self {
            user_id,
            permissions,
            extra: Map::new(),
        }
    }

    /// Identity sent to the backend in the custom auth header.
    ///
    /// `None` when the profile carries no usable id.
    pub fn auth_user_info(&self) -> Option<AuthUserInfo> {
        if self.user_id == 0 {
            return None;
        }
        Some(AuthUserInfo {
            id: self.user_id,
            permissions: self.permissions.clone(),
        })
    }

    /// Highest permission id held, 0 when none.
    pub fn max_permission(&self) -> i32 {
        self.permissions.iter().copied().max().unwrap_or(0)
    }

    pub fn has_permission(&self, level: PermissionLevel) -> bool {
        self.max_permission() >= level.id()
    }

    /// Owners and admins may open or delete a test.
    pub fn can_manage_test(&self, test: &Test) -> bool {
        test.user_id == self.user_id || self.has_permission(PermissionLevel::Admin)
    }
}

/// `{id, permissions}` pair serialized into the `Auth-User-Info` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUserInfo {
    pub id: i64,
    pub permissions: Vec<i32>,
}

/// An account as listed by `GET /sso/accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "deserialize_loose_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts an integer id encoded either as a JSON number or a numeric string.
pub fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Number(i64),
        Text(String),
    }

    match LooseId::deserialize(deserializer)? {
        LooseId::Number(id) => Ok(id),
        LooseId::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid id '{}': {}", text, e))),
    }
}
