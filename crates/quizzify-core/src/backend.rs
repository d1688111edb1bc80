//! Backend port.
//!
//! Defines the REST surface the state modules consume. The HTTP
//! implementation lives in `quizzify-interaction`; tests substitute their own.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::quiz::model::{NewTest, Test, TestResult, UserAnswer};
use crate::session::model::{Account, UserProfile};

/// Extra request headers derived from session state at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders(BTreeMap<String, String>);

impl AuthHeaders {
    /// No headers; used for anonymous calls or when no user is loaded.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
    pub app_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyTestRequest {
    pub user_answers: Vec<UserAnswer>,
}

/// REST calls against the Quizzify gateway.
///
/// Calls that return nothing the client models resolve with the raw JSON
/// body (`Value::Null` for an empty body). Implementations never retry.
#[async_trait]
pub trait QuizzifyBackend: Send + Sync {
    /// `POST /sso/login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `POST /sso/register`
    async fn register(&self, request: &RegisterRequest) -> Result<Value>;

    /// `GET /sso/account?token=`
    async fn fetch_account(&self, token: &str, headers: &AuthHeaders) -> Result<UserProfile>;

    /// `GET /sso/accounts`
    async fn list_accounts(&self, headers: &AuthHeaders) -> Result<Vec<Account>>;

    /// `DELETE /sso/account?id=`
    async fn delete_account(&self, id: i64, headers: &AuthHeaders) -> Result<Value>;

    /// `GET /api/tests?withAnswers=`
    async fn list_tests(&self, with_answers: bool) -> Result<Vec<Test>>;

    /// `GET /api/tests/{id}`
    async fn get_test(&self, id: &str, headers: &AuthHeaders) -> Result<Test>;

    /// `DELETE /api/tests/{id}`
    async fn delete_test(&self, id: &str, headers: &AuthHeaders) -> Result<Value>;

    /// `POST /api/tests`
    async fn create_test(&self, test: &NewTest, headers: &AuthHeaders) -> Result<Value>;

    /// `POST /api/tests/{id}/apply`
    async fn apply_test(
        &self,
        id: &str,
        request: &ApplyTestRequest,
        headers: &AuthHeaders,
    ) -> Result<Value>;

    /// `GET /api/tests/results`
    async fn list_results(&self) -> Result<Vec<TestResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_headers_builder() {
        let headers = AuthHeaders::none();
        assert!(headers.is_empty());

        let headers = headers.with("Authorization", "Bearer T1");
        assert_eq!(headers.get("Authorization"), Some("Bearer T1"));
        assert_eq!(headers.iter().count(), 1);
    }

    #[test]
    fn test_login_request_wire_shape() {
        let request = LoginRequest {
            login: "alice".to_string(),
            password: "pw1".to_string(),
            app_id: 1,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"login": "alice", "password": "pw1", "app_id": 1})
        );
    }
}
