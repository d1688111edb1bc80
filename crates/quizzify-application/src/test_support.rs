//! Hand-written port doubles shared by the module tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quizzify_core::backend::{
    ApplyTestRequest, AuthHeaders, LoginRequest, LoginResponse, QuizzifyBackend, RegisterRequest,
};
use quizzify_core::navigation::{Navigator, Route};
use quizzify_core::notification::{Notification, Notifier};
use quizzify_core::quiz::{NewTest, Test, TestResult};
use quizzify_core::session::{Account, UserProfile};
use quizzify_core::token_store::TokenStore;
use quizzify_core::{QuizzifyError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::oneshot;

/// One recorded backend call.
#[derive(Debug, Clone)]
pub struct Call {
    pub name: &'static str,
    pub headers: AuthHeaders,
    pub body: Value,
}

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<Value>,
}

/// Backend returning scripted JSON per call name, in call order.
#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<Call>>,
    scripts: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, name: &'static str, result: Result<Value>) {
        self.push(name, None, result);
    }

    /// Scripts a response that is held back until `gate` fires.
    pub fn respond_when(&self, name: &'static str, gate: oneshot::Receiver<()>, result: Result<Value>) {
        self.push(name, Some(gate), result);
    }

    fn push(&self, name: &'static str, gate: Option<oneshot::Receiver<()>>, result: Result<Value>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(name)
            .or_default()
            .push_back(Scripted { gate, result });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(|c| c.name).collect()
    }

    async fn call<T: DeserializeOwned>(
        &self,
        name: &'static str,
        headers: &AuthHeaders,
        body: Value,
    ) -> Result<T> {
        self.calls.lock().unwrap().push(Call {
            name,
            headers: headers.clone(),
            body,
        });

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(name)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| QuizzifyError::internal(format!("no scripted response for {}", name)))?;

        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        let value = scripted.result?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl QuizzifyBackend for MockBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.call("login", &AuthHeaders::none(), serde_json::to_value(request)?)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Value> {
        self.call("register", &AuthHeaders::none(), serde_json::to_value(request)?)
            .await
    }

    async fn fetch_account(&self, token: &str, headers: &AuthHeaders) -> Result<UserProfile> {
        self.call("fetch_account", headers, json!({ "token": token }))
            .await
    }

    async fn list_accounts(&self, headers: &AuthHeaders) -> Result<Vec<Account>> {
        self.call("list_accounts", headers, Value::Null).await
    }

    async fn delete_account(&self, id: i64, headers: &AuthHeaders) -> Result<Value> {
        self.call("delete_account", headers, json!({ "id": id })).await
    }

    async fn list_tests(&self, with_answers: bool) -> Result<Vec<Test>> {
        self.call(
            "list_tests",
            &AuthHeaders::none(),
            json!({ "with_answers": with_answers }),
        )
        .await
    }

    async fn get_test(&self, id: &str, headers: &AuthHeaders) -> Result<Test> {
        self.call("get_test", headers, json!({ "id": id })).await
    }

    async fn delete_test(&self, id: &str, headers: &AuthHeaders) -> Result<Value> {
        self.call("delete_test", headers, json!({ "id": id })).await
    }

    async fn create_test(&self, test: &NewTest, headers: &AuthHeaders) -> Result<Value> {
        self.call("create_test", headers, serde_json::to_value(test)?)
            .await
    }

    async fn apply_test(
        &self,
        id: &str,
        request: &ApplyTestRequest,
        headers: &AuthHeaders,
    ) -> Result<Value> {
        let mut body = serde_json::to_value(request)?;
        body["id"] = json!(id);
        self.call("apply_test", headers, body).await
    }

    async fn list_results(&self) -> Result<Vec<TestResult>> {
        self.call("list_results", &AuthHeaders::none(), Value::Null)
            .await
    }
}

/// Token store that counts reads and can be told to fail writes.
#[derive(Default)]
pub struct MockTokenStore {
    token: Mutex<Option<(String, DateTime<Utc>)>>,
    loads: Mutex<usize>,
    fail_writes: bool,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.lock().unwrap() = Some((token.to_string(), Utc::now() + chrono::Duration::days(1)));
        store
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<(String, DateTime<Utc>)> {
        self.token.lock().unwrap().clone()
    }

    pub fn loads(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

impl TokenStore for MockTokenStore {
    fn load(&self) -> Result<Option<String>> {
        *self.loads.lock().unwrap() += 1;
        Ok(self.token.lock().unwrap().as_ref().map(|(t, _)| t.clone()))
    }

    fn save(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        if self.fail_writes {
            return Err(QuizzifyError::storage("disk full"));
        }
        *self.token.lock().unwrap() = Some((token.to_string(), expires_at));
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.fail_writes {
            return Err(QuizzifyError::storage("disk full"));
        }
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// A minimal test summary as the backend would send it.
pub fn test_json(id: &str) -> Value {
    json!({ "id": id, "title": format!("Test {}", id), "user_id": 7 })
}
