//! HTTP client factory and the reqwest-backed [`QuizzifyBackend`].
//!
//! No retries and no timeouts are applied here; a failed call surfaces as an
//! error to whoever issued it.

use async_trait::async_trait;
use quizzify_core::backend::{
    ApplyTestRequest, AuthHeaders, LoginRequest, LoginResponse, QuizzifyBackend, RegisterRequest,
};
use quizzify_core::config::ClientConfig;
use quizzify_core::quiz::model::deserialize_null_default;
use quizzify_core::quiz::{NewTest, Test, TestResult};
use quizzify_core::session::{Account, UserProfile};
use quizzify_core::{QuizzifyError, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::response::{decode_json, decode_list_payload, decode_payload, decode_raw, http_error};

const USER_AGENT: &str = concat!("quizzify/", env!("CARGO_PKG_VERSION"));

/// Builds a client bound to `host` using the default `http` scheme.
///
/// `host` may also be a full base URL (`https://quiz.example.com/gateway`).
pub fn create_client(host: &str) -> Result<ApiClient> {
    ApiClient::new(host, "http")
}

/// Client for one Quizzify backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    accounts: Vec<Account>,
}

impl ApiClient {
    pub fn new(host: &str, scheme: &str) -> Result<Self> {
        let base_url = base_url(host, scheme)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| QuizzifyError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.backend_host, &config.scheme)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, endpoint: &Endpoint, headers: &AuthHeaders) -> Result<RequestBuilder> {
        let url = endpoint.url(&self.base_url)?;
        let mut request = self.client.request(endpoint.method(), url);
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }
        Ok(request)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, endpoint: &Endpoint, request: RequestBuilder) -> Result<String> {
        tracing::debug!(endpoint = endpoint.name(), method = %endpoint.method(), "sending request");

        let response = request.send().await.map_err(|e| {
            tracing::debug!(endpoint = endpoint.name(), error = %e, "request failed");
            if e.is_builder() {
                QuizzifyError::internal(format!("Failed to build {} request: {}", endpoint.name(), e))
            } else {
                QuizzifyError::transport(format!("{} request failed: {}", endpoint.name(), e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuizzifyError::transport(format!("Failed to read {} response: {}", endpoint.name(), e)))?;

        if !status.is_success() {
            tracing::debug!(endpoint = endpoint.name(), status = status.as_u16(), "backend returned error status");
            return Err(http_error(status.as_u16(), status.canonical_reason(), &body));
        }

        Ok(body)
    }

    async fn call(&self, endpoint: Endpoint, headers: &AuthHeaders) -> Result<String> {
        let request = self.request(&endpoint, headers)?;
        self.send(&endpoint, request).await
    }

    async fn call_with_body<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        headers: &AuthHeaders,
        body: &B,
    ) -> Result<String> {
        let request = self.request(&endpoint, headers)?.json(body);
        self.send(&endpoint, request).await
    }
}

/// Normalizes a configured host into a base URL without trailing slash.
pub fn base_url(host: &str, scheme: &str) -> Result<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(QuizzifyError::config("backend host is empty"));
    }
    if host.contains("://") {
        Ok(host.to_string())
    } else {
        Ok(format!("{}://{}", scheme, host))
    }
}

#[async_trait]
impl QuizzifyBackend for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let body = self
            .call_with_body(Endpoint::Login, &AuthHeaders::none(), request)
            .await?;
        decode_json(&body)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Value> {
        let body = self
            .call_with_body(Endpoint::Register, &AuthHeaders::none(), request)
            .await?;
        Ok(decode_raw(&body))
    }

    async fn fetch_account(&self, token: &str, headers: &AuthHeaders) -> Result<UserProfile> {
        let endpoint = Endpoint::Account {
            token: token.to_string(),
        };
        let body = self.call(endpoint, headers).await?;
        decode_json(&body)
    }

    async fn list_accounts(&self, headers: &AuthHeaders) -> Result<Vec<Account>> {
        let body = self.call(Endpoint::Accounts, headers).await?;
        let response: AccountsResponse = decode_json(&body)?;
        Ok(response.accounts)
    }

    async fn delete_account(&self, id: i64, headers: &AuthHeaders) -> Result<Value> {
        let body = self.call(Endpoint::DeleteAccount { id }, headers).await?;
        Ok(decode_raw(&body))
    }

    async fn list_tests(&self, with_answers: bool) -> Result<Vec<Test>> {
        let body = self
            .call(Endpoint::ListTests { with_answers }, &AuthHeaders::none())
            .await?;
        decode_list_payload(&body)
    }

    async fn get_test(&self, id: &str, headers: &AuthHeaders) -> Result<Test> {
        let body = self
            .call(Endpoint::GetTest { id: id.to_string() }, headers)
            .await?;
        decode_payload(&body)
    }

    async fn delete_test(&self, id: &str, headers: &AuthHeaders) -> Result<Value> {
        let body = self
            .call(Endpoint::DeleteTest { id: id.to_string() }, headers)
            .await?;
        Ok(decode_raw(&body))
    }

    async fn create_test(&self, test: &NewTest, headers: &AuthHeaders) -> Result<Value> {
        let body = self
            .call_with_body(Endpoint::CreateTest, headers, test)
            .await?;
        Ok(decode_raw(&body))
    }

    async fn apply_test(
        &self,
        id: &str,
        request: &ApplyTestRequest,
        headers: &AuthHeaders,
    ) -> Result<Value> {
        let body = self
            .call_with_body(Endpoint::ApplyTest { id: id.to_string() }, headers, request)
            .await?;
        Ok(decode_raw(&body))
    }

    async fn list_results(&self) -> Result<Vec<TestResult>> {
        let body = self
            .call(Endpoint::ListResults, &AuthHeaders::none())
            .await?;
        decode_list_payload(&body)
    }
}
