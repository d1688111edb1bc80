//! REST endpoints of the Quizzify gateway.

use quizzify_core::{QuizzifyError, Result};
use reqwest::{Method, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Account { token: String },
    Accounts,
    DeleteAccount { id: i64 },
    ListTests { with_answers: bool },
    GetTest { id: String },
    DeleteTest { id: String },
    CreateTest,
    ApplyTest { id: String },
    ListResults,
}

impl Endpoint {
    /// Short name for logs. Never includes ids or tokens.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Register => "register",
            Endpoint::Account { .. } => "fetch_account",
            Endpoint::Accounts => "list_accounts",
            Endpoint::DeleteAccount { .. } => "delete_account",
            Endpoint::ListTests { .. } => "list_tests",
            Endpoint::GetTest { .. } => "get_test",
            Endpoint::DeleteTest { .. } => "delete_test",
            Endpoint::CreateTest => "create_test",
            Endpoint::ApplyTest { .. } => "apply_test",
            Endpoint::ListResults => "list_results",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login | Endpoint::Register | Endpoint::CreateTest | Endpoint::ApplyTest { .. } => {
                Method::POST
            }
            Endpoint::DeleteAccount { .. } | Endpoint::DeleteTest { .. } => Method::DELETE,
            Endpoint::Account { .. }
            | Endpoint::Accounts
            | Endpoint::ListTests { .. }
            | Endpoint::GetTest { .. }
            | Endpoint::ListResults => Method::GET,
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Login => vec!["sso", "login"],
            Endpoint::Register => vec!["sso", "register"],
            Endpoint::Account { .. } | Endpoint::DeleteAccount { .. } => vec!["sso", "account"],
            Endpoint::Accounts => vec!["sso", "accounts"],
            Endpoint::ListTests { .. } | Endpoint::CreateTest => vec!["api", "tests"],
            Endpoint::GetTest { id } | Endpoint::DeleteTest { id } => vec!["api", "tests", id.as_str()],
            Endpoint::ApplyTest { id } => vec!["api", "tests", id.as_str(), "apply"],
            Endpoint::ListResults => vec!["api", "tests", "results"],
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Account { token } => vec![("token", token.clone())],
            Endpoint::DeleteAccount { id } => vec![("id", id.to_string())],
            Endpoint::ListTests { with_answers } => vec![("withAnswers", with_answers.to_string())],
            _ => Vec::new(),
        }
    }

    /// Full URL of this endpoint under `base_url`; path segments and query
    /// values are percent-encoded.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let mut url = Url::parse(base_url)
            .map_err(|e| QuizzifyError::config(format!("invalid backend url '{}': {}", base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| QuizzifyError::config(format!("backend url '{}' cannot be a base", base_url)))?
            .pop_if_empty()
            .extend(self.segments());

        let query = self.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}
