//! Resource state module: tests, results and the current test.

use std::sync::{Arc, PoisonError, RwLock};

use quizzify_core::Result;
use quizzify_core::backend::{ApplyTestRequest, QuizzifyBackend};
use quizzify_core::notification::{Notification, Notifier};
use quizzify_core::quiz::{NewTest, ResourceState, Test, TestResult, UserAnswer};
use quizzify_core::versioned::VersionCounter;
use serde_json::Value;

use crate::session::SharedSession;

pub const RESULT_SAVED: &str = "Result saved";
pub const RESULT_SAVE_FAILED: &str = "Failed to save result";
pub const TEST_CREATED: &str = "Test created successfully";
pub const TEST_CREATE_FAILED: &str = "Failed to create test";

#[derive(Default)]
struct Versions {
    tests: VersionCounter,
    results: VersionCounter,
    test: VersionCounter,
}

/// Caches fetched tests and results.
///
/// Authorized calls derive their headers from the shared session at the
/// moment they are issued. Nothing is updated optimistically: after a
/// mutating action, re-fetch what you display.
pub struct ResourceModule {
    state: RwLock<ResourceState>,
    versions: Versions,
    session: SharedSession,
    backend: Arc<dyn QuizzifyBackend>,
    notifier: Arc<dyn Notifier>,
}

impl ResourceModule {
    pub fn new(
        session: SharedSession,
        backend: Arc<dyn QuizzifyBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: RwLock::new(ResourceState::new()),
            versions: Versions::default(),
            session,
            backend,
            notifier,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&ResourceState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write<R>(&self, f: impl FnOnce(&mut ResourceState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    // ============================================================================
    // Getters
    // ============================================================================

    pub fn tests(&self) -> Vec<Test> {
        self.read(|state| state.tests().to_vec())
    }

    pub fn results(&self) -> Vec<TestResult> {
        self.read(|state| state.results().to_vec())
    }

    pub fn test(&self) -> Option<Test> {
        self.read(|state| state.test().cloned())
    }

    // ============================================================================
    // Actions
    // ============================================================================

    pub async fn get_tests(&self, with_answers: bool) -> Result<Vec<Test>> {
        let version = self.versions.tests.issue();
        let tests = self.backend.list_tests(with_answers).await?;

        if self.write(|state| state.commit_tests(version, tests.clone())) {
            tracing::debug!(version, count = tests.len(), with_answers, "committed tests");
        } else {
            tracing::warn!(version, "discarding stale tests response");
        }
        Ok(tests)
    }

    /// Fetches one test and makes it the current test.
    pub async fn get_test(&self, id: &str) -> Result<Test> {
        let version = self.versions.test.issue();
        let headers = self.session.auth_headers();
        let test = self.backend.get_test(id, &headers).await?;

        if self.write(|state| state.commit_test(version, test.clone())) {
            tracing::debug!(version, "committed current test");
        } else {
            tracing::warn!(version, "discarding stale test response");
        }
        Ok(test)
    }

    pub async fn delete_test(&self, id: &str) -> Result<Value> {
        let headers = self.session.auth_headers();
        self.backend.delete_test(id, &headers).await
    }

    pub async fn get_results(&self) -> Result<Vec<TestResult>> {
        let version = self.versions.results.issue();
        let results = self.backend.list_results().await?;

        if self.write(|state| state.commit_results(version, results.clone())) {
            tracing::debug!(version, count = results.len(), "committed results");
        } else {
            tracing::warn!(version, "discarding stale results response");
        }
        Ok(results)
    }

    /// Submits answers for `test_id`. The user is notified either way.
    pub async fn send_result(&self, test_id: &str, answers: Vec<UserAnswer>) -> Result<Value> {
        let headers = self.session.auth_headers();
        let request = ApplyTestRequest {
            user_answers: answers,
        };

        match self.backend.apply_test(test_id, &request, &headers).await {
            Ok(response) => {
                self.notifier.notify(Notification::success(RESULT_SAVED));
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to submit result");
                self.notifier.notify(Notification::error(RESULT_SAVE_FAILED));
                Err(e)
            }
        }
    }

    /// Creates a test authored by the current user.
    ///
    /// `creator_id` is overwritten with the current profile's id (cleared when
    /// no profile is loaded). The current test slot is not touched.
    pub async fn create_test(&self, mut test: NewTest) -> Result<Value> {
        test.creator_id = self
            .session
            .read(|state| state.user_profile().map(|profile| profile.user_id));
        let headers = self.session.auth_headers();

        match self.backend.create_test(&test, &headers).await {
            Ok(response) => {
                self.notifier.notify(Notification::success(TEST_CREATED));
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create test");
                self.notifier.notify(Notification::error(TEST_CREATE_FAILED));
                Err(e)
            }
        }
    }
}
