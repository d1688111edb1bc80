//! Resource state: cached tests, results and the current test.

use crate::quiz::model::{Test, TestResult};
use crate::versioned::Versioned;

/// State owned by the resource module.
///
/// All three slots are replace-only: a commit overwrites the previous value,
/// nothing is merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceState {
    tests: Versioned<Vec<Test>>,
    results: Versioned<Vec<TestResult>>,
    test: Versioned<Option<Test>>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tests(&self) -> &[Test] {
        self.tests.get()
    }

    pub fn results(&self) -> &[TestResult] {
        self.results.get()
    }

    /// The last fetched test, if any.
    pub fn test(&self) -> Option<&Test> {
        self.test.get().as_ref()
    }

    pub fn commit_tests(&mut self, version: u64, tests: Vec<Test>) -> bool {
        self.tests.commit(version, tests)
    }

    pub fn commit_results(&mut self, version: u64, results: Vec<TestResult>) -> bool {
        self.results.commit(version, results)
    }

    pub fn commit_test(&mut self, version: u64, test: Test) -> bool {
        self.test.commit(version, Some(test))
    }
}
