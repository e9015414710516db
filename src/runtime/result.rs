//! Run outcomes.

use std::fmt;

use crate::description::Description;
use crate::failure::Failure;

/// A failure attributed to the test that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub description: Description,
    pub failure: Failure,
}

impl FailureReport {
    pub fn new(description: Description, failure: Failure) -> Self {
        Self {
            description,
            failure,
        }
    }

    pub fn test_name(&self) -> &str {
        self.description.display_name()
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description, self.failure)
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    /// Tests started, whether they passed or failed.
    pub run_count: usize,
    /// Tests reported as ignored.
    pub ignore_count: usize,
    /// Every failure, in the order reported.
    pub failures: Vec<FailureReport>,
}

impl RunResult {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn was_successful(&self) -> bool {
        self.failures.is_empty()
    }
}
