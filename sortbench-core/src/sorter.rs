//! Sorter capability and pooled instances

use crate::error::BoxError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sorting algorithm under test.
///
/// Implementations may keep state between calls (scratch buffers, counters).
/// `sort` receives an owned copy of the input and returns the sorted sequence;
/// it is free to reuse the input allocation or produce a new one.
pub trait Sorter: Send {
    /// One-time setup run when the instance enters the pool
    fn setup(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Sort `input` and return the result
    fn sort(&mut self, input: Vec<i32>) -> Vec<i32>;
}

/// Identity of a pooled instance, unique within its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub(crate) u64);

impl InstanceId {
    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for InstanceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Correctness state of an instance.
///
/// `Passed` is terminal: once an instance has passed the battery it stays eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ValidationState {
    /// Not yet run against the correctness battery
    Unvalidated,
    /// Passed every fixture
    Passed,
    /// Failed at least one fixture
    Failed {
        /// Fixtures passed out of the battery
        fixtures_passed: usize,
    },
}

impl ValidationState {
    /// Whether the instance is eligible for timed benchmarks
    pub fn is_passed(self) -> bool {
        matches!(self, ValidationState::Passed)
    }
}

/// A named, independently stateful algorithm instance
pub struct SorterInstance {
    name: String,
    sorter: Box<dyn Sorter>,
    state: ValidationState,
}

impl SorterInstance {
    /// Wrap a sorter under `name`
    pub fn new(name: impl Into<String>, sorter: Box<dyn Sorter>) -> Self {
        Self {
            name: name.into(),
            sorter,
            state: ValidationState::Unvalidated,
        }
    }

    /// Algorithm name (from its descriptor)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current validation state
    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Whether the full correctness battery has been passed
    pub fn tests_passed(&self) -> bool {
        self.state.is_passed()
    }

    /// Record the outcome of a validation pass.
    ///
    /// An instance that already passed keeps `Passed` regardless of `fixtures_passed`.
    pub(crate) fn record_validation(&mut self, fixtures_passed: usize, fixture_count: usize) {
        if self.state.is_passed() {
            return;
        }
        self.state = if fixtures_passed == fixture_count {
            ValidationState::Passed
        } else {
            ValidationState::Failed { fixtures_passed }
        };
    }

    pub(crate) fn setup(&mut self) -> Result<(), BoxError> {
        self.sorter.setup()
    }

    /// Sort an owned copy of the input
    pub fn sort(&mut self, input: Vec<i32>) -> Vec<i32> {
        self.sorter.sort(input)
    }
}

impl fmt::Debug for SorterInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SorterInstance")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
