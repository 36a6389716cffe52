//! Correctness Validation
//!
//! Runs every pooled instance against a fixed battery of structural fixtures.
//! Only instances that pass all of them become eligible for timed benchmarks.
//!
//! Each instance receives its own copy of every fixture, and a panic inside
//! one instance's `sort` is recorded as a fixture failure for that instance
//! alone; the rest of the pool is still validated.

use crate::error::{catch_quietly, panic_message};
use crate::pool::Pool;
use crate::sorter::{InstanceId, ValidationState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Length of the ascending, descending and random fixtures
pub const FIXTURE_LEN: usize = 1000;

/// Exclusive upper bound of values in the random fixture (duplicate-heavy)
pub const RANDOM_FIXTURE_BOUND: i32 = 100;

/// Structural fixtures, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fixture {
    /// `0, 1, ..., 999`
    Ascending,
    /// `999, 998, ..., 0`
    Descending,
    /// 1000 values drawn from `0..=99`
    RandomSmallRange,
    /// `[0]`
    Singleton,
    /// `[]`
    Empty,
}

impl Fixture {
    /// The full battery in application order
    pub const ALL: [Fixture; 5] = [
        Fixture::Ascending,
        Fixture::Descending,
        Fixture::RandomSmallRange,
        Fixture::Singleton,
        Fixture::Empty,
    ];

    /// Build the fixture's input sequence
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<i32> {
        match self {
            Fixture::Ascending => (0..FIXTURE_LEN as i32).collect(),
            Fixture::Descending => (0..FIXTURE_LEN as i32).rev().collect(),
            Fixture::RandomSmallRange => (0..FIXTURE_LEN)
                .map(|_| rng.gen_range(0..RANDOM_FIXTURE_BOUND))
                .collect(),
            Fixture::Singleton => vec![0],
            Fixture::Empty => Vec::new(),
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Fixture::Ascending => "ascending",
            Fixture::Descending => "descending",
            Fixture::RandomSmallRange => "random-small-range",
            Fixture::Singleton => "singleton",
            Fixture::Empty => "empty",
        }
    }
}

/// Number of fixtures an instance must pass
pub const FIXTURE_COUNT: usize = Fixture::ALL.len();

/// Check that `output` has `expected_len` elements and is monotonic.
///
/// The first strict inequality between neighbours locks the direction
/// (ascending or descending); any later pair against that direction fails.
/// Equal neighbours are always allowed.
pub fn is_ordered(output: &[i32], expected_len: usize) -> bool {
    if output.len() != expected_len {
        return false;
    }

    let mut direction = None;
    for pair in output.windows(2) {
        let step = pair[0].cmp(&pair[1]);
        if step.is_eq() {
            continue;
        }
        match direction {
            None => direction = Some(step),
            Some(locked) if locked != step => return false,
            Some(_) => {}
        }
    }
    true
}

/// Result of one fixture for one instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum FixtureOutcome {
    /// Output had the right length and was ordered
    Passed,
    /// Output was the wrong length or not monotonic
    Unordered,
    /// `sort` panicked
    Panicked {
        /// Panic message
        message: String,
    },
}

impl FixtureOutcome {
    /// Whether the fixture counts towards the pass total
    pub fn is_success(&self) -> bool {
        matches!(self, FixtureOutcome::Passed)
    }
}

/// Validation outcome for one pooled instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceValidation {
    /// Pooled instance
    pub id: InstanceId,
    /// Algorithm name
    pub name: String,
    /// Per-fixture outcomes in battery order
    pub outcomes: Vec<(Fixture, FixtureOutcome)>,
    /// State after this pass
    pub state: ValidationState,
}

impl InstanceValidation {
    /// Fixtures passed in this pass, out of [`FIXTURE_COUNT`]
    pub fn fixtures_passed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Whether the instance is eligible for timing.
    ///
    /// Follows `state`, so an instance that passed an earlier battery stays
    /// passed even if `fixtures_passed` dropped in this one.
    pub fn passed(&self) -> bool {
        self.state.is_passed()
    }
}

/// Per-instance results of a validation pass, in pool order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One entry per pooled instance
    pub instances: Vec<InstanceValidation>,
}

impl ValidationReport {
    /// Look up the result for one instance
    pub fn get(&self, id: InstanceId) -> Option<&InstanceValidation> {
        self.instances.iter().find(|v| v.id == id)
    }

    /// Eligible and ineligible instance counts
    pub fn summary(&self) -> ValidationSummary {
        let passed = self.instances.iter().filter(|v| v.passed()).count();
        ValidationSummary {
            passed,
            failed: self.instances.len() - passed,
        }
    }
}

/// Pass/fail counts for a validation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Instances in the `Passed` state
    pub passed: usize,
    /// Instances not eligible for timing
    pub failed: usize,
}

/// Runs the correctness battery against a pool
#[derive(Debug, Clone, Default)]
pub struct Validator {
    seed: Option<u64>,
}

impl Validator {
    /// Validator with an entropy-seeded random fixture
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator whose random fixture is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Validate every pooled instance, updating its state.
    ///
    /// Fixtures are applied in battery order; within a fixture, instances are
    /// visited in pool order, each sorting a fresh copy.
    pub fn validate(&self, pool: &mut Pool) -> ValidationReport {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut outcomes: Vec<Vec<(Fixture, FixtureOutcome)>> =
            (0..pool.len()).map(|_| Vec::with_capacity(FIXTURE_COUNT)).collect();

        for fixture in Fixture::ALL {
            let input = fixture.generate(&mut rng);
            debug!(fixture = fixture.name(), len = input.len(), "applying fixture");

            for ((id, instance), slots) in pool.iter_mut().zip(outcomes.iter_mut()) {
                let copy = input.clone();
                let outcome = match catch_quietly(|| instance.sort(copy)) {
                    Ok(output) if is_ordered(&output, input.len()) => FixtureOutcome::Passed,
                    Ok(_) => {
                        debug!(instance = %id, name = instance.name(), fixture = fixture.name(), "output not ordered");
                        FixtureOutcome::Unordered
                    }
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        warn!(instance = %id, name = instance.name(), fixture = fixture.name(), %message, "sort panicked");
                        FixtureOutcome::Panicked { message }
                    }
                };
                slots.push((fixture, outcome));
            }
        }

        let instances = pool
            .iter_mut()
            .zip(outcomes)
            .map(|((id, instance), outcomes)| {
                let fixtures_passed = outcomes.iter().filter(|(_, o)| o.is_success()).count();
                instance.record_validation(fixtures_passed, FIXTURE_COUNT);
                info!(
                    instance = %id,
                    name = instance.name(),
                    passed = fixtures_passed,
                    total = FIXTURE_COUNT,
                    "validated"
                );
                InstanceValidation {
                    id,
                    name: instance.name().to_string(),
                    outcomes,
                    state: instance.state(),
                }
            })
            .collect();

        ValidationReport { instances }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorter::{Sorter, SorterInstance};

    struct StdSort;

    impl Sorter for StdSort {
        fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
            input.sort_unstable();
            input
        }
    }

    struct Identity;

    impl Sorter for Identity {
        fn sort(&mut self, input: Vec<i32>) -> Vec<i32> {
            input
        }
    }

    struct Truncating;

    impl Sorter for Truncating {
        fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
            input.sort_unstable();
            input.pop();
            input
        }
    }

    struct PanicsOnLarge;

    impl Sorter for PanicsOnLarge {
        fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
            if input.len() > 1 {
                panic!("too many elements");
            }
            input.sort_unstable();
            input
        }
    }

    /// Sorts, then scribbles over the buffer it was handed
    struct Scribbler;

    impl Sorter for Scribbler {
        fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
            input.sort_unstable();
            let sorted = input.clone();
            for value in input.iter_mut() {
                *value = -1;
            }
            sorted
        }
    }

    fn pool_of(sorters: Vec<(&str, Box<dyn Sorter>)>) -> (Pool, Vec<InstanceId>) {
        let mut pool = Pool::new();
        let ids = sorters
            .into_iter()
            .map(|(name, sorter)| pool.add(SorterInstance::new(name, sorter)).unwrap())
            .collect();
        (pool, ids)
    }

    #[test]
    fn test_is_ordered_basic() {
        assert!(is_ordered(&[], 0));
        assert!(is_ordered(&[7], 1));
        assert!(is_ordered(&[1, 2, 2, 3], 4));
        assert!(is_ordered(&[3, 2, 2, 1], 4));
        assert!(!is_ordered(&[1, 3, 2], 3));
        assert!(!is_ordered(&[3, 1, 2], 3));
    }

    #[test]
    fn test_is_ordered_length_mismatch() {
        assert!(!is_ordered(&[1, 2, 3], 4));
        assert!(!is_ordered(&[], 1));
    }

    #[test]
    fn test_is_ordered_equal_elements() {
        assert!(is_ordered(&[5, 5, 5, 5], 4));
        // Equal pairs after a locked direction are fine
        assert!(is_ordered(&[1, 2, 2, 2, 3], 5));
        assert!(is_ordered(&[9, 9, 4, 4, 1], 5));
    }

    #[test]
    fn test_is_ordered_single_inversion_after_lock() {
        assert!(!is_ordered(&[1, 2, 3, 4, 3, 5], 6));
        assert!(!is_ordered(&[5, 4, 4, 5], 4));
    }

    #[test]
    fn test_fixture_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let asc = Fixture::Ascending.generate(&mut rng);
        assert_eq!(asc.len(), FIXTURE_LEN);
        assert_eq!(asc[0], 0);
        assert_eq!(asc[FIXTURE_LEN - 1], 999);

        let desc = Fixture::Descending.generate(&mut rng);
        assert_eq!(desc.first(), Some(&999));
        assert_eq!(desc.last(), Some(&0));

        let random = Fixture::RandomSmallRange.generate(&mut rng);
        assert_eq!(random.len(), FIXTURE_LEN);
        assert!(random.iter().all(|v| (0..RANDOM_FIXTURE_BOUND).contains(v)));

        assert_eq!(Fixture::Singleton.generate(&mut rng), vec![0]);
        assert!(Fixture::Empty.generate(&mut rng).is_empty());
    }

    #[test]
    fn test_correct_sort_passes_all() {
        let (mut pool, ids) = pool_of(vec![("Std", Box::new(StdSort))]);
        let report = Validator::with_seed(7).validate(&mut pool);

        let result = report.get(ids[0]).unwrap();
        assert_eq!(result.fixtures_passed(), FIXTURE_COUNT);
        assert_eq!(result.state, ValidationState::Passed);
        assert!(pool.get(ids[0]).unwrap().tests_passed());
    }

    #[test]
    fn test_identity_sort_is_rejected() {
        let (mut pool, ids) = pool_of(vec![("Identity", Box::new(Identity))]);
        let report = Validator::with_seed(7).validate(&mut pool);

        let result = report.get(ids[0]).unwrap();
        assert!(result.fixtures_passed() < FIXTURE_COUNT);
        // A descending sequence is monotonic, so only the random fixture fails
        assert_eq!(result.fixtures_passed(), FIXTURE_COUNT - 1);
        let random = result
            .outcomes
            .iter()
            .find(|(f, _)| *f == Fixture::RandomSmallRange)
            .unwrap();
        assert_eq!(random.1, FixtureOutcome::Unordered);
        assert!(!pool.get(ids[0]).unwrap().tests_passed());
    }

    #[test]
    fn test_length_mismatch_fails_fixture() {
        let (mut pool, ids) = pool_of(vec![("Truncating", Box::new(Truncating))]);
        let report = Validator::with_seed(7).validate(&mut pool);

        let result = report.get(ids[0]).unwrap();
        // Only the empty fixture survives a dropped element
        assert_eq!(result.fixtures_passed(), 1);
        assert_eq!(result.state, ValidationState::Failed { fixtures_passed: 1 });
    }

    #[test]
    fn test_panics_are_isolated_per_instance() {
        let (mut pool, ids) = pool_of(vec![
            ("Panics", Box::new(PanicsOnLarge)),
            ("Std", Box::new(StdSort)),
        ]);
        let report = Validator::with_seed(7).validate(&mut pool);

        let panicky = report.get(ids[0]).unwrap();
        assert_eq!(panicky.fixtures_passed(), 2); // singleton + empty
        assert!(matches!(
            panicky.outcomes[0].1,
            FixtureOutcome::Panicked { ref message } if message == "too many elements"
        ));

        assert!(report.get(ids[1]).unwrap().passed());
        assert_eq!(report.summary(), ValidationSummary { passed: 1, failed: 1 });
    }

    #[test]
    fn test_mutation_does_not_leak_between_instances() {
        let (mut pool, ids) = pool_of(vec![
            ("Scribbler", Box::new(Scribbler)),
            ("Std", Box::new(StdSort)),
            ("Scribbler", Box::new(Scribbler)),
        ]);
        let report = Validator::with_seed(3).validate(&mut pool);

        for id in ids {
            assert!(report.get(id).unwrap().passed());
        }
    }

    /// Sorts correctly for its first `budget` calls, then returns input untouched
    struct Wearing {
        budget: usize,
    }

    impl Sorter for Wearing {
        fn sort(&mut self, mut input: Vec<i32>) -> Vec<i32> {
            if self.budget > 0 {
                self.budget -= 1;
                input.sort_unstable();
            }
            input
        }
    }

    #[test]
    fn test_report_follows_state_after_regression() {
        let (mut pool, ids) = pool_of(vec![(
            "Wearing",
            Box::new(Wearing {
                budget: FIXTURE_COUNT,
            }),
        )]);
        let validator = Validator::with_seed(4);
        assert!(validator.validate(&mut pool).get(ids[0]).unwrap().passed());

        let report = validator.validate(&mut pool);
        let result = report.get(ids[0]).unwrap();

        assert_eq!(result.fixtures_passed(), FIXTURE_COUNT - 1);
        assert_eq!(result.state, ValidationState::Passed);
        assert!(result.passed());
        assert_eq!(report.summary(), ValidationSummary { passed: 1, failed: 0 });
        assert!(pool.get(ids[0]).unwrap().tests_passed());
    }

    #[test]
    fn test_revalidation_keeps_passed() {
        let (mut pool, ids) = pool_of(vec![("Std", Box::new(StdSort))]);
        let validator = Validator::with_seed(11);
        validator.validate(&mut pool);
        let report = validator.validate(&mut pool);

        assert_eq!(report.get(ids[0]).unwrap().state, ValidationState::Passed);
    }
}
