//! Sorter Pool
//!
//! The working set of instances subject to validation and benchmarking.
//! Membership is explicit: registering an algorithm does not pool it, and the
//! same algorithm may be pooled several times as independent instances.
//! The pool owns its instances, so one instance can never be pooled twice.

use crate::error::{SetupError, panic_message};
use crate::sorter::{InstanceId, SorterInstance};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Ordered collection of pooled instances
#[derive(Debug, Default)]
pub struct Pool {
    entries: Vec<(InstanceId, SorterInstance)>,
    next_id: u64,
}

impl Pool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the instance's one-time setup and append it.
    ///
    /// On setup failure the instance is dropped and the pool is left unchanged.
    pub fn add(&mut self, mut instance: SorterInstance) -> Result<InstanceId, SetupError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| instance.setup()));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(panic_message(payload.as_ref()).into()),
        };

        if let Err(source) = result {
            return Err(SetupError {
                name: instance.name().to_string(),
                source,
            });
        }

        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, instance));
        Ok(id)
    }

    /// Remove an instance by identity; `None` if it is not pooled
    pub fn remove(&mut self, id: InstanceId) -> Option<SorterInstance> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Look up an instance
    pub fn get(&self, id: InstanceId) -> Option<&SorterInstance> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, instance)| instance)
    }

    /// Instances in pool order
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &SorterInstance)> {
        self.entries.iter().map(|(id, instance)| (*id, instance))
    }

    /// Mutable instances in pool order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (InstanceId, &mut SorterInstance)> {
        self.entries.iter_mut().map(|(id, instance)| (*id, instance))
    }

    /// Instances that passed validation, in pool order
    pub fn eligible_mut(&mut self) -> impl Iterator<Item = (InstanceId, &mut SorterInstance)> {
        self.iter_mut().filter(|(_, instance)| instance.tests_passed())
    }

    /// Number of pooled instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every instance
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
