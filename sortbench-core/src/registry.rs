//! Algorithm Registry
//!
//! Maps algorithm names to factories that build fresh [`Sorter`] instances.
//! Registration performs no correctness checks; that is the validator's job.

use crate::error::{BoxError, InstantiationError, panic_message};
use crate::sorter::{Sorter, SorterInstance};
use fxhash::FxHashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

type Factory = dyn Fn() -> Result<Box<dyn Sorter>, BoxError> + Send + Sync;

/// A named factory for one algorithm kind
#[derive(Clone)]
pub struct AlgorithmDescriptor {
    name: String,
    factory: Arc<Factory>,
}

impl AlgorithmDescriptor {
    /// Describe an algorithm built by a fallible factory
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Sorter>, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
        }
    }

    /// Describe an algorithm constructed with `Default`
    pub fn of<S>(name: impl Into<String>) -> Self
    where
        S: Sorter + Default + 'static,
    {
        Self::new(name, || Ok(Box::new(S::default()) as Box<dyn Sorter>))
    }

    /// Algorithm name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a fresh, unvalidated instance
    pub fn instantiate(&self) -> Result<SorterInstance, InstantiationError> {
        let built = catch_unwind(AssertUnwindSafe(|| (self.factory)()))
            .map_err(|payload| InstantiationError::Factory {
                name: self.name.clone(),
                source: panic_message(payload.as_ref()).into(),
            })?;

        let sorter = built.map_err(|source| InstantiationError::Factory {
            name: self.name.clone(),
            source,
        })?;

        Ok(SorterInstance::new(self.name.clone(), sorter))
    }
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Set of known algorithms, keyed by unique name
#[derive(Debug, Default, Clone)]
pub struct Registry {
    descriptors: FxHashMap<String, AlgorithmDescriptor>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, replacing any previous one with the same name
    pub fn register(&mut self, descriptor: AlgorithmDescriptor) {
        self.descriptors
            .insert(descriptor.name.clone(), descriptor);
    }

    /// Registered names, sorted for deterministic iteration
    pub fn list_registered(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Whether a descriptor exists under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Look up a descriptor
    pub fn get(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.descriptors.get(name)
    }

    /// Build a new instance of `name` without pooling it
    pub fn instantiate(&self, name: &str) -> Result<SorterInstance, InstantiationError> {
        self.descriptors
            .get(name)
            .ok_or_else(|| InstantiationError::UnknownAlgorithm(name.to_string()))?
            .instantiate()
    }

    /// Number of registered algorithms
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
