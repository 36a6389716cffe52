//! Error types for the registry and pool boundary

use std::any::Any;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Once;
use thiserror::Error;

/// Boxed error returned by algorithm factories and setup hooks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Constructing an algorithm instance failed
#[derive(Debug, Error)]
pub enum InstantiationError {
    /// No descriptor registered under this name
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// The descriptor's factory returned an error or panicked
    #[error("factory for '{name}' failed: {source}")]
    Factory {
        /// Algorithm name
        name: String,
        /// Underlying failure
        #[source]
        source: BoxError,
    },
}

/// One-time per-instance setup failed; the instance was not pooled
#[derive(Debug, Error)]
#[error("setup failed for '{name}': {source}")]
pub struct SetupError {
    /// Algorithm name
    pub name: String,
    /// Underlying failure
    #[source]
    pub source: BoxError,
}

/// Failure while instantiating an algorithm straight into the pool
#[derive(Debug, Error)]
pub enum PoolError {
    /// Construction failed
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    /// Setup failed after construction
    #[error(transparent)]
    Setup(#[from] SetupError),
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// `catch_unwind` that keeps the panic hook silent for panics raised inside `f`.
///
/// The hook is wrapped once per process; panics on other threads, or outside
/// `f`, still reach the previously installed hook.
pub(crate) fn catch_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });

    let was_quiet = QUIET_PANICS.with(|quiet| quiet.replace(true));
    let result = catch_unwind(AssertUnwindSafe(f));
    QUIET_PANICS.with(|quiet| quiet.set(was_quiet));
    result
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
