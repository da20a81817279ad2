//! Engine errors.

use thiserror::Error;

/// Failures while setting up an enumeration run.
///
/// The search itself is infallible; only configuration and pool construction
/// can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The rayon worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Spawn policy thresholds are incoherent.
    #[error("invalid spawn policy: {0}")]
    InvalidPolicy(String),

    /// A thread count of zero was requested.
    #[error("thread count must be at least 1")]
    ZeroThreads,
}
