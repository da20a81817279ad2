//! Worker pool construction and scoped fork/join.
//!
//! Search tasks never share mutable state except through atomics: each forked
//! branch receives its payload by value, and the caller regains control only
//! after every branch has joined.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Builds the pool that runs one enumeration.
///
/// `None` uses rayon's default thread count (typically the number of cores).
pub fn build_pool(threads: Option<usize>) -> Result<ThreadPool, ThreadPoolBuildError> {
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("cycles-worker-{i}"));
    if let Some(threads) = threads {
        builder = builder.num_threads(threads);
    }
    builder.build()
}

/// Runs `task` once per branch as independent pool tasks and joins them all.
///
/// Each branch payload is moved into its own task. Results come back in branch
/// order. Must be called from inside a rayon pool (or it uses the global one).
pub fn fork_join<S, R, F>(branches: Vec<S>, task: F) -> Vec<R>
where
    S: Send,
    R: Send,
    F: Fn(S) -> R + Sync,
{
    let mut slots: Vec<Option<R>> = branches.iter().map(|_| None).collect();
    rayon::scope(|scope| {
        let task = &task;
        for (slot, branch) in slots.iter_mut().zip(branches) {
            scope.spawn(move |_| *slot = Some(task(branch)));
        }
    });
    slots.into_iter().flatten().collect()
}
