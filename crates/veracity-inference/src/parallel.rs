//! Index-parallel map used by every reduction in the crate.
//!
//! Work is split across output entries only. Each closure performs its own
//! inner sum sequentially, so the parallel and sequential paths produce
//! bit-identical results.

use rayon::prelude::*;

/// Evaluate `f(0..n)` in index order, on the rayon pool when `parallel`.
pub(crate) fn map_indices<T, F>(n: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if parallel {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}
