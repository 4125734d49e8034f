//! Batch diffing of independent snapshot pairs.
//!
//! Each pair gets its own memo, so pairs never interact. With the `parallel`
//! feature the batch runs on the rayon pool; results keep input order either
//! way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::algo::{DiffConfig, DiffResult, diff_with_config};

/// Diff every `(old, new)` pair with the same config.
pub fn diff_batch<A, B, T>(pairs: &[(A, B)], config: DiffConfig) -> Vec<DiffResult<T>>
where
    A: AsRef<[T]> + Sync,
    B: AsRef<[T]> + Sync,
    T: PartialEq + Clone + Send + Sync,
{
    #[cfg(feature = "parallel")]
    let iter = pairs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = pairs.iter();

    iter.map(|(old, new)| diff_with_config(old.as_ref(), new.as_ref(), config))
        .collect()
}
