#![allow(non_snake_case)]

// Row-parallel kernels for the sparse x dense products.  These only
// compute; writing into the caller's dense result happens serially in
// products.rs so the dense type never needs to be shared mutably.

use crate::algebra::*;
use crate::settings::SparseSettings;
use lazy_static::lazy_static;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

lazy_static! {
    // pools built for a given thread count, kept for the process lifetime
    static ref POOLS: Mutex<HashMap<usize, Arc<ThreadPool>>> = Mutex::new(HashMap::new());
}

// Shared pool with `threads` workers, built on first use.  None if the
// pool cannot be built.
pub(crate) fn thread_pool(threads: usize) -> Option<Arc<ThreadPool>> {
    let mut pools = POOLS.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(pool) = pools.get(&threads) {
        return Some(Arc::clone(pool));
    }
    let pool = Arc::new(ThreadPoolBuilder::new().num_threads(threads).build().ok()?);
    pools.insert(threads, Arc::clone(&pool));
    Some(pool)
}

/// Runs `f` on a pool of `max_threads` workers when set, otherwise on
/// the global rayon pool.
pub(crate) fn with_thread_pool<R, F>(settings: &SparseSettings, f: F) -> R
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    if settings.max_threads == 0 {
        return f();
    }
    match thread_pool(settings.max_threads as usize) {
        Some(pool) => pool.install(f),
        // fall back to the global pool rather than failing the product
        None => f(),
    }
}

// Non-transposed storage: each stored row produces one output row,
// owned by exactly one task.
pub(crate) fn par_rows_dense<T, X>(A: &SparseMatrix<T>, x: &X) -> Vec<(usize, Vec<T>)>
where
    T: FloatT,
    X: DenseMatrix<T> + Sync,
{
    let rows: Vec<(&usize, &SparseRow<T>)> = A.data.iter().collect();
    let ncols = x.ncols();

    rows.par_iter()
        .map(|&(&r, row)| {
            let vals = (0..ncols)
                .map(|k| {
                    row.iter()
                        .fold(T::zero(), |acc, (&c, &v)| acc + v * x.get(c, k))
                })
                .collect();
            (r, vals)
        })
        .collect()
}

// Transposed storage: stored row r is logical column r and scatters
// into arbitrary output rows.  Each task gathers its contributions
// locally and takes the lock once to apply them.
pub(crate) fn par_scatter_dense<T, X>(A: &SparseMatrix<T>, x: &X) -> Vec<Vec<T>>
where
    T: FloatT,
    X: DenseMatrix<T> + Sync,
{
    let rows: Vec<(&usize, &SparseRow<T>)> = A.data.iter().collect();

    (0..x.ncols())
        .map(|k| {
            let column = Mutex::new(vec![T::zero(); A.m]);
            rows.par_iter().for_each(|&(&r, row)| {
                let xr = x.get(r, k);
                if xr == T::zero() {
                    return;
                }
                let contrib: Vec<(usize, T)> = row
                    .iter()
                    .map(|(&c, &v)| (c, v * xr))
                    .filter(|&(_, val)| val != T::zero())
                    .collect();
                let mut column = column.lock().unwrap_or_else(|e| e.into_inner());
                for (c, val) in contrib {
                    column[c] += val;
                }
            });
            column.into_inner().unwrap_or_else(|e| e.into_inner())
        })
        .collect()
}

pub(crate) fn par_rows_vec<T: FloatT>(A: &SparseMatrix<T>, x: &[T]) -> Vec<(usize, T)> {
    let rows: Vec<(&usize, &SparseRow<T>)> = A.data.iter().collect();

    rows.par_iter()
        .map(|&(&r, row)| {
            let s = row
                .iter()
                .fold(T::zero(), |acc, (&c, &v)| acc + v * x[c]);
            (r, s)
        })
        .collect()
}

pub(crate) fn par_scatter_vec<T: FloatT>(A: &SparseMatrix<T>, x: &[T]) -> Vec<T> {
    let rows: Vec<(&usize, &SparseRow<T>)> = A.data.iter().collect();
    let y = Mutex::new(vec![T::zero(); A.m]);

    rows.par_iter().for_each(|&(&r, row)| {
        let xr = x[r];
        if xr == T::zero() {
            return;
        }
        let contrib: Vec<(usize, T)> = row.iter().map(|(&c, &v)| (c, v * xr)).collect();
        let mut y = y.lock().unwrap_or_else(|e| e.into_inner());
        for (c, val) in contrib {
            y[c] += val;
        }
    });

    y.into_inner().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn test_thread_pool_reused() {
    let settings = crate::settings::SparseSettingsBuilder::default()
        .max_threads(2)
        .build()
        .unwrap();

    let first = thread_pool(2).unwrap();
    let second = thread_pool(2).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.current_num_threads(), 2);

    let workers = with_thread_pool(&settings, rayon::current_num_threads);
    assert_eq!(workers, 2);
}
