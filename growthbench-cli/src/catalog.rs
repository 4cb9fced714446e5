//! Built-in Candidate Catalog
//!
//! Reference algorithms spanning every complexity domain, used by the CLI to
//! demonstrate and sanity-check the estimator. Inputs are random and rebuilt
//! on every invocation, so input construction is part of what is measured.
//!
//! Candidates whose cost explodes (Fibonacci, permutations, quadratic
//! duplicate search) carry their own size series; running them at the
//! default sizes would never finish.

use growthbench_core::{AlgorithmCandidate, PerformanceRating};
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

/// A catalog entry
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Candidate name
    pub name: &'static str,
    /// Domain the candidate is expected to land in
    pub expected: PerformanceRating,
    /// Preferred size series, or `None` for the configured sizes
    pub sizes: Option<&'static [usize]>,
    build: fn(&'static str) -> AlgorithmCandidate,
}

impl CatalogEntry {
    /// Create the measurable candidate
    pub fn candidate(&self) -> AlgorithmCandidate {
        (self.build)(self.name)
    }
}

const FIBONACCI_SIZES: &[usize] = &[1, 2, 5, 10, 15];
const PERMUTATION_SIZES: &[usize] = &[1, 2, 5, 7];
const DUPLICATE_SIZES: &[usize] = &[
    1, 2, 5, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 150, 200,
];

/// Every built-in candidate, ordered from cheapest to most expensive
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "constant_add",
        expected: PerformanceRating::Excellent,
        sizes: None,
        build: |name| AlgorithmCandidate::from_fn(name, |size, _| size.wrapping_add(1)),
    },
    CatalogEntry {
        name: "constant_multiply",
        expected: PerformanceRating::Excellent,
        sizes: None,
        build: |name| {
            AlgorithmCandidate::from_fn(name, |size, _| size.wrapping_add(size.wrapping_mul(567)))
        },
    },
    CatalogEntry {
        name: "binary_search",
        expected: PerformanceRating::Good,
        sizes: None,
        build: |name| AlgorithmCandidate::from_fn(name, |size, _| binary_search(size)),
    },
    CatalogEntry {
        name: "linear_sum",
        expected: PerformanceRating::Fair,
        sizes: None,
        build: |name| AlgorithmCandidate::from_fn(name, |size, _| random_values(size).iter().sum::<f64>()),
    },
    CatalogEntry {
        name: "merge_sort",
        expected: PerformanceRating::Bad,
        sizes: None,
        build: |name| {
            AlgorithmCandidate::from_fn(name, |size, _| count_inversions(&mut random_values(size)))
        },
    },
    CatalogEntry {
        name: "quick_sort",
        expected: PerformanceRating::Bad,
        sizes: None,
        build: |name| {
            AlgorithmCandidate::from_fn(name, |size, _| {
                let mut values = random_values(size);
                quick_sort(&mut values);
                values
            })
        },
    },
    CatalogEntry {
        name: "bubble_sort",
        expected: PerformanceRating::Disastrous,
        sizes: None,
        build: |name| {
            AlgorithmCandidate::from_fn(name, |size, _| {
                let mut values = random_values(size);
                bubble_sort(&mut values);
                values
            })
        },
    },
    CatalogEntry {
        name: "find_duplicates",
        expected: PerformanceRating::Disastrous,
        sizes: Some(DUPLICATE_SIZES),
        build: |name| AlgorithmCandidate::from_fn(name, |size, _| find_duplicates(size)),
    },
    CatalogEntry {
        name: "fibonacci",
        expected: PerformanceRating::Atrocious,
        sizes: Some(FIBONACCI_SIZES),
        build: |name| AlgorithmCandidate::from_fn(name, |size, _| fibonacci(size as u64)),
    },
    CatalogEntry {
        name: "permutations",
        expected: PerformanceRating::Abysmal,
        sizes: Some(PERMUTATION_SIZES),
        build: |name| {
            AlgorithmCandidate::from_fn(name, |size, _| permutations(&random_values(size)).len())
        },
    },
];

/// Catalog entries whose name matches `filter`, in catalog order
pub fn select(filter: &Regex) -> Vec<&'static CatalogEntry> {
    CATALOG.iter().filter(|e| filter.is_match(e.name)).collect()
}

fn random_values(size: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(0.0..1.0)).collect()
}

fn binary_search(size: usize) -> Option<usize> {
    let haystack: Vec<usize> = (0..size).collect();
    let needle = rand::thread_rng().gen_range(0..=size);
    haystack.binary_search(&needle).ok()
}

/// Merge sort counting inversions
fn count_inversions(values: &mut [f64]) -> usize {
    let len = values.len();
    if len <= 1 {
        return 0;
    }

    let mid = len / 2;
    let mut inversions = count_inversions(&mut values[..mid]) + count_inversions(&mut values[mid..]);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        if values[i] <= values[j] {
            merged.push(values[i]);
            i += 1;
        } else {
            merged.push(values[j]);
            inversions += mid - i;
            j += 1;
        }
    }
    merged.extend_from_slice(&values[i..mid]);
    merged.extend_from_slice(&values[j..]);
    values.copy_from_slice(&merged);

    inversions
}

/// Lomuto-partition quick sort
fn quick_sort(values: &mut [f64]) {
    if values.len() <= 1 {
        return;
    }

    let pivot_index = values.len() - 1;
    let pivot = values[pivot_index];
    let mut store = 0;
    for j in 0..pivot_index {
        if values[j] < pivot {
            values.swap(store, j);
            store += 1;
        }
    }
    values.swap(store, pivot_index);

    let (left, right) = values.split_at_mut(store);
    quick_sort(left);
    quick_sort(&mut right[1..]);
}

fn bubble_sort(values: &mut [f64]) {
    let len = values.len();
    for _ in 0..len {
        for j in 0..len.saturating_sub(1) {
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
            }
        }
    }
}

/// Quadratic duplicate search over a shuffled, doubled list of strings
fn find_duplicates(size: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut haystack: Vec<String> = (0..size)
        .map(|_| rng.gen_range(0.0..1.0f64).to_string())
        .collect();
    haystack.shuffle(&mut rng);
    haystack.extend_from_within(..);

    let mut duplicates: Vec<String> = Vec::new();
    for i in 0..haystack.len() {
        for j in (i + 1)..haystack.len() {
            if haystack[i] == haystack[j] && !duplicates.contains(&haystack[i]) {
                duplicates.push(haystack[i].clone());
            }
        }
    }
    duplicates
}

fn fibonacci(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

fn permutations(values: &[f64]) -> Vec<Vec<f64>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }

    let mut result = Vec::new();
    let mut rest = values.to_vec();
    for i in 0..values.len() {
        let first = rest.remove(i);
        for mut perm in permutations(&rest) {
            perm.insert(0, first);
            result.push(perm);
        }
        rest.insert(i, first);
    }
    result
}
