use std::cmp::Ordering;

use num_complex::Complex64;

/// Compare two reals, placing NaN after every number and treating
/// `-0.0 == 0.0`.
fn cmp_real(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Indices that put `freq` in non-decreasing order of real part.
///
/// The sort is stable: modes with equal real frequency keep their file order.
pub fn argsort_by_real(freq: &[Complex64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..freq.len()).collect();
    order.sort_by(|&a, &b| cmp_real(freq[a].re, freq[b].re));
    order
}

/// True when `freq` is already in non-decreasing order of real part.
pub fn is_sorted_by_real(freq: &[Complex64]) -> bool {
    freq.windows(2)
        .all(|w| cmp_real(w[0].re, w[1].re) != Ordering::Greater)
}

/// Gather `values` in the order given by `order`.
pub fn permute<T: Copy>(values: &[T], order: &[usize]) -> Vec<T> {
    order.iter().map(|&i| values[i]).collect()
}
