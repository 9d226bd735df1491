//! Neighbour selection by k-th order statistic.

/// Returns the k-th smallest value of `distances` (1-based `k`).
///
/// Partial selection via `select_nth_unstable_by` on a copy held in `buf`,
/// ordered with `f64::total_cmp` so NaN sorts after every number.
///
/// # Panics
///
/// Debug-asserts that `1 <= k <= distances.len()`.
pub(crate) fn kth_smallest(distances: &[f64], k: usize, buf: &mut Vec<f64>) -> f64 {
    debug_assert!(k >= 1);
    debug_assert!(k <= distances.len());

    buf.clear();
    buf.extend_from_slice(distances);
    let (_, kth, _) = buf.select_nth_unstable_by(k - 1, f64::total_cmp);
    *kth
}

/// Collects the index of every distance `<= threshold`.
///
/// Compared with `f64::total_cmp`, the order [`kth_smallest`] picks the
/// threshold in, so at least k indices are always kept. All points tied at
/// the threshold are kept, so the output can be longer than that k. Indices are written to `out`
/// ordered by ascending distance, then by position.
pub(crate) fn select_within(
    distances: &[f64],
    threshold: f64,
    pairs: &mut Vec<(f64, usize)>,
    out: &mut Vec<usize>,
) {
    pairs.clear();
    pairs.extend(
        distances
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, d)| d.total_cmp(&threshold).is_le())
            .map(|(i, d)| (d, i)),
    );
    pairs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    out.clear();
    out.extend(pairs.iter().map(|&(_, i)| i));
}
