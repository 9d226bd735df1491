//! Neighbour selection and vote arithmetic.

use knnmap_knn::{LabeledDataset, PNorm, classify};

/// Five points at distances 1..=5 from the origin along one axis.
fn ladder(labels: [&'static str; 5]) -> LabeledDataset<&'static str> {
    LabeledDataset::from_rows(
        [[0.0, 3.0], [-2.0, 0.0], [0.0, -1.0], [4.0, 0.0], [0.0, 5.0]],
        labels.to_vec(),
    )
    .unwrap()
}

/// Without ties, exactly k points vote and proportions sum to 1.
#[test]
fn no_ties_selects_k() {
    let ds = ladder(["a", "b", "c", "d", "e"]);
    let v = classify(&ds, &[0.0, 0.0], 2, PNorm::EUCLIDEAN).unwrap();
    assert_eq!(v.neighbours(), &[2, 1]);
    assert_eq!(v.proportion(&"c"), 0.5);
    assert_eq!(v.proportion(&"b"), 0.5);
    assert_eq!(v.total(), 1.0);
}

/// Distances {1, 2, 2, 2, 5}, k=2: all three tied points join the vote.
#[test]
fn boundary_ties_inflate_the_vote() {
    let ds = LabeledDataset::from_rows(
        [[1.0, 0.0], [2.0, 0.0], [0.0, 2.0], [-2.0, 0.0], [5.0, 0.0]],
        vec!["same", "same", "same", "same", "other"],
    )
    .unwrap();
    let v = classify(&ds, &[0.0, 0.0], 2, PNorm::EUCLIDEAN).unwrap();
    assert_eq!(v.n_selected(), 4);
    assert_eq!(v.proportion(&"same"), 2.0);
    assert_eq!(v.total(), 2.0);
    assert_eq!(v.winner(), Some(&"same"));
}

/// Inflation depends on the norm: ties under p=∞ need not be ties under p=2.
#[test]
fn ties_are_norm_specific() {
    // Chebyshev: both points at distance 1. Euclidean: 1 vs sqrt(2).
    let ds =
        LabeledDataset::from_rows([[1.0, 0.0], [1.0, 1.0]], vec!["edge", "corner"]).unwrap();
    let cheb = classify(&ds, &[0.0, 0.0], 1, PNorm::Infinity).unwrap();
    assert_eq!(cheb.n_selected(), 2);
    assert!(cheb.is_tied());
    assert_eq!(cheb.winner(), Some(&"corner"));

    let euc = classify(&ds, &[0.0, 0.0], 1, PNorm::EUCLIDEAN).unwrap();
    assert_eq!(euc.n_selected(), 1);
    assert_eq!(euc.winner(), Some(&"edge"));
}

/// k=1 picks the single nearest point.
#[test]
fn k_one() {
    let ds = ladder(["a", "b", "c", "d", "e"]);
    let v = classify(&ds, &[0.0, 0.0], 1, PNorm::TAXICAB).unwrap();
    assert_eq!(v.neighbours(), &[2]);
    assert_eq!(v.winner(), Some(&"c"));
    assert_eq!(v.proportion(&"c"), 1.0);
}

/// k=N selects the whole dataset.
#[test]
fn k_equals_n() {
    let ds = ladder(["a", "b", "a", "b", "a"]);
    let v = classify(&ds, &[0.0, 0.0], 5, PNorm::EUCLIDEAN).unwrap();
    assert_eq!(v.n_selected(), 5);
    assert_eq!(v.proportion(&"a"), 0.6);
    assert_eq!(v.proportion(&"b"), 0.4);
}

/// Even split: the lexicographically smallest label wins, deterministically.
#[test]
fn even_split_is_deterministic() {
    let ds = LabeledDataset::from_rows([[1.0], [-1.0]], vec!["zebra", "apple"]).unwrap();
    for _ in 0..10 {
        let v = classify(&ds, &[0.0], 2, PNorm::EUCLIDEAN).unwrap();
        assert_eq!(v.winner(), Some(&"apple"));
        assert_eq!(v.leaders(), vec![&"apple", &"zebra"]);
    }
}

/// All points identical to the query: everyone ties at zero.
#[test]
fn identical_points() {
    let labels = vec!["x", "y", "x", "y", "x", "x"];
    let ds = LabeledDataset::from_rows(vec![[2.0, 2.0]; 6], labels).unwrap();
    let v = classify(&ds, &[2.0, 2.0], 3, PNorm::from(3u32)).unwrap();
    assert_eq!(v.n_selected(), 6);
    assert_eq!(v.threshold(), 0.0);
    assert_eq!(v.proportion(&"x"), 4.0 / 3.0);
    assert_eq!(v.proportion(&"y"), 2.0 / 3.0);
}
