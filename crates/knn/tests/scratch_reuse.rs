//! Scratch buffer reuse across queries and datasets.

use knnmap_knn::{
    KnnConfig, KnnScratch, LabeledDataset, PNorm, classify_with_config, classify_with_scratch,
};

fn grid_dataset(n: usize) -> LabeledDataset<u32> {
    let rows: Vec<[f64; 2]> = (0..n)
        .map(|i| [(i % 7) as f64 * 0.5, (i / 7) as f64 * 0.5])
        .collect();
    let labels = (0..n as u32).map(|i| i % 3).collect();
    LabeledDataset::from_rows(rows, labels).unwrap()
}

#[test]
fn scratch_results_match_fresh_allocations() {
    let ds = grid_dataset(49);
    let config = KnnConfig::new(4).with_norm(PNorm::Infinity);
    let mut scratch = KnnScratch::new(49);
    for ix in 0..10 {
        for iy in 0..10 {
            let q = [ix as f64 * 0.33, iy as f64 * 0.33];
            let fresh = classify_with_config(&ds, &q, &config).unwrap();
            let reused = classify_with_scratch(&ds, &q, &config, &mut scratch).unwrap();
            assert_eq!(fresh, reused);
        }
    }
}

#[test]
fn scratch_survives_dataset_size_changes() {
    let mut scratch = KnnScratch::new(5);
    let config = KnnConfig::new(3);

    let small = grid_dataset(10);
    let v = classify_with_scratch(&small, &[0.0, 0.0], &config, &mut scratch).unwrap();
    assert!(v.n_selected() >= 3);

    let large = grid_dataset(60);
    let v = classify_with_scratch(&large, &[1.0, 1.0], &config, &mut scratch).unwrap();
    assert!(v.n_selected() >= 3);
    assert!(v.neighbours().iter().all(|&i| i < 60));

    let v = classify_with_scratch(&small, &[3.0, 0.5], &config, &mut scratch).unwrap();
    assert!(v.neighbours().iter().all(|&i| i < 10));
}

#[test]
fn scratch_errors_leave_buffers_usable() {
    let ds = grid_dataset(20);
    let mut scratch = KnnScratch::default();
    assert!(classify_with_scratch(&ds, &[0.0], &KnnConfig::new(2), &mut scratch).is_err());
    assert!(classify_with_scratch(&ds, &[0.0, 0.0], &KnnConfig::new(2), &mut scratch).is_ok());
}
