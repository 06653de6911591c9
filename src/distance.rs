use ndarray::{ArrayView1, ArrayView2};

/// Squared Euclidean distance between two points
#[inline]
pub fn squared_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Find the nearest centroid for a single point.
///
/// Returns the centroid index and the squared distance to it. Ties resolve to
/// the lowest centroid index (first minimum encountered in row order).
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (idx, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_distance(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }

    (best_idx, best_dist)
}

/// Elementwise closeness test over two same-shaped centroid sets.
///
/// Uses the conventional allclose criterion: `|a - b| <= atol + rtol * |b|`
/// for every pair of coordinates. The caller is responsible for checking that
/// the shapes match first.
pub fn all_close(a: &ArrayView2<f64>, b: &ArrayView2<f64>, rtol: f64, atol: f64) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x - y).abs() <= atol + rtol * y.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_squared_distance() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![4.0, 6.0, 3.0];

        let dist = squared_distance(&a.view(), &b.view());
        assert_relative_eq!(dist, 9.0 + 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_squared_distance_zero() {
        let a = array![1.5, -2.5];
        let dist = squared_distance(&a.view(), &a.view());
        assert_relative_eq!(dist, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_centroid() {
        let centroids = array![[0.0, 0.0], [10.0, 10.0]];

        let p = array![1.0, 1.0];
        let (idx, dist) = nearest_centroid(&p.view(), &centroids.view());
        assert_eq!(idx, 0);
        assert_relative_eq!(dist, 2.0, epsilon = 1e-12);

        let q = array![9.0, 9.0];
        let (idx, _) = nearest_centroid(&q.view(), &centroids.view());
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_nearest_centroid_tie_takes_lowest_index() {
        // (0,0) is equidistant from both centroids
        let centroids = array![[0.0, 1.0], [0.0, -1.0]];
        let p = array![0.0, 0.0];

        let (idx, _) = nearest_centroid(&p.view(), &centroids.view());
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_all_close_within_tolerance() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0000001, 2.0], [3.0, 4.0]];

        assert!(all_close(&a.view(), &b.view(), 1e-5, 1e-8));
    }

    #[test]
    fn test_all_close_detects_shift() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.01, 2.0], [3.0, 4.0]];

        assert!(!all_close(&a.view(), &b.view(), 1e-5, 1e-8));
    }
}
