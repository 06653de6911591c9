use crate::distance::nearest_centroid;
use crate::error::KMeansError;
use ndarray::{Array2, ArrayView2};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// Centroid initialization strategy.
///
/// A closed set of variants dispatched exhaustively; there is no runtime
/// fallback branch for an unrecognized strategy. Parsing a wire tag into a
/// variant is where an unknown name is rejected (see [`FromStr`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMethod {
    /// Uniformly sample k distinct data points without replacement
    #[default]
    Random,

    /// Greedy max-min selection: each new centroid is the point farthest
    /// from its nearest already-chosen centroid
    FarthestFirst,

    /// Sample each new centroid with probability proportional to squared
    /// distance to its nearest already-chosen centroid
    KMeansPlusPlus,

    /// Centroids are supplied externally via `KMeans::set_centroids`;
    /// computing them here is an error
    Manual,
}

impl InitMethod {
    /// Wire tag for this method, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::FarthestFirst => "farthest_first",
            InitMethod::KMeansPlusPlus => "kmeans++",
            InitMethod::Manual => "manual",
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitMethod::Random),
            "farthest_first" => Ok(InitMethod::FarthestFirst),
            "kmeans++" => Ok(InitMethod::KMeansPlusPlus),
            "manual" => Ok(InitMethod::Manual),
            other => Err(KMeansError::UnknownInitMethod(other.to_string())),
        }
    }
}

/// Produce an initial centroid set of exactly k rows drawn from the dataset.
///
/// Every returned centroid is a literal dataset row, never an interpolated
/// point. `Manual` cannot be computed here and returns an error.
///
/// # Errors
///
/// Returns an error if:
/// - `k` exceeds the number of data points
/// - the method is `Manual`
/// - the kmeans++ sampling distribution is degenerate (fewer than k distinct points)
pub fn initialize_centroids(
    data: &ArrayView2<f64>,
    method: InitMethod,
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Array2<f64>, KMeansError> {
    if method == InitMethod::Manual {
        return Err(KMeansError::ManualInit);
    }

    let n_samples = data.nrows();
    if n_samples < k {
        return Err(KMeansError::InsufficientData(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    match method {
        InitMethod::Random => Ok(random_init(data, k, rng)),
        InitMethod::FarthestFirst => Ok(farthest_first_init(data, k, rng)),
        InitMethod::KMeansPlusPlus => kmeans_plus_plus_init(data, k, rng),
        InitMethod::Manual => Err(KMeansError::ManualInit),
    }
}

/// Randomly select k distinct data points as centroids
fn random_init(data: &ArrayView2<f64>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f64> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let indices: Vec<usize> = (0..n_samples).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    let mut centroids = Array2::zeros((k, n_features));
    for (centroid_idx, &data_idx) in selected.iter().enumerate() {
        centroids.row_mut(centroid_idx).assign(&data.row(data_idx));
    }

    centroids
}

/// Greedy farthest-first traversal.
///
/// Deterministic given the first (random) pick; ties break to the first
/// occurrence in dataset order.
fn farthest_first_init(data: &ArrayView2<f64>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f64> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let mut centroids = Array2::zeros((k, n_features));
    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&data.row(first));

    for chosen in 1..k {
        let chosen_view = centroids.slice(ndarray::s![..chosen, ..]);

        let mut farthest_idx = 0;
        let mut farthest_dist = f64::NEG_INFINITY;
        for (idx, point) in data.outer_iter().enumerate() {
            let (_, dist) = nearest_centroid(&point, &chosen_view);
            if dist > farthest_dist {
                farthest_dist = dist;
                farthest_idx = idx;
            }
        }

        centroids.row_mut(chosen).assign(&data.row(farthest_idx));
    }

    centroids
}

/// kmeans++ seeding: sample each next centroid proportionally to squared
/// distance from its nearest already-chosen centroid.
fn kmeans_plus_plus_init(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Array2<f64>, KMeansError> {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let mut centroids = Array2::zeros((k, n_features));
    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&data.row(first));

    for chosen in 1..k {
        let chosen_view = centroids.slice(ndarray::s![..chosen, ..]);

        // Already-chosen points have weight 0 and are effectively never re-picked
        let weights: Vec<f64> = data
            .outer_iter()
            .map(|point| nearest_centroid(&point, &chosen_view).1)
            .collect();

        let dist =
            WeightedIndex::new(&weights).map_err(|_| KMeansError::DegenerateWeights)?;
        let selected = dist.sample(rng);

        centroids.row_mut(chosen).assign(&data.row(selected));
    }

    Ok(centroids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn contains_row(data: &ArrayView2<f64>, row: &ndarray::ArrayView1<f64>) -> bool {
        data.outer_iter().any(|r| r == *row)
    }

    #[test]
    fn test_init_method_from_str() {
        assert_eq!("random".parse::<InitMethod>().unwrap(), InitMethod::Random);
        assert_eq!(
            "farthest_first".parse::<InitMethod>().unwrap(),
            InitMethod::FarthestFirst
        );
        assert_eq!(
            "kmeans++".parse::<InitMethod>().unwrap(),
            InitMethod::KMeansPlusPlus
        );
        assert_eq!("manual".parse::<InitMethod>().unwrap(), InitMethod::Manual);

        let result = "voronoi".parse::<InitMethod>();
        assert!(matches!(result, Err(KMeansError::UnknownInitMethod(_))));
    }

    #[test]
    fn test_init_method_round_trip() {
        for method in [
            InitMethod::Random,
            InitMethod::FarthestFirst,
            InitMethod::KMeansPlusPlus,
            InitMethod::Manual,
        ] {
            assert_eq!(method.as_str().parse::<InitMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_random_init_selects_distinct_dataset_rows() {
        let data = array![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let centroids =
            initialize_centroids(&data.view(), InitMethod::Random, 3, &mut rng).unwrap();

        assert_eq!(centroids.nrows(), 3);
        assert_eq!(centroids.ncols(), 2);
        for row in centroids.outer_iter() {
            assert!(contains_row(&data.view(), &row));
        }
        // Sampling is without replacement, so all rows are distinct
        for i in 0..3 {
            for j in (i + 1)..3 {
                assert_ne!(centroids.row(i), centroids.row(j));
            }
        }
    }

    #[test]
    fn test_random_init_rejects_k_greater_than_n() {
        let data = array![[0.0, 0.0], [1.0, 0.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = initialize_centroids(&data.view(), InitMethod::Random, 3, &mut rng);
        assert!(matches!(result, Err(KMeansError::InsufficientData(_))));
    }

    #[test]
    fn test_farthest_first_is_deterministic_after_first_pick() {
        // With points at 0, 5, 10 on a line the traversal order is fixed by the
        // first pick: 0 -> 10 -> 5, 5 -> 0 (tie with 10 broken by dataset
        // order) -> 10, 10 -> 0 -> 5.
        let data = array![[0.0], [5.0], [10.0]];

        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let centroids =
                initialize_centroids(&data.view(), InitMethod::FarthestFirst, 3, &mut rng)
                    .unwrap();

            let sequence: Vec<f64> = centroids.column(0).to_vec();
            let expected: &[f64] = match sequence[0] as i64 {
                0 => &[0.0, 10.0, 5.0],
                5 => &[5.0, 0.0, 10.0],
                10 => &[10.0, 0.0, 5.0],
                other => panic!("first centroid {} is not a dataset row", other),
            };
            assert_eq!(sequence, expected, "seed {}", seed);
        }
    }

    #[test]
    fn test_farthest_first_returns_dataset_rows() {
        let data = array![[0.0, 0.0], [3.0, 1.0], [7.0, 2.0], [1.0, 9.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let centroids =
            initialize_centroids(&data.view(), InitMethod::FarthestFirst, 3, &mut rng).unwrap();

        for row in centroids.outer_iter() {
            assert!(contains_row(&data.view(), &row));
        }
    }

    #[test]
    fn test_kmeans_plus_plus_returns_dataset_rows() {
        let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0], [5.0, 5.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        let centroids =
            initialize_centroids(&data.view(), InitMethod::KMeansPlusPlus, 3, &mut rng).unwrap();

        assert_eq!(centroids.nrows(), 3);
        for row in centroids.outer_iter() {
            assert!(contains_row(&data.view(), &row));
        }
    }

    #[test]
    fn test_kmeans_plus_plus_degenerate_dataset() {
        // Three identical points: after the first pick every weight is zero
        let data = array![[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = initialize_centroids(&data.view(), InitMethod::KMeansPlusPlus, 2, &mut rng);
        assert!(matches!(result, Err(KMeansError::DegenerateWeights)));
    }

    #[test]
    fn test_manual_cannot_be_computed() {
        let data = array![[0.0, 0.0], [1.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = initialize_centroids(&data.view(), InitMethod::Manual, 2, &mut rng);
        assert!(matches!(result, Err(KMeansError::ManualInit)));
    }
}
