use crate::config::KMeansConfig;
use crate::distance::{all_close, nearest_centroid};
use crate::error::KMeansError;
use crate::init::initialize_centroids;
use ndarray::{Array1, Array2, ArrayView2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Result of a run-to-completion k-means invocation
#[derive(Debug, Clone)]
pub struct KMeansRun {
    /// Final centroid set
    pub centroids: Array2<f64>,
    /// Cluster assignment, index-aligned with the dataset rows
    pub assignment: Array1<usize>,
    /// Number of assign/update steps performed
    pub n_steps: usize,
    /// Whether the loop exited on convergence rather than the step budget
    pub converged: bool,
}

/// Assign every data point to its nearest centroid.
///
/// Ties resolve to the lowest centroid index. Pure function of its inputs.
pub fn assign_clusters(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> Array1<usize> {
    let mut assignment = Array1::zeros(data.nrows());

    for (i, point) in data.outer_iter().enumerate() {
        let (idx, _) = nearest_centroid(&point, centroids);
        assignment[i] = idx;
    }

    assignment
}

/// Recompute centroids as the per-dimension mean of each cluster's points.
///
/// A cluster with no assigned points contributes no row, so the result may
/// have fewer than `k` rows. That shrinkage is deliberate reference behavior;
/// a later convergence test against a full-sized set reports it as a
/// [`KMeansError::ShapeMismatch`] rather than masking it.
pub fn update_centroids(
    data: &ArrayView2<f64>,
    assignment: &Array1<usize>,
    k: usize,
) -> Array2<f64> {
    let n_features = data.ncols();

    let mut cluster_sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut cluster_counts: Array1<f64> = Array1::zeros(k);

    for (i, point) in data.outer_iter().enumerate() {
        let cluster_idx = assignment[i];
        cluster_counts[cluster_idx] += 1.0;
        for j in 0..n_features {
            cluster_sums[[cluster_idx, j]] += point[j];
        }
    }

    let occupied: Vec<usize> = (0..k).filter(|&c| cluster_counts[c] > 0.0).collect();

    let mut centroids = Array2::zeros((occupied.len(), n_features));
    for (row, &cluster_idx) in occupied.iter().enumerate() {
        let count = cluster_counts[cluster_idx];
        for j in 0..n_features {
            centroids[[row, j]] = cluster_sums[[cluster_idx, j]] / count;
        }
    }

    centroids
}

/// Test whether two successive centroid sets are equal within tolerance.
///
/// # Errors
///
/// Returns [`KMeansError::ShapeMismatch`] when the row counts differ, which
/// happens after a cluster emptied out during [`update_centroids`].
pub fn has_converged(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
    rtol: f64,
    atol: f64,
) -> Result<bool, KMeansError> {
    if old_centroids.nrows() != new_centroids.nrows() {
        return Err(KMeansError::ShapeMismatch {
            expected: old_centroids.nrows(),
            found: new_centroids.nrows(),
        });
    }

    Ok(all_close(old_centroids, new_centroids, rtol, atol))
}

/// Run assign/update iterations from the given centroids until convergence
/// or the step budget is exhausted.
///
/// On convergence the assignment computed against the pre-update centroids is
/// returned, and those pre-update centroids are kept (the freshly updated set
/// is equal to them within tolerance and is discarded). Running out of steps
/// is a normal exit with `converged = false`.
pub fn run_lloyd(
    data: &ArrayView2<f64>,
    mut centroids: Array2<f64>,
    config: &KMeansConfig,
) -> Result<KMeansRun, KMeansError> {
    let mut assignment = Array1::zeros(data.nrows());
    let mut n_steps = 0;
    let mut converged = false;

    for step in 0..config.max_steps {
        n_steps = step + 1;

        assignment = assign_clusters(data, &centroids.view());
        let new_centroids = update_centroids(data, &assignment, config.k);

        converged = has_converged(
            &centroids.view(),
            &new_centroids.view(),
            config.rtol,
            config.atol,
        )?;

        if config.verbose {
            eprintln!(
                "  Step {}/{}: {} centroids, converged = {}",
                n_steps,
                config.max_steps,
                new_centroids.nrows(),
                converged
            );
        }

        if converged {
            break;
        }

        centroids = new_centroids;
    }

    Ok(KMeansRun {
        centroids,
        assignment,
        n_steps,
        converged,
    })
}

/// Run the full k-means algorithm: initialize centroids, then iterate to
/// convergence or the step budget.
pub fn run_kmeans(data: &ArrayView2<f64>, config: &KMeansConfig) -> Result<KMeansRun, KMeansError> {
    if config.k == 0 {
        return Err(KMeansError::InvalidK("k must be greater than 0".to_string()));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let centroids = initialize_centroids(data, config.init_method, config.k, &mut rng)?;

    if config.verbose {
        eprintln!(
            "Running k-means: {} samples, {} features, {} clusters, {} init",
            data.nrows(),
            data.ncols(),
            config.k,
            config.init_method
        );
    }

    run_lloyd(data, centroids, config)
}
