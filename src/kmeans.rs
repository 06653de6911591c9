use crate::algorithm::{assign_clusters, has_converged, run_lloyd, update_centroids, KMeansRun};
use crate::config::KMeansConfig;
use crate::error::KMeansError;
use crate::init::{initialize_centroids, InitMethod};
use ndarray::{Array1, Array2, ArrayView2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Observable lifecycle phase of a [`KMeans`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No centroids yet; the next step initializes them
    Uninitialized,
    /// Centroids present, not yet converged
    Running,
    /// The last step's update left the centroids unchanged within tolerance.
    /// Informational only: stepping again recomputes another pass.
    Converged,
}

/// State adopted by a single [`KMeans::step`] call.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Centroids after the step's update
    pub centroids: Array2<f64>,
    /// Assignment computed against the centroids the step started from
    pub assignment: Array1<usize>,
    /// Whether the step's update moved no centroid beyond tolerance
    pub converged: bool,
}

/// Incremental k-means clustering engine.
///
/// Owns the current centroids, the most recent assignment, and a converged
/// flag, and advances one assign/update iteration per [`step`](Self::step)
/// call so interactive callers can watch the algorithm evolve. A
/// [`run`](Self::run) method drives the same state to completion in one call.
///
/// The engine performs no internal synchronization; a caller sharing one
/// instance across threads must serialize access to `step` and `reset`.
///
/// # Example
///
/// ```
/// use stepkmeans::{KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
/// let mut engine = KMeans::with_config(KMeansConfig::new(2).with_seed(42));
///
/// // Advance one iteration at a time until the centroids settle
/// for _ in 0..10 {
///     let outcome = engine.step(&data.view()).unwrap();
///     if outcome.converged {
///         break;
///     }
/// }
/// assert!(engine.converged());
/// ```
pub struct KMeans {
    /// Engine configuration
    config: KMeansConfig,

    /// Seeded RNG used by the initialization strategies
    rng: ChaCha8Rng,

    /// Current centroids (None until initialized)
    centroids: Option<Array2<f64>>,

    /// Assignment computed by the most recent step
    assignment: Option<Array1<usize>>,

    /// Whether the most recent step converged
    converged: bool,
}

impl KMeans {
    /// Create a new engine with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            centroids: None,
            assignment: None,
            converged: false,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        if self.centroids.is_none() {
            Phase::Uninitialized
        } else if self.converged {
            Phase::Converged
        } else {
            Phase::Running
        }
    }

    /// Supply centroids directly, the path for [`InitMethod::Manual`].
    ///
    /// Clears any previous assignment and converged flag, so the engine is in
    /// the running phase afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::InvalidDimensions`] unless the set has exactly
    /// `k` rows.
    pub fn set_centroids(&mut self, centroids: Array2<f64>) -> Result<(), KMeansError> {
        if centroids.nrows() != self.config.k {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} centroid rows, got {}",
                self.config.k,
                centroids.nrows()
            )));
        }

        self.centroids = Some(centroids);
        self.assignment = None;
        self.converged = false;
        Ok(())
    }

    /// Perform one atomic assign/update step.
    ///
    /// On the first call (or after [`reset`](Self::reset)) the centroids are
    /// initialized per the configured strategy and the first iteration runs
    /// within the same call. Each step assigns points against the current
    /// centroids, recomputes centroids from that assignment, tests
    /// convergence between the two centroid sets, and adopts the new
    /// centroids and assignment. Stepping an already-converged engine simply
    /// recomputes one more pass.
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails (see
    /// [`initialize_centroids`]), if the data dimensionality does not match
    /// existing centroids, or if a cluster emptied out and the convergence
    /// test hit a row-count mismatch. On a mismatch the new centroids are not
    /// adopted.
    pub fn step(&mut self, data: &ArrayView2<f64>) -> Result<StepOutcome, KMeansError> {
        self.converged = false;

        if self.centroids.is_none() {
            let centroids = initialize_centroids(
                data,
                self.config.init_method,
                self.config.k,
                &mut self.rng,
            )?;
            self.centroids = Some(centroids);
        }

        let current = self.centroids.as_ref().ok_or(KMeansError::NotInitialized)?;
        self.check_dims(data, current)?;

        let assignment = assign_clusters(data, &current.view());
        let new_centroids = update_centroids(data, &assignment, self.config.k);

        let converged = has_converged(
            &current.view(),
            &new_centroids.view(),
            self.config.rtol,
            self.config.atol,
        )?;

        let outcome = StepOutcome {
            centroids: new_centroids.clone(),
            assignment: assignment.clone(),
            converged,
        };

        self.centroids = Some(new_centroids);
        self.assignment = Some(assignment);
        self.converged = converged;

        Ok(outcome)
    }

    /// Compute an assignment against the current centroids without mutating
    /// engine state.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NotInitialized`] when centroids are absent, or
    /// [`KMeansError::InvalidDimensions`] when the data dimensionality does
    /// not match them.
    pub fn assign(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let centroids = self.centroids.as_ref().ok_or(KMeansError::NotInitialized)?;
        self.check_dims(data, centroids)?;

        Ok(assign_clusters(data, &centroids.view()))
    }

    /// Run to convergence (or the step budget) and adopt the result.
    ///
    /// Initializes centroids per the configured strategy unless they were
    /// already supplied via [`set_centroids`](Self::set_centroids), which is
    /// how a manual configuration runs.
    ///
    /// Returns the final assignment, index-aligned with the dataset rows.
    pub fn run(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let centroids = match (self.config.init_method, self.centroids.take()) {
            (InitMethod::Manual, Some(existing)) => existing,
            (InitMethod::Manual, None) => return Err(KMeansError::ManualInit),
            (method, _) => initialize_centroids(data, method, self.config.k, &mut self.rng)?,
        };
        self.check_dims(data, &centroids)?;

        let KMeansRun {
            centroids,
            assignment,
            converged,
            ..
        } = run_lloyd(data, centroids, &self.config)?;

        self.centroids = Some(centroids);
        self.converged = converged;
        self.assignment = Some(assignment.clone());

        Ok(assignment)
    }

    /// Return the engine to the uninitialized phase.
    ///
    /// Discards centroids, assignment, and the converged flag, and restores
    /// the seeded RNG stream, so subsequent behavior is indistinguishable
    /// from a freshly constructed engine with the same configuration.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.centroids = None;
        self.assignment = None;
        self.converged = false;
    }

    /// Get the current centroids, if initialized
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.centroids.as_ref()
    }

    /// Get the most recent assignment, if any
    pub fn assignment(&self) -> Option<&Array1<usize>> {
        self.assignment.as_ref()
    }

    /// Whether the most recent step converged
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Get the number of clusters
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    fn check_dims(
        &self,
        data: &ArrayView2<f64>,
        centroids: &Array2<f64>,
    ) -> Result<(), KMeansError> {
        if data.ncols() != centroids.ncols() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                centroids.ncols(),
                data.ncols()
            )));
        }
        Ok(())
    }
}
