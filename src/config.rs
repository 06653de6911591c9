use crate::init::InitMethod;

/// Configuration for the clustering engine
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Centroid initialization strategy
    pub init_method: InitMethod,

    /// Maximum number of assign/update steps for run-to-completion.
    /// Exhausting the budget without convergence is a normal exit, not an error.
    pub max_steps: usize,

    /// Relative tolerance for the convergence test (allclose semantics)
    pub rtol: f64,

    /// Absolute tolerance for the convergence test (allclose semantics)
    pub atol: f64,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Print verbose output while running
    pub verbose: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            init_method: InitMethod::Random,
            max_steps: 100,
            rtol: 1e-5,
            atol: 1e-8,
            seed: 0,
            verbose: false,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the initialization method
    pub fn with_init_method(mut self, init_method: InitMethod) -> Self {
        self.init_method = init_method;
        self
    }

    /// Set the maximum number of steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the convergence tolerances
    pub fn with_tolerance(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set verbose mode
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
